//! Physical key naming for ordered string sets.
//!
//! An ordered set stored under logical key `K` occupies:
//! - `K#LENGTH` -- the element count as decimal text
//! - `K[0]`, `K[1]`, ... `K[N-1]` -- one element per entry
//!
//! These names are part of the persisted format and must not change.

/// Suffix appended to a logical key to form its length marker.
pub const LENGTH_SUFFIX: &str = "#LENGTH";

/// Key of the length marker for the ordered set at `key`.
///
/// # Examples
///
/// ```
/// use prefs_codec::keys::length_key;
///
/// assert_eq!(length_key("tags"), "tags#LENGTH");
/// ```
pub fn length_key(key: &str) -> String {
    format!("{key}{LENGTH_SUFFIX}")
}

/// Key of element `index` in the ordered set at `key`.
///
/// # Examples
///
/// ```
/// use prefs_codec::keys::index_key;
///
/// assert_eq!(index_key("tags", 2), "tags[2]");
/// ```
pub fn index_key(key: &str, index: usize) -> String {
    format!("{key}[{index}]")
}
