//! Typed preferences over a flat string store.
//!
//! This is the main entry point for applications. A [`Prefs`] wraps one
//! preference store and offers:
//!
//! - typed get/put for strings, integers, floats, doubles and booleans
//! - ordered string sets that keep element order on any backend
//! - arbitrary `serde` values through a configurable JSON backend
//! - batched edits through [`Editor`]
//!
//! # Example
//! ```ignore
//! use prefs::{PrefsBuilder, JsonSerializer};
//!
//! let prefs = PrefsBuilder::new()
//!     .app_name("my_app")
//!     .serializer(JsonSerializer::new())
//!     .build()?;
//!
//! prefs.put_ordered_string_set("recent", ["b.txt", "a.txt"])?;
//! let recent = prefs.get_ordered_string_set("recent", vec![])?;
//! ```

pub mod builder;
pub mod config;
pub mod editor;
pub mod error;
pub mod global;
pub mod prefs;

pub use builder::{default_storage_dir, PrefsBuilder, DEFAULT_SUFFIX};
pub use config::{PrefsConfig, SerializerKind, StoreBackend};
pub use editor::Editor;
pub use error::{PrefsError, PrefsResult};
pub use prefs::Prefs;

// Re-export the pieces callers configure a Prefs with.
pub use prefs_codec::{JsonSerializer, PrefSerializer, SimdJsonSerializer};
pub use prefs_store::{
    FilePreferenceStore, InMemoryPreferenceStore, PreferenceStore, StoreError,
};
