//! Order-preserving string collections on a flat store.
//!
//! The store has no collection type with a stable iteration order, so a
//! sequence is spread over scalar entries (see [`crate::keys`]) and the
//! length marker doubles as the "does a collection exist here" check.

use prefs_store::{Batch, PreferenceStore};
use tracing::debug;

use crate::error::CodecResult;
use crate::keys::{index_key, length_key};

/// Value decoded for an index inside the declared length that has no entry.
pub const GAP_PLACEHOLDER: &str = "";

/// Encodes ordered string sequences as a length marker plus indexed entries.
#[derive(Clone, Debug)]
pub struct OrderedSetCodec<S> {
    store: S,
}

impl<S: PreferenceStore> OrderedSetCodec<S> {
    /// Bind the codec to a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The store this codec writes to.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns `true` if an ordered collection exists at `key`.
    pub fn exists(&self, key: &str) -> CodecResult<bool> {
        Ok(self.store.contains(&length_key(key))?)
    }

    /// Write `values` under `key`, replacing any previous collection.
    ///
    /// Elements left over from a longer previous collection are removed in
    /// the same batch as the new entries.
    pub fn encode<I>(&self, key: &str, values: I) -> CodecResult<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let old_len = self.stored_length(key)?.unwrap_or(0);

        let mut batch = Batch::new();
        let mut new_len = 0usize;
        for value in values {
            batch.put(index_key(key, new_len), value.as_ref());
            new_len += 1;
        }
        batch.put(length_key(key), new_len.to_string());
        for index in new_len..old_len {
            batch.remove(index_key(key, index));
        }

        debug!(key, old_len, new_len, "encoding ordered set");
        self.store.apply(batch)?;
        Ok(())
    }

    /// Read the collection at `key`, or `default` if none exists.
    ///
    /// A corrupt length marker decodes as an empty collection; a missing
    /// element inside the declared length decodes as [`GAP_PLACEHOLDER`].
    pub fn decode(&self, key: &str, default: Vec<String>) -> CodecResult<Vec<String>> {
        let Some(len) = self.stored_length(key)? else {
            return Ok(default);
        };

        let mut values = Vec::with_capacity(len);
        for index in 0..len {
            match self.store.get_string(&index_key(key, index))? {
                Some(value) => values.push(value),
                None => {
                    debug!(key, index, "missing ordered set element; using placeholder");
                    values.push(GAP_PLACEHOLDER.to_string());
                }
            }
        }
        Ok(values)
    }

    /// Remove the collection at `key` together with the literal `key` entry.
    ///
    /// Removing twice is a no-op the second time.
    pub fn remove(&self, key: &str) -> CodecResult<()> {
        let mut batch = Batch::new();
        self.stage_remove(key, &mut batch)?;
        self.store.apply(batch)?;
        Ok(())
    }

    /// Append the edits of [`remove`](Self::remove) to `batch` without
    /// applying them. The declared length is read now, not when the batch
    /// is applied.
    pub fn stage_remove(&self, key: &str, batch: &mut Batch) -> CodecResult<()> {
        if let Some(len) = self.stored_length(key)? {
            for index in 0..len {
                batch.remove(index_key(key, index));
            }
            batch.remove(length_key(key));
        }
        batch.remove(key);
        Ok(())
    }

    /// Declared element count at `key`, or `None` if no marker exists.
    ///
    /// A count larger than the whole store cannot describe a real
    /// collection and is treated as corrupt.
    fn stored_length(&self, key: &str) -> CodecResult<Option<usize>> {
        let Some(raw) = self.store.get_string(&length_key(key))? else {
            return Ok(None);
        };
        let len = parse_length(key, &raw);
        if len == 0 {
            return Ok(Some(0));
        }

        let entries = self.store.all()?.len();
        if len > entries {
            debug!(key, len, entries, "ordered set length exceeds store size; treating as empty");
            return Ok(Some(0));
        }
        Ok(Some(len))
    }
}

/// Parse a stored element count. Negative or non-numeric counts are zero.
fn parse_length(key: &str, raw: &str) -> usize {
    match raw.trim().parse::<i64>() {
        Ok(n) if n >= 0 => usize::try_from(n).unwrap_or(0),
        Ok(_) => 0,
        Err(e) => {
            debug!(key, raw, error = %e, "corrupt ordered set length; treating as empty");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;
    use crate::testing::FailingStore;
    use prefs_store::{InMemoryPreferenceStore, StoreError};
    use proptest::prelude::*;

    fn codec() -> OrderedSetCodec<InMemoryPreferenceStore> {
        OrderedSetCodec::new(InMemoryPreferenceStore::new())
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    // -----------------------------------------------------------------------
    // Encoding layout
    // -----------------------------------------------------------------------

    #[test]
    fn encode_writes_marker_and_indexed_entries() {
        let codec = codec();
        codec.encode("tags", ["a", "b", "c"]).unwrap();

        let all = codec.store().all().unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all.get("tags#LENGTH").map(String::as_str), Some("3"));
        assert_eq!(all.get("tags[0]").map(String::as_str), Some("a"));
        assert_eq!(all.get("tags[1]").map(String::as_str), Some("b"));
        assert_eq!(all.get("tags[2]").map(String::as_str), Some("c"));
    }

    #[test]
    fn encode_empty_writes_zero_marker() {
        let codec = codec();
        codec.encode("tags", Vec::<String>::new()).unwrap();
        assert_eq!(
            codec.store().get_string("tags#LENGTH").unwrap().as_deref(),
            Some("0")
        );
        assert!(codec.exists("tags").unwrap());
        assert!(codec.decode("tags", strings(&["d"])).unwrap().is_empty());
    }

    #[test]
    fn shrinking_prunes_stale_entries() {
        let codec = codec();
        codec.encode("tags", ["a", "b", "c"]).unwrap();
        codec.encode("tags", ["z"]).unwrap();

        let store = codec.store();
        assert!(!store.contains("tags[1]").unwrap());
        assert!(!store.contains("tags[2]").unwrap());
        assert_eq!(codec.decode("tags", vec![]).unwrap(), strings(&["z"]));
    }

    #[test]
    fn growing_overwrites_in_place() {
        let codec = codec();
        codec.encode("tags", ["a"]).unwrap();
        codec.encode("tags", ["x", "y", "z"]).unwrap();
        assert_eq!(codec.decode("tags", vec![]).unwrap(), strings(&["x", "y", "z"]));
    }

    #[test]
    fn order_and_duplicates_are_preserved() {
        let codec = codec();
        codec.encode("k", ["b", "a", "b", "c"]).unwrap();
        assert_eq!(codec.decode("k", vec![]).unwrap(), strings(&["b", "a", "b", "c"]));
    }

    // -----------------------------------------------------------------------
    // Decoding fallbacks
    // -----------------------------------------------------------------------

    #[test]
    fn decode_without_marker_returns_default() {
        let codec = codec();
        let default = strings(&["fallback"]);
        assert_eq!(codec.decode("nothing", default.clone()).unwrap(), default);
    }

    #[test]
    fn literal_key_without_marker_is_not_a_collection() {
        let store = InMemoryPreferenceStore::with_entries([("tags", "plain"), ("tags[0]", "x")]);
        let codec = OrderedSetCodec::new(store);
        assert_eq!(codec.decode("tags", strings(&["d"])).unwrap(), strings(&["d"]));
    }

    #[test]
    fn corrupt_lengths_decode_as_empty() {
        for raw in ["-1", "-7", "three", "", "1.5"] {
            let store = InMemoryPreferenceStore::with_entries([("k#LENGTH", raw), ("k[0]", "x")]);
            let codec = OrderedSetCodec::new(store);
            assert!(
                codec.decode("k", strings(&["d"])).unwrap().is_empty(),
                "length {raw:?} should decode as empty"
            );
        }
    }

    #[test]
    fn huge_length_is_treated_as_corrupt() {
        for raw in ["1000000000000000000", "9223372036854775807", "5"] {
            let store = InMemoryPreferenceStore::with_entries([("k#LENGTH", raw), ("k[0]", "x")]);
            let codec = OrderedSetCodec::new(store);
            assert!(
                codec.decode("k", strings(&["d"])).unwrap().is_empty(),
                "length {raw:?} should decode as empty"
            );

            codec.remove("k").unwrap();
            assert!(!codec.exists("k").unwrap());
            assert_eq!(codec.store().len(), 1);

            codec.store().put_string("k#LENGTH", raw).unwrap();
            codec.encode("k", ["a", "b"]).unwrap();
            assert_eq!(codec.decode("k", vec![]).unwrap(), strings(&["a", "b"]));
        }
    }

    #[test]
    fn gaps_decode_as_placeholder() {
        let store = InMemoryPreferenceStore::with_entries([
            ("k#LENGTH", "3"),
            ("k[0]", "a"),
            ("k[2]", "c"),
        ]);
        let codec = OrderedSetCodec::new(store);
        assert_eq!(
            codec.decode("k", vec![]).unwrap(),
            vec!["a".to_string(), GAP_PLACEHOLDER.to_string(), "c".to_string()]
        );
    }

    #[test]
    fn entries_beyond_length_are_ignored() {
        let store = InMemoryPreferenceStore::with_entries([
            ("k#LENGTH", "1"),
            ("k[0]", "a"),
            ("k[1]", "orphan"),
        ]);
        let codec = OrderedSetCodec::new(store);
        assert_eq!(codec.decode("k", vec![]).unwrap(), strings(&["a"]));
    }

    // -----------------------------------------------------------------------
    // Removal
    // -----------------------------------------------------------------------

    #[test]
    fn remove_deletes_marker_elements_and_literal_key() {
        let codec = codec();
        codec.encode("tags", ["a", "b"]).unwrap();
        codec.store().put_string("tags", "literal").unwrap();
        codec.store().put_string("other", "keep").unwrap();

        codec.remove("tags").unwrap();

        let all = codec.store().all().unwrap();
        assert_eq!(all.len(), 1);
        assert!(all.contains_key("other"));
        assert!(!codec.exists("tags").unwrap());
    }

    #[test]
    fn remove_is_idempotent() {
        let codec = codec();
        codec.encode("tags", ["a", "b", "c"]).unwrap();
        codec.remove("tags").unwrap();
        codec.remove("tags").unwrap();
        assert!(codec.store().all().unwrap().is_empty());
    }

    #[test]
    fn remove_without_marker_only_removes_literal_key() {
        let store = InMemoryPreferenceStore::with_entries([("k", "v"), ("k[0]", "stray")]);
        let codec = OrderedSetCodec::new(store);
        codec.remove("k").unwrap();
        let all = codec.store().all().unwrap();
        assert_eq!(all.len(), 1);
        assert!(all.contains_key("k[0]"));
    }

    #[test]
    fn stage_remove_defers_until_applied() {
        let codec = codec();
        codec.encode("tags", ["a", "b"]).unwrap();

        let mut batch = Batch::new();
        codec.stage_remove("tags", &mut batch).unwrap();
        assert_eq!(batch.len(), 4);
        assert!(codec.exists("tags").unwrap());

        codec.store().apply(batch).unwrap();
        assert!(codec.store().is_empty());
    }

    // -----------------------------------------------------------------------
    // Store failures
    // -----------------------------------------------------------------------

    #[test]
    fn store_errors_propagate() {
        let codec = OrderedSetCodec::new(FailingStore);
        assert!(matches!(
            codec.encode("k", ["a"]),
            Err(CodecError::Store(StoreError::Io(_)))
        ));
        assert!(matches!(
            codec.decode("k", strings(&["d"])),
            Err(CodecError::Store(StoreError::Io(_)))
        ));
        assert!(matches!(
            codec.remove("k"),
            Err(CodecError::Store(StoreError::Io(_)))
        ));
        assert!(matches!(
            codec.exists("k"),
            Err(CodecError::Store(StoreError::Io(_)))
        ));
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    proptest! {
        #[test]
        fn round_trip_regardless_of_prior_contents(
            prior in proptest::collection::vec(".*", 0..8),
            values in proptest::collection::vec(".*", 0..8),
        ) {
            let codec = codec();
            codec.encode("key", &prior).unwrap();
            codec.encode("key", &values).unwrap();

            prop_assert_eq!(codec.decode("key", vec!["default".into()]).unwrap(), values.clone());
            // Marker plus exactly one entry per element: nothing orphaned.
            prop_assert_eq!(codec.store().all().unwrap().len(), values.len() + 1);
        }
    }
}
