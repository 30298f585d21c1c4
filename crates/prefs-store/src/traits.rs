use std::collections::BTreeMap;

use crate::batch::Batch;
use crate::error::StoreResult;

/// Flat, string-keyed, string-valued preference store.
///
/// All implementations must satisfy these invariants:
/// - Single-key reads and writes are atomic.
/// - A [`Batch`] lands as a whole: readers observe either none or all of
///   its edits.
/// - The store never interprets values. Typed accessors live above it.
/// - All I/O errors are propagated, never silently ignored.
pub trait PreferenceStore: Send + Sync {
    /// Read the string stored at `key`.
    ///
    /// Returns `Ok(None)` if the key has no entry.
    fn get_string(&self, key: &str) -> StoreResult<Option<String>>;

    /// Check whether an entry exists at `key`.
    fn contains(&self, key: &str) -> StoreResult<bool>;

    /// Snapshot of every entry, sorted by key.
    fn all(&self) -> StoreResult<BTreeMap<String, String>>;

    /// Apply a batch of edits in order as one atomic unit.
    fn apply(&self, batch: Batch) -> StoreResult<()>;

    /// Write a single string entry.
    fn put_string(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut batch = Batch::new();
        batch.put(key, value);
        self.apply(batch)
    }

    /// Remove a single entry. Removing a missing key is a no-op.
    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut batch = Batch::new();
        batch.remove(key);
        self.apply(batch)
    }

    /// Remove every entry.
    fn clear(&self) -> StoreResult<()> {
        let mut batch = Batch::new();
        batch.clear();
        self.apply(batch)
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for std::sync::Arc<S> {
    fn get_string(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_string(key)
    }

    fn contains(&self, key: &str) -> StoreResult<bool> {
        (**self).contains(key)
    }

    fn all(&self) -> StoreResult<BTreeMap<String, String>> {
        (**self).all()
    }

    fn apply(&self, batch: Batch) -> StoreResult<()> {
        (**self).apply(batch)
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for &S {
    fn get_string(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_string(key)
    }

    fn contains(&self, key: &str) -> StoreResult<bool> {
        (**self).contains(key)
    }

    fn all(&self) -> StoreResult<BTreeMap<String, String>> {
        (**self).all()
    }

    fn apply(&self, batch: Batch) -> StoreResult<()> {
        (**self).apply(batch)
    }
}
