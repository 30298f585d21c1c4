use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::batch::Batch;
use crate::error::{StoreError, StoreResult};
use crate::traits::PreferenceStore;

/// In-memory, map-based preference store.
///
/// Intended for tests and embedding. Entries live behind a `RwLock`; a batch
/// is applied while holding the write lock, so readers never see a partial
/// batch. Data is lost when the store is dropped.
pub struct InMemoryPreferenceStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl InMemoryPreferenceStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create a store pre-populated with `entries`.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: RwLock::new(map),
        }
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryPreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn get_string(&self, key: &str) -> StoreResult<Option<String>> {
        let map = self.entries.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.get(key).cloned())
    }

    fn contains(&self, key: &str) -> StoreResult<bool> {
        let map = self.entries.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.contains_key(key))
    }

    fn all(&self) -> StoreResult<BTreeMap<String, String>> {
        let map = self.entries.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.clone())
    }

    fn apply(&self, batch: Batch) -> StoreResult<()> {
        let mut map = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        batch.apply_to(&mut map);
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryPreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = f.debug_struct("InMemoryPreferenceStore");
        match self.entries.read() {
            Ok(map) => out.field("entry_count", &map.len()),
            Err(_) => out.field("poisoned", &true),
        };
        out.finish()
    }
}
