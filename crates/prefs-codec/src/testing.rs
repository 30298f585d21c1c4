use std::collections::BTreeMap;
use std::io;

use prefs_store::{Batch, PreferenceStore, StoreError, StoreResult};

/// Store whose every operation fails with an I/O error.
pub(crate) struct FailingStore;

fn unavailable() -> StoreError {
    StoreError::Io(io::Error::other("disk unavailable"))
}

impl PreferenceStore for FailingStore {
    fn get_string(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(unavailable())
    }

    fn contains(&self, _key: &str) -> StoreResult<bool> {
        Err(unavailable())
    }

    fn all(&self) -> StoreResult<BTreeMap<String, String>> {
        Err(unavailable())
    }

    fn apply(&self, _batch: Batch) -> StoreResult<()> {
        Err(unavailable())
    }
}
