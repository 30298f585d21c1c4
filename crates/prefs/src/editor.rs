use prefs_codec::OrderedSetCodec;
use prefs_store::{Batch, PreferenceStore};

use crate::error::PrefsResult;

/// A batch of preference edits, committed as one unit by [`Editor::apply`].
///
/// Dropping an editor without applying it discards the staged edits.
#[must_use = "edits are discarded unless `apply` is called"]
pub struct Editor<'a> {
    store: &'a dyn PreferenceStore,
    batch: Batch,
}

impl<'a> Editor<'a> {
    pub(crate) fn new(store: &'a dyn PreferenceStore) -> Self {
        Self {
            store,
            batch: Batch::new(),
        }
    }

    pub fn put_string(mut self, key: &str, value: &str) -> Self {
        self.batch.put(key, value);
        self
    }

    pub fn put_int(self, key: &str, value: i32) -> Self {
        self.put_string(key, &value.to_string())
    }

    pub fn put_long(self, key: &str, value: i64) -> Self {
        self.put_string(key, &value.to_string())
    }

    pub fn put_float(self, key: &str, value: f32) -> Self {
        self.put_string(key, &value.to_string())
    }

    pub fn put_double(self, key: &str, value: f64) -> Self {
        self.put_long(key, value.to_bits() as i64)
    }

    pub fn put_bool(self, key: &str, value: bool) -> Self {
        self.put_string(key, &value.to_string())
    }

    /// Stage removal of the literal `key` entry.
    ///
    /// An ordered set stored at `key` is left in place; use
    /// [`remove_ordered_set`](Self::remove_ordered_set) for that.
    pub fn remove(mut self, key: &str) -> Self {
        self.batch.remove(key);
        self
    }

    /// Stage removal of `key` together with any ordered set stored there,
    /// like [`Prefs::remove`](crate::Prefs::remove).
    ///
    /// The set's length is read when staged, not when applied.
    pub fn remove_ordered_set(mut self, key: &str) -> PrefsResult<Self> {
        OrderedSetCodec::new(self.store).stage_remove(key, &mut self.batch)?;
        Ok(self)
    }

    /// Stage removal of everything written before this point.
    pub fn clear(mut self) -> Self {
        self.batch.clear();
        self
    }

    /// Number of staged edits.
    pub fn len(&self) -> usize {
        self.batch.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    /// Commit every staged edit in one store batch.
    pub fn apply(self) -> PrefsResult<()> {
        self.store.apply(self.batch)?;
        Ok(())
    }
}
