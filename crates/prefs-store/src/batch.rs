use std::collections::BTreeMap;

/// A single edit staged in a [`Batch`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Edit {
    /// Create or overwrite the entry at `key`.
    Put { key: String, value: String },
    /// Delete the entry at `key` if present.
    Remove { key: String },
    /// Delete every entry.
    Clear,
}

/// An ordered group of edits committed to a store in one apply.
///
/// Edits take effect in the order they were staged, so a `remove` staged
/// after a `put` of the same key wins, and a `clear` only wipes entries
/// written before it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Batch {
    edits: Vec<Edit>,
}

impl Batch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a write.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.edits.push(Edit::Put {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Stage a removal.
    pub fn remove(&mut self, key: impl Into<String>) -> &mut Self {
        self.edits.push(Edit::Remove { key: key.into() });
        self
    }

    /// Stage a removal of every entry.
    pub fn clear(&mut self) -> &mut Self {
        self.edits.push(Edit::Clear);
        self
    }

    /// Number of staged edits.
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Returns `true` if nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Staged edits in application order.
    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    /// Apply every edit to `map` in order.
    ///
    /// Backends call this on their own copy of the data while holding the
    /// write lock.
    pub fn apply_to(self, map: &mut BTreeMap<String, String>) {
        for edit in self.edits {
            match edit {
                Edit::Put { key, value } => {
                    map.insert(key, value);
                }
                Edit::Remove { key } => {
                    map.remove(&key);
                }
                Edit::Clear => map.clear(),
            }
        }
    }
}

impl Extend<Edit> for Batch {
    fn extend<I: IntoIterator<Item = Edit>>(&mut self, iter: I) {
        self.edits.extend(iter);
    }
}
