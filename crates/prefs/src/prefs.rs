use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;
use std::sync::Arc;

use prefs_codec::{length_key, ObjectCodec, OrderedSetCodec, PrefSerializer};
use prefs_store::PreferenceStore;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::editor::Editor;
use crate::error::{PrefsError, PrefsResult};

type SharedStore = Arc<dyn PreferenceStore>;

/// Typed access to one preferences store.
///
/// Primitives are stored as their canonical text form; ordered string sets
/// go through [`OrderedSetCodec`]; arbitrary values go through the
/// configured serializer. Build one with [`crate::PrefsBuilder`].
pub struct Prefs {
    name: String,
    store: SharedStore,
    ordered: OrderedSetCodec<SharedStore>,
    objects: Option<ObjectCodec<SharedStore>>,
}

impl Prefs {
    pub(crate) fn new(
        name: String,
        store: SharedStore,
        serializer: Option<Arc<dyn PrefSerializer>>,
    ) -> Self {
        let ordered = OrderedSetCodec::new(Arc::clone(&store));
        let objects = serializer.map(|s| ObjectCodec::new(Arc::clone(&store), s));
        Self {
            name,
            store,
            ordered,
            objects,
        }
    }

    /// Resolved preferences name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the configured serializer, if any.
    pub fn serializer_name(&self) -> Option<&'static str> {
        self.objects.as_ref().map(|c| c.serializer().name())
    }

    /// The underlying store.
    pub fn store(&self) -> &dyn PreferenceStore {
        self.store.as_ref()
    }

    /// Every stored entry, including the raw entries of ordered sets.
    pub fn get_all(&self) -> PrefsResult<BTreeMap<String, String>> {
        Ok(self.store.all()?)
    }

    // ---- Primitives ----

    pub fn get_string(&self, key: &str, default: &str) -> PrefsResult<String> {
        Ok(self
            .store
            .get_string(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    pub fn put_string(&self, key: &str, value: &str) -> PrefsResult<()> {
        Ok(self.store.put_string(key, value)?)
    }

    pub fn get_int(&self, key: &str, default: i32) -> PrefsResult<i32> {
        self.get_parsed(key, "i32", default)
    }

    pub fn put_int(&self, key: &str, value: i32) -> PrefsResult<()> {
        self.put_string(key, &value.to_string())
    }

    pub fn get_long(&self, key: &str, default: i64) -> PrefsResult<i64> {
        self.get_parsed(key, "i64", default)
    }

    pub fn put_long(&self, key: &str, value: i64) -> PrefsResult<()> {
        self.put_string(key, &value.to_string())
    }

    pub fn get_float(&self, key: &str, default: f32) -> PrefsResult<f32> {
        self.get_parsed(key, "f32", default)
    }

    pub fn put_float(&self, key: &str, value: f32) -> PrefsResult<()> {
        self.put_string(key, &value.to_string())
    }

    pub fn get_bool(&self, key: &str, default: bool) -> PrefsResult<bool> {
        self.get_parsed(key, "bool", default)
    }

    pub fn put_bool(&self, key: &str, value: bool) -> PrefsResult<()> {
        self.put_string(key, &value.to_string())
    }

    /// Doubles are stored as their raw IEEE-754 bits in the `i64` domain,
    /// so [`Prefs::get_long`] on the same key returns the bit pattern.
    pub fn get_double(&self, key: &str, default: f64) -> PrefsResult<f64> {
        let bits = self.get_long(key, default.to_bits() as i64)?;
        Ok(f64::from_bits(bits as u64))
    }

    pub fn put_double(&self, key: &str, value: f64) -> PrefsResult<()> {
        self.put_long(key, value.to_bits() as i64)
    }

    fn get_parsed<T: FromStr>(&self, key: &str, expected: &'static str, default: T) -> PrefsResult<T> {
        match self.store.get_string(key)? {
            None => Ok(default),
            Some(raw) => raw.parse().map_err(|_| PrefsError::TypeMismatch {
                key: key.to_string(),
                expected,
                found: raw,
            }),
        }
    }

    // ---- Ordered string sets ----

    /// Store `values` in order. Repeated values keep their first position.
    pub fn put_ordered_string_set<I>(&self, key: &str, values: I) -> PrefsResult<()>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut seen = HashSet::new();
        let unique: Vec<String> = values
            .into_iter()
            .map(Into::into)
            .filter(|v| seen.insert(v.clone()))
            .collect();
        Ok(self.ordered.encode(key, &unique)?)
    }

    /// Read the ordered set at `key`, or `default` if none was stored.
    pub fn get_ordered_string_set(&self, key: &str, default: Vec<String>) -> PrefsResult<Vec<String>> {
        Ok(self.ordered.decode(key, default)?)
    }

    // ---- Objects ----

    fn objects(&self) -> PrefsResult<&ObjectCodec<SharedStore>> {
        self.objects
            .as_ref()
            .ok_or(PrefsError::SerializerNotConfigured)
    }

    pub fn put_object<T>(&self, key: &str, value: &T) -> PrefsResult<()>
    where
        T: Serialize + ?Sized,
    {
        Ok(self.objects()?.put(key, value)?)
    }

    /// Deserialized value at `key`, or `default` if it is absent, blank, or
    /// cannot be read as `T`.
    pub fn get_object_or<T>(&self, key: &str, default: T) -> PrefsResult<T>
    where
        T: DeserializeOwned,
    {
        Ok(self.objects()?.get_or(key, default)?)
    }

    /// Deserialized value at `key`, or `None` if it cannot be read as `T`.
    pub fn get_object<T>(&self, key: &str) -> PrefsResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        Ok(self.objects()?.get(key)?)
    }

    // ---- Housekeeping ----

    /// Remove `key`, including every entry of an ordered set stored there.
    pub fn remove(&self, key: &str) -> PrefsResult<()> {
        Ok(self.ordered.remove(key)?)
    }

    /// Returns `true` if a value or an ordered set is stored at `key`.
    pub fn contains(&self, key: &str) -> PrefsResult<bool> {
        Ok(self.store.contains(key)? || self.store.contains(&length_key(key))?)
    }

    /// Remove every entry.
    pub fn clear(&self) -> PrefsResult<()> {
        Ok(self.store.clear()?)
    }

    /// Start a batch of edits committed together by [`Editor::apply`].
    pub fn edit(&self) -> Editor<'_> {
        Editor::new(self.store.as_ref())
    }
}

impl std::fmt::Debug for Prefs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prefs")
            .field("name", &self.name)
            .field("serializer", &self.serializer_name())
            .finish()
    }
}
