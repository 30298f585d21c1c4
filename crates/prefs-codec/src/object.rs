use std::sync::Arc;

use prefs_store::PreferenceStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{CodecError, CodecResult};
use crate::serializer::{from_text, to_text, PrefSerializer};

/// Stores arbitrary `serde` values as single JSON string entries.
///
/// Reads never fail because of what is stored: absent, blank, or malformed
/// text falls back to the caller's default (or `None`) and is logged at
/// debug level. Store failures are still propagated.
#[derive(Clone)]
pub struct ObjectCodec<S> {
    store: S,
    serializer: Arc<dyn PrefSerializer>,
}

impl<S: PreferenceStore> ObjectCodec<S> {
    /// Bind a store to a serialization backend.
    pub fn new(store: S, serializer: Arc<dyn PrefSerializer>) -> Self {
        Self { store, serializer }
    }

    /// The serialization backend in use.
    pub fn serializer(&self) -> &dyn PrefSerializer {
        self.serializer.as_ref()
    }

    /// The store this codec writes to.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Serialize `value` and write it to `key`, replacing any previous value.
    pub fn put<T>(&self, key: &str, value: &T) -> CodecResult<()>
    where
        T: Serialize + ?Sized,
    {
        let text = to_text(self.serializer(), value).map_err(|source| CodecError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.store.put_string(key, &text)?;
        Ok(())
    }

    /// Read `key` as `T`, or `default` if it is absent, blank, or malformed.
    ///
    /// Blank text short-circuits before the parser runs.
    pub fn get_or<T>(&self, key: &str, default: T) -> CodecResult<T>
    where
        T: DeserializeOwned,
    {
        let text = match self.store.get_string(key)? {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Ok(default),
        };

        match from_text(self.serializer(), &text) {
            Ok(value) => Ok(value),
            Err(e) => {
                debug!(
                    key,
                    backend = self.serializer.name(),
                    error = %e,
                    "error deserializing object, returning default value"
                );
                Ok(default)
            }
        }
    }

    /// Read `key` as `T`, or `None` if it cannot be deserialized.
    ///
    /// An absent or blank entry is handed to the parser as empty text and
    /// fails like any other malformed payload.
    pub fn get<T>(&self, key: &str) -> CodecResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let text = self.store.get_string(key)?.unwrap_or_default();

        match from_text(self.serializer(), &text) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                debug!(
                    key,
                    backend = self.serializer.name(),
                    error = %e,
                    "error deserializing object, returning none"
                );
                Ok(None)
            }
        }
    }
}

impl<S> std::fmt::Debug for ObjectCodec<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectCodec")
            .field("backend", &self.serializer.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::JsonSerializer;
    use crate::serializer::SerializerError;
    use crate::simd::SimdJsonSerializer;
    use crate::testing::FailingStore;
    use prefs_store::{InMemoryPreferenceStore, StoreError};
    use serde::Deserialize;
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct User {
        name: String,
    }

    fn eve() -> User {
        User { name: "Eve".into() }
    }

    fn fallback() -> User {
        User {
            name: "default".into(),
        }
    }

    fn backends() -> Vec<Arc<dyn PrefSerializer>> {
        vec![
            Arc::new(JsonSerializer::new()) as Arc<dyn PrefSerializer>,
            Arc::new(JsonSerializer::pretty()),
            Arc::new(SimdJsonSerializer::new()),
        ]
    }

    /// Wraps a backend and counts parser invocations.
    #[derive(Default)]
    struct CountingSerializer {
        inner: JsonSerializer,
        parses: AtomicUsize,
    }

    impl PrefSerializer for CountingSerializer {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn serialize(&self, value: &Value) -> Result<String, SerializerError> {
            self.inner.serialize(value)
        }

        fn deserialize(&self, text: &str) -> Result<Value, SerializerError> {
            self.parses.fetch_add(1, Ordering::SeqCst);
            self.inner.deserialize(text)
        }
    }

    // -----------------------------------------------------------------------
    // Round trips
    // -----------------------------------------------------------------------

    #[test]
    fn put_then_get_with_every_backend() {
        for serializer in backends() {
            let name = serializer.name();
            let codec = ObjectCodec::new(InMemoryPreferenceStore::new(), serializer);
            codec.put("user", &eve()).unwrap();
            assert_eq!(codec.get::<User>("user").unwrap(), Some(eve()), "{name}");
            assert_eq!(codec.get_or("user", fallback()).unwrap(), eve(), "{name}");
        }
    }

    #[test]
    fn generic_collections_round_trip() {
        let codec = ObjectCodec::new(
            InMemoryPreferenceStore::new(),
            Arc::new(SimdJsonSerializer::new()),
        );
        let users = vec![eve(), fallback()];
        codec.put("users", &users).unwrap();
        assert_eq!(codec.get::<Vec<User>>("users").unwrap(), Some(users));
    }

    #[test]
    fn put_writes_single_string_entry() {
        let codec = ObjectCodec::new(InMemoryPreferenceStore::new(), Arc::new(JsonSerializer::new()));
        codec.put("user", &eve()).unwrap();
        let all = codec.store().all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all.get("user").map(String::as_str), Some(r#"{"name":"Eve"}"#));
    }

    #[test]
    fn put_replaces_previous_value() {
        let codec = ObjectCodec::new(InMemoryPreferenceStore::new(), Arc::new(JsonSerializer::new()));
        codec.put("user", &fallback()).unwrap();
        codec.put("user", &eve()).unwrap();
        assert_eq!(codec.get::<User>("user").unwrap(), Some(eve()));
    }

    #[test]
    fn unencodable_value_is_an_error() {
        let codec = ObjectCodec::new(InMemoryPreferenceStore::new(), Arc::new(JsonSerializer::new()));
        let mut map = std::collections::HashMap::new();
        map.insert((1, 2), "tuple keys are not JSON");
        let err = codec.put("bad", &map).unwrap_err();
        assert!(matches!(err, CodecError::Serialize { ref key, .. } if key == "bad"));
        assert!(!codec.store().contains("bad").unwrap());
    }

    // -----------------------------------------------------------------------
    // Fallbacks
    // -----------------------------------------------------------------------

    #[test]
    fn absent_key_returns_default_without_parsing() {
        let counting = Arc::new(CountingSerializer::default());
        let codec = ObjectCodec::new(InMemoryPreferenceStore::new(), counting.clone());
        assert_eq!(codec.get_or("user", fallback()).unwrap(), fallback());
        assert_eq!(counting.parses.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn blank_entry_returns_default_without_parsing() {
        let counting = Arc::new(CountingSerializer::default());
        let store = InMemoryPreferenceStore::with_entries([("user", ""), ("spaces", "  \t")]);
        let codec = ObjectCodec::new(store, counting.clone());

        assert_eq!(codec.get_or("user", fallback()).unwrap(), fallback());
        assert_eq!(codec.get_or("spaces", fallback()).unwrap(), fallback());
        assert_eq!(counting.parses.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn malformed_payload_falls_back_for_both_variants() {
        for serializer in backends() {
            let store = InMemoryPreferenceStore::with_entries([("user", "{\"name\": ")]);
            let codec = ObjectCodec::new(store, serializer);
            assert_eq!(codec.get_or("user", fallback()).unwrap(), fallback());
            assert_eq!(codec.get::<User>("user").unwrap(), None);
        }
    }

    #[test]
    fn mismatched_type_falls_back() {
        let store = InMemoryPreferenceStore::with_entries([("user", "[1,2,3]")]);
        let codec = ObjectCodec::new(store, Arc::new(JsonSerializer::new()));
        assert_eq!(codec.get_or("user", fallback()).unwrap(), fallback());
        assert_eq!(codec.get::<User>("user").unwrap(), None);
    }

    #[test]
    fn get_without_default_treats_absent_and_blank_as_none() {
        let counting = Arc::new(CountingSerializer::default());
        let store = InMemoryPreferenceStore::with_entries([("blank", "")]);
        let codec = ObjectCodec::new(store, counting.clone());

        assert_eq!(codec.get::<User>("missing").unwrap(), None);
        assert_eq!(codec.get::<User>("blank").unwrap(), None);
        // The no-default variant always consults the parser.
        assert_eq!(counting.parses.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn store_errors_are_not_masked_by_defaults() {
        let codec = ObjectCodec::new(FailingStore, Arc::new(JsonSerializer::new()));
        assert!(matches!(
            codec.put("user", &eve()),
            Err(CodecError::Store(StoreError::Io(_)))
        ));
        assert!(matches!(
            codec.get_or("user", fallback()),
            Err(CodecError::Store(StoreError::Io(_)))
        ));
        assert!(matches!(
            codec.get::<User>("user"),
            Err(CodecError::Store(StoreError::Io(_)))
        ));
    }

    #[test]
    fn debug_names_backend() {
        let codec = ObjectCodec::new(InMemoryPreferenceStore::new(), Arc::new(SimdJsonSerializer::new()));
        assert!(format!("{codec:?}").contains("simd_json"));
    }
}
