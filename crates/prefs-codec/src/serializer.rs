//! The serialization capability behind object preferences.
//!
//! A [`PrefSerializer`] turns a JSON document into text and back. Typed
//! values cross the boundary through [`to_text`] and [`from_text`], which
//! pin the Rust type at the call site: the store itself carries no schema,
//! so the caller's type parameter is the only type descriptor there is.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Errors raised by a serialization backend.
#[derive(Debug, thiserror::Error)]
pub enum SerializerError {
    /// The text is not well-formed JSON for this backend.
    #[error("{backend}: malformed JSON: {message}")]
    Syntax {
        backend: &'static str,
        message: String,
    },

    /// The JSON is well-formed but does not describe the requested type.
    #[error("JSON does not match {type_name}: {message}")]
    TypeMismatch {
        type_name: &'static str,
        message: String,
    },

    /// The value cannot be represented as JSON.
    #[error("{backend}: cannot encode value: {message}")]
    Encode {
        backend: &'static str,
        message: String,
    },
}

/// A JSON serialization backend.
///
/// Implementations must parse back whatever they produce. Text written by
/// one backend is not guaranteed to be readable by another.
pub trait PrefSerializer: Send + Sync {
    /// Short backend name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Render a JSON document as text.
    fn serialize(&self, value: &Value) -> Result<String, SerializerError>;

    /// Parse text into a JSON document.
    fn deserialize(&self, text: &str) -> Result<Value, SerializerError>;
}

/// Serialize `value` as `T` through `serializer`.
pub fn to_text<T>(serializer: &dyn PrefSerializer, value: &T) -> Result<String, SerializerError>
where
    T: Serialize + ?Sized,
{
    let document = serde_json::to_value(value).map_err(|e| SerializerError::Encode {
        backend: serializer.name(),
        message: e.to_string(),
    })?;
    serializer.serialize(&document)
}

/// Deserialize `text` as `T` through `serializer`.
pub fn from_text<T>(serializer: &dyn PrefSerializer, text: &str) -> Result<T, SerializerError>
where
    T: DeserializeOwned,
{
    let document = serializer.deserialize(text)?;
    serde_json::from_value(document).map_err(|e| SerializerError::TypeMismatch {
        type_name: std::any::type_name::<T>(),
        message: e.to_string(),
    })
}
