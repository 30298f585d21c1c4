use serde_json::Value;

use crate::serializer::{PrefSerializer, SerializerError};

/// [`PrefSerializer`] backed by `simd-json`.
///
/// simd-json parses in place, so every read copies the stored text into a
/// scratch buffer first.
#[derive(Clone, Debug, Default)]
pub struct SimdJsonSerializer {
    pretty: bool,
}

impl SimdJsonSerializer {
    /// Compact single-line output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Indented output.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl PrefSerializer for SimdJsonSerializer {
    fn name(&self) -> &'static str {
        "simd_json"
    }

    fn serialize(&self, value: &Value) -> Result<String, SerializerError> {
        let rendered = if self.pretty {
            simd_json::serde::to_string_pretty(value)
        } else {
            simd_json::serde::to_string(value)
        };
        rendered.map_err(|e| SerializerError::Encode {
            backend: self.name(),
            message: e.to_string(),
        })
    }

    fn deserialize(&self, text: &str) -> Result<Value, SerializerError> {
        let mut scratch = text.as_bytes().to_vec();
        simd_json::serde::from_slice(&mut scratch).map_err(|e| SerializerError::Syntax {
            backend: self.name(),
            message: e.to_string(),
        })
    }
}
