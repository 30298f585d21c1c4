use serde_json::Value;

use crate::serializer::{PrefSerializer, SerializerError};

/// [`PrefSerializer`] backed by `serde_json`.
#[derive(Clone, Debug, Default)]
pub struct JsonSerializer {
    pretty: bool,
}

impl JsonSerializer {
    /// Compact single-line output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Indented output. Parsing is unaffected.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl PrefSerializer for JsonSerializer {
    fn name(&self) -> &'static str {
        "serde_json"
    }

    fn serialize(&self, value: &Value) -> Result<String, SerializerError> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.map_err(|e| SerializerError::Encode {
            backend: self.name(),
            message: e.to_string(),
        })
    }

    fn deserialize(&self, text: &str) -> Result<Value, SerializerError> {
        serde_json::from_str(text).map_err(|e| SerializerError::Syntax {
            backend: self.name(),
            message: e.to_string(),
        })
    }
}
