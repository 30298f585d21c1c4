use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use prefs_codec::{JsonSerializer, PrefSerializer, SimdJsonSerializer};
use serde::{Deserialize, Serialize};

use crate::error::PrefsResult;

/// Which store backend to build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Volatile map, lost on drop.
    Memory,
    /// One JSON file per preferences name.
    #[default]
    File,
}

/// Which JSON backend serves object preferences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SerializerKind {
    /// Object preferences are disabled.
    #[default]
    None,
    /// `serde_json`.
    SerdeJson,
    /// `simd-json`.
    SimdJson,
}

impl SerializerKind {
    /// Instantiate the backend, or `None` for [`SerializerKind::None`].
    pub fn build(self, pretty: bool) -> Option<Arc<dyn PrefSerializer>> {
        match (self, pretty) {
            (Self::None, _) => None,
            (Self::SerdeJson, false) => Some(Arc::new(JsonSerializer::new())),
            (Self::SerdeJson, true) => Some(Arc::new(JsonSerializer::pretty())),
            (Self::SimdJson, false) => Some(Arc::new(SimdJsonSerializer::new())),
            (Self::SimdJson, true) => Some(Arc::new(SimdJsonSerializer::pretty())),
        }
    }
}

/// Declarative preferences configuration, loadable from TOML.
///
/// ```toml
/// app_name = "my_app"
/// use_default_name = true
/// serializer = "serde_json"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefsConfig {
    /// Preferences file name (without extension). Falls back to `app_name`.
    pub name: Option<String>,
    /// Application name; selects the per-user storage directory.
    pub app_name: Option<String>,
    /// Append `_preferences` to the resolved name.
    pub use_default_name: bool,
    /// Directory holding the preferences file. Defaults to the platform's
    /// local config directory.
    pub storage_dir: Option<PathBuf>,
    /// Store backend.
    pub backend: StoreBackend,
    /// Object serializer backend.
    pub serializer: SerializerKind,
    /// Write indented JSON (both the file and serialized objects).
    pub pretty: bool,
}

impl PrefsConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> PrefsResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> PrefsResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
