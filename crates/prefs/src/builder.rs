use std::path::PathBuf;
use std::sync::Arc;

use prefs_codec::PrefSerializer;
use prefs_store::{
    FilePreferenceStore, FileStoreOptions, InMemoryPreferenceStore, PreferenceStore,
};
use tracing::info;

use crate::config::{PrefsConfig, StoreBackend};
use crate::error::{PrefsError, PrefsResult};
use crate::prefs::Prefs;

/// Suffix appended by [`PrefsBuilder::use_default_name`].
pub const DEFAULT_SUFFIX: &str = "_preferences";

/// Builds a [`Prefs`] instance. Usually done once at startup.
///
/// # Example
/// ```ignore
/// let prefs = PrefsBuilder::new()
///     .app_name("my_app")
///     .use_default_name(true)
///     .serializer(JsonSerializer::new())
///     .build()?;
/// ```
#[derive(Default)]
pub struct PrefsBuilder {
    name: Option<String>,
    app_name: Option<String>,
    use_default_name: bool,
    storage_dir: Option<PathBuf>,
    backend: StoreBackend,
    pretty: bool,
    store: Option<Arc<dyn PreferenceStore>>,
    serializer: Option<Arc<dyn PrefSerializer>>,
}

impl PrefsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a declarative configuration.
    pub fn from_config(config: &PrefsConfig) -> Self {
        Self {
            name: config.name.clone(),
            app_name: config.app_name.clone(),
            use_default_name: config.use_default_name,
            storage_dir: config.storage_dir.clone(),
            backend: config.backend,
            pretty: config.pretty,
            store: None,
            serializer: config.serializer.build(config.pretty),
        }
    }

    /// Name of the preferences file (without extension).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Application name. Used as the file name when no name is set, and to
    /// locate the default storage directory.
    pub fn app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Append `_preferences` to the resolved name.
    pub fn use_default_name(mut self, use_default: bool) -> Self {
        self.use_default_name = use_default;
        self
    }

    /// Directory holding the preferences file.
    pub fn storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self
    }

    /// Keep preferences in memory only.
    pub fn in_memory(mut self) -> Self {
        self.backend = StoreBackend::Memory;
        self
    }

    /// Write the preferences file as indented JSON.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Use a caller-supplied store. Overrides the backend selection.
    pub fn store(mut self, store: impl PreferenceStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Serialization backend for object preferences.
    pub fn serializer(mut self, serializer: impl PrefSerializer + 'static) -> Self {
        self.serializer = Some(Arc::new(serializer));
        self
    }

    /// Shared serialization backend for object preferences.
    pub fn shared_serializer(mut self, serializer: Arc<dyn PrefSerializer>) -> Self {
        self.serializer = Some(serializer);
        self
    }

    /// Build the [`Prefs`] instance.
    ///
    /// Fails with [`PrefsError::Config`] when a file store is requested but
    /// neither a name nor an app name is set.
    pub fn build(self) -> PrefsResult<Prefs> {
        let name = self.resolve_name();

        let store: Arc<dyn PreferenceStore> = match (self.store, self.backend) {
            (Some(store), _) => store,
            (None, StoreBackend::Memory) => Arc::new(InMemoryPreferenceStore::new()),
            (None, StoreBackend::File) => {
                let name = name.clone().ok_or_else(|| {
                    PrefsError::Config(
                        "set a name or app name before building a file-backed store".into(),
                    )
                })?;
                let dir = match self.storage_dir {
                    Some(dir) => dir,
                    None => default_storage_dir(self.app_name.as_deref().unwrap_or(&name)),
                };
                let path = dir.join(format!("{name}.json"));
                info!(path = %path.display(), "opening preferences");
                Arc::new(FilePreferenceStore::open_with(
                    path,
                    FileStoreOptions {
                        pretty: self.pretty,
                    },
                )?)
            }
        };

        Ok(Prefs::new(
            name.unwrap_or_else(|| "memory".to_string()),
            store,
            self.serializer,
        ))
    }

    fn resolve_name(&self) -> Option<String> {
        let base = [self.name.as_deref(), self.app_name.as_deref()]
            .into_iter()
            .flatten()
            .find(|n| !n.trim().is_empty())?;
        if self.use_default_name {
            Some(format!("{base}{DEFAULT_SUFFIX}"))
        } else {
            Some(base.to_string())
        }
    }
}

/// Per-user directory for `app_name`'s preferences.
pub fn default_storage_dir(app_name: &str) -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.config_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
        .join(app_name)
        .join("prefs")
}
