use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::{debug, warn};

use crate::batch::Batch;
use crate::error::{StoreError, StoreResult};
use crate::traits::PreferenceStore;

/// On-disk layout options for [`FilePreferenceStore`].
#[derive(Clone, Debug, Default)]
pub struct FileStoreOptions {
    /// Write indented JSON instead of a single line.
    pub pretty: bool,
}

/// Preference store persisted as one JSON object file.
///
/// On-disk format: a flat JSON object mapping keys to string values:
/// ```text
/// {"tags#LENGTH":"2","tags[0]":"a","tags[1]":"b"}
/// ```
///
/// Every applied batch is written to a temporary file in the same directory
/// and renamed over the target, so a crash mid-write leaves either the old or
/// the new file. The in-memory copy is only replaced once the rename
/// succeeded; a failed write leaves the store unchanged.
pub struct FilePreferenceStore {
    path: PathBuf,
    options: FileStoreOptions,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FilePreferenceStore {
    /// Open (or lazily create) the preferences file at `path`.
    ///
    /// A missing or empty file yields an empty store; the file is created
    /// on the first write.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open_with(path, FileStoreOptions::default())
    }

    /// Open with explicit layout options.
    pub fn open_with(path: impl AsRef<Path>, options: FileStoreOptions) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = load_entries(&path)?;
        debug!(path = %path.display(), entries = entries.len(), "opened preferences file");
        Ok(Self {
            path,
            options,
            entries: RwLock::new(entries),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Discard the in-memory copy and re-read the file from disk.
    pub fn reload(&self) -> StoreResult<()> {
        let fresh = load_entries(&self.path)?;
        let mut map = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        *map = fresh;
        Ok(())
    }

    fn persist(&self, map: &BTreeMap<String, String>) -> StoreResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let contents = if self.options.pretty {
            serde_json::to_string_pretty(map)
        } else {
            serde_json::to_string(map)
        }
        .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;

        debug!(path = %self.path.display(), bytes = contents.len(), "preferences persisted");
        Ok(())
    }
}

fn load_entries(path: &Path) -> StoreResult<BTreeMap<String, String>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    let contents = fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    serde_json::from_str(&contents).map_err(|e| {
        warn!(path = %path.display(), error = %e, "preferences file is not a flat string map");
        StoreError::Corrupt {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    })
}

impl PreferenceStore for FilePreferenceStore {
    fn get_string(&self, key: &str) -> StoreResult<Option<String>> {
        let map = self.entries.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.get(key).cloned())
    }

    fn contains(&self, key: &str) -> StoreResult<bool> {
        let map = self.entries.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.contains_key(key))
    }

    fn all(&self) -> StoreResult<BTreeMap<String, String>> {
        let map = self.entries.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.clone())
    }

    fn apply(&self, batch: Batch) -> StoreResult<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let mut map = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        let mut next = map.clone();
        batch.apply_to(&mut next);
        self.persist(&next)?;
        *map = next;
        Ok(())
    }
}

impl std::fmt::Debug for FilePreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.entries.read().map(|m| m.len()).unwrap_or(0);
        f.debug_struct("FilePreferenceStore")
            .field("path", &self.path)
            .field("entry_count", &count)
            .finish()
    }
}
