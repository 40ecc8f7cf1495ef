// Preference key-value store
// The file store is a flat JSON object: {"bible.selectedversion": "CEI2008", ...}

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for preference persistence.
#[derive(Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    Io(String),
    /// A value could not be serialized
    Serialize(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(msg) => write!(f, "Preference I/O error: {}", msg),
            StoreError::Serialize(msg) => write!(f, "Preference serialization error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// String key-value storage for user preferences.
///
/// Reads return `None` when a key is absent; callers supply defaults.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// JSON-file-backed store. Every mutation rewrites the file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Default location: `<config dir>/preferences.json`
    pub fn default_path() -> PathBuf {
        crate::config_dir().join("preferences.json")
    }

    pub fn open_default() -> Self {
        Self::open(Self::default_path())
    }

    /// Open a store at `path`.
    ///
    /// A missing file is an empty store. An unreadable or corrupt file is
    /// logged and treated as empty; it is overwritten on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<BTreeMap<String, String>>(&contents) {
                Ok(values) => values,
                Err(e) => {
                    log::warn!("Ignoring corrupt preferences file {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                log::warn!("Cannot read preferences file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| StoreError::Io(format!("Failed to create {}: {}", parent.display(), e)))?;
            }
        }

        let json = serde_json::to_string_pretty(&self.values)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;

        fs::write(&self.path, json)
            .map_err(|e| StoreError::Io(format!("Failed to write {}: {}", self.path.display(), e)))
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}
