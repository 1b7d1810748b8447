use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{error, warn};

/// Persisted key namespace, one entry per concern. `ACCOUNTS` is the durable
/// cross-session source of truth; the remaining entries mirror the active
/// session only.
pub(crate) mod keys {
    pub const PROFILE: &str = "calorieai_profile";
    pub const MEALS: &str = "calorieai_meals";
    pub const NOTES: &str = "calorieai_notes";
    pub const NOTIFICATIONS: &str = "calorieai_notifications";
    pub const LAST_EMAIL: &str = "calorieai_last_email";
    pub const ACCOUNTS: &str = "calorieai_accounts";
}

/// Synchronous key-value backend. All store traffic happens inline from
/// event handlers; there is no concurrent writer.
pub trait KeyValue: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: Value);
    fn remove(&self, key: &str);
}

/// Whole-namespace JSON file. Every mutation is read-entire-map →
/// mutate-in-memory → write-entire-map, so the file on disk is always one
/// complete serialization of the store.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, Value>>,
}

impl FileStore {
    /// Opens (or lazily creates) the store file. A missing or malformed
    /// file degrades to an empty namespace; cold start never fails here.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(map) => map,
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "store file is malformed, starting empty");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Value>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn flush(&self, entries: &HashMap<String, Value>) {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                let _ = std::fs::create_dir_all(parent);
            }
        }
        match serde_json::to_string(entries) {
            Ok(raw) => {
                if let Err(e) = std::fs::write(&self.path, raw) {
                    error!(error = %e, path = %self.path.display(), "store write failed");
                }
            }
            Err(e) => error!(error = %e, "store serialization failed"),
        }
    }
}

impl KeyValue for FileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        let mut entries = self.entries();
        entries.insert(key.to_string(), value);
        self.flush(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries();
        if entries.remove(key).is_some() {
            self.flush(&entries);
        }
    }
}

/// In-process backend for tests and previews.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl KeyValue for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: Value) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
    }
}

/// Typed read/write helpers over a [`KeyValue`] backend. Read failures
/// (malformed stored data) degrade to `None` with a log line; they never
/// reach callers as errors.
#[derive(Clone)]
pub struct PersistentRecord {
    backend: Arc<dyn KeyValue>,
}

impl PersistentRecord {
    pub fn new(backend: Arc<dyn KeyValue>) -> Self {
        Self { backend }
    }

    pub fn file(path: impl AsRef<Path>) -> Self {
        Self::new(Arc::new(FileStore::open(path)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::default()))
    }

    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.backend.get(key)?;
        match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(error = %e, key, "stored value is malformed, treating as absent");
                None
            }
        }
    }

    pub fn write<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(v) => self.backend.set(key, v),
            Err(e) => error!(error = %e, key, "value serialization failed, keeping previous data"),
        }
    }

    pub fn remove(&self, key: &str) {
        self.backend.remove(key);
    }
}
