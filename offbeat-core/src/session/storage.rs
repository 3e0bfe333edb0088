//! Durable storage for the session's user record
//!
//! The session is persisted as a single key-value entry. Only the user
//! record is written; the authenticated flag is re-derived on load.

use std::collections::HashMap;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use offbeat_model::User;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::errors::StorageError;

/// Key the session entry is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "app-storage";

const STORAGE_VERSION: u32 = 0;

/// String key-value backend, in the shape of browser local storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-local backend. Clones share the same entries, so a second store
/// built on a clone behaves like a reload.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("[FileStore] No entry at {:?}", path);
                Ok(None)
            }
            Err(err) => Err(StorageError::ReadFailed(err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(StorageError::WriteFailed)?;

        // Write beside the target and rename so readers never see a torn file.
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)
            .map_err(StorageError::WriteFailed)?;
        tmp.write_all(value.as_bytes())
            .map_err(StorageError::WriteFailed)?;
        tmp.persist(self.path_for(key))
            .map_err(|err| StorageError::WriteFailed(err.error))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::WriteFailed(err)),
        }
    }
}

/// Persisted subset of the session.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedState {
    #[serde(default)]
    user: Option<User>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedEnvelope {
    state: PersistedState,
    #[serde(default)]
    version: u32,
}

/// Reads and writes the session entry on a [`KeyValueStore`].
#[derive(Clone)]
pub struct SessionStorage {
    backend: Arc<dyn KeyValueStore>,
    key: String,
}

impl std::fmt::Debug for SessionStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStorage")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl SessionStorage {
    pub fn new(
        backend: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// In-memory storage under the default key.
    pub fn memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), DEFAULT_STORAGE_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the last persisted user record.
    ///
    /// Entries written by an unknown format version are removed and reported
    /// as [`StorageError::UnsupportedVersion`].
    pub fn load_user(&self) -> Result<Option<User>, StorageError> {
        let Some(raw) = self.backend.get(&self.key)? else {
            return Ok(None);
        };

        let envelope: PersistedEnvelope =
            serde_json::from_str(&raw).map_err(StorageError::CorruptedData)?;

        if envelope.version != STORAGE_VERSION {
            if let Err(err) = self.backend.remove(&self.key) {
                tracing::warn!(
                    "[SessionStorage] Failed to clear outdated entry '{}': {}",
                    self.key,
                    err
                );
            }
            return Err(StorageError::UnsupportedVersion(envelope.version));
        }

        Ok(envelope.state.user)
    }

    /// Persist `user`, or an empty record when signed out.
    pub fn save_user(&self, user: Option<&User>) -> Result<(), StorageError> {
        let envelope = PersistedEnvelope {
            state: PersistedState {
                user: user.cloned(),
            },
            version: STORAGE_VERSION,
        };
        let json = serde_json::to_string(&envelope)
            .map_err(StorageError::SerializeFailed)?;
        self.backend.set(&self.key, &json)
    }

    /// Drop the entry entirely.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.backend.remove(&self.key)
    }
}
