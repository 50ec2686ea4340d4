use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use stepwise_core::model::{GuideId, ProgressMap};
use thiserror::Error;

use crate::mapping::{decode_progress, encode_progress, progress_key};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("storage lock poisoned: {0}")]
    Poisoned(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

/// Local string-to-string store, the contract browsers expose as local storage.
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be updated.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Simple in-memory store for testing and ephemeral sessions.
///
/// Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Poisoned` if the lock is poisoned.
    pub fn len(&self) -> Result<usize, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;
        Ok(guard.len())
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

/// Progress persistence on top of any `KeyValueStore`.
///
/// Owns the key scheme and the JSON encoding so callers only deal in
/// `GuideId` and `ProgressMap`.
#[derive(Clone)]
pub struct ProgressRepository {
    store: Arc<dyn KeyValueStore>,
}

impl ProgressRepository {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStore::new()))
    }

    /// Load saved progress for a guide. `Ok(None)` means nothing was saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored value is malformed,
    /// or any backend error from the read.
    pub fn load(&self, guide_id: &GuideId) -> Result<Option<ProgressMap>, StorageError> {
        self.store
            .get(&progress_key(guide_id))?
            .map(|raw| decode_progress(&raw))
            .transpose()
    }

    /// Overwrite saved progress for a guide.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if encoding or the write fails.
    pub fn save(&self, guide_id: &GuideId, progress: &ProgressMap) -> Result<(), StorageError> {
        let encoded = encode_progress(progress)?;
        self.store.set(&progress_key(guide_id), &encoded)
    }

    /// Remove the saved entry for a guide entirely.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be updated.
    pub fn clear(&self, guide_id: &GuideId) -> Result<(), StorageError> {
        self.store.remove(&progress_key(guide_id))
    }
}
