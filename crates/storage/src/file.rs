use std::collections::BTreeMap;
use std::fs;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use crate::repository::{KeyValueStore, StorageError};

/// Durable key-value store backed by a single JSON object file.
///
/// The whole file is read once on `open` and rewritten on every change. Writes
/// go to a sibling `*.tmp` file first and are renamed over the target, so a
/// crash mid-write leaves the previous contents intact.
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// A file that is not a JSON object of strings is moved aside to
    /// `<path>.corrupt` and the store starts empty.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                set_aside(&path, &err);
                BTreeMap::new()
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn update(
        &self,
        apply: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;
        let mut next = guard.clone();
        apply(&mut next);
        if next == *guard {
            return Ok(());
        }
        write_atomically(&self.path, &next)?;
        *guard = next;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Keep an unreadable file for inspection instead of overwriting it later.
fn set_aside(path: &Path, err: &serde_json::Error) {
    let target = sibling(path, ".corrupt");
    match fs::rename(path, &target) {
        Ok(()) => warn!(
            path = %path.display(),
            moved_to = %target.display(),
            error = %err,
            "store file is not a JSON object of strings; starting empty"
        ),
        Err(rename_err) => warn!(
            path = %path.display(),
            error = %err,
            rename_error = %rename_err,
            "store file is unreadable and could not be moved aside; starting empty"
        ),
    }
}

fn write_atomically(path: &Path, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(entries)
        .map_err(|e| StorageError::Serialization(e.to_string()))?;

    let tmp = sibling(path, ".tmp");

    fs::write(&tmp, body)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
