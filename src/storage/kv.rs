//! Local key-value stores
//!
//! The ledger and goals are kept as string values under fixed keys, the way a
//! browser keeps them in local storage. Every `set` replaces the whole value
//! for its key.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::FinbotError;

use super::bridge::LoadWarning;

type Entries = BTreeMap<String, String>;

/// A durable map of string keys to string values
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, FinbotError>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), FinbotError>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), FinbotError>;
}

/// Key-value store backed by a single JSON object file
///
/// The whole file is rewritten on every change: the new contents go to a
/// sibling `.tmp` file which is synced and then renamed over the original,
/// so a crash leaves either the old or the new map on disk.
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<Entries>,
}

impl JsonFileStore {
    /// Open the store at `path`
    ///
    /// A missing file is an empty store. An unreadable or corrupt file also
    /// yields an empty store, together with a warning describing what was
    /// discarded.
    pub fn open(path: impl AsRef<Path>) -> (Self, Option<LoadWarning>) {
        let path = path.as_ref().to_path_buf();

        let (entries, warning) = match read_entries(&path) {
            Ok(entries) => (entries, None),
            Err(e) => (
                BTreeMap::new(),
                Some(LoadWarning::new(path.display().to_string(), e.to_string())),
            ),
        };

        (
            Self {
                path,
                entries: RwLock::new(entries),
            },
            warning,
        )
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &Entries) -> Result<(), FinbotError> {
        write_entries(&self.path, entries)
    }
}

/// A missing file reads as an empty map
fn read_entries(path: &Path) -> Result<Entries, FinbotError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
        Err(e) => {
            return Err(FinbotError::Storage(format!(
                "Cannot read {}: {}",
                path.display(),
                e
            )))
        }
    };

    serde_json::from_str(&text)
        .map_err(|e| FinbotError::Storage(format!("Cannot parse {}: {}", path.display(), e)))
}

fn write_entries(path: &Path, entries: &Entries) -> Result<(), FinbotError> {
    let storage_error =
        |what: &str, e: std::io::Error| FinbotError::Storage(format!("{} {}: {}", what, path.display(), e));

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| storage_error("Cannot create directory for", e))?;
    }

    let bytes = serde_json::to_vec_pretty(entries)?;
    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    let written = File::create(&tmp).and_then(|mut file| {
        file.write_all(&bytes)?;
        file.sync_all()
    });
    if let Err(e) = written.and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(storage_error("Cannot write", e));
    }

    Ok(())
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, FinbotError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| FinbotError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), FinbotError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| FinbotError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let previous = entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush(&entries) {
            // Keep memory in line with what is on disk
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(e);
        }

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), FinbotError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| FinbotError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(previous) = entries.remove(key) {
            if let Err(e) = self.flush(&entries) {
                entries.insert(key.to_string(), previous);
                return Err(e);
            }
        }

        Ok(())
    }
}

/// In-memory key-value store, for tests and throwaway sessions
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, FinbotError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| FinbotError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), FinbotError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| FinbotError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), FinbotError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| FinbotError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        entries.remove(key);
        Ok(())
    }
}
