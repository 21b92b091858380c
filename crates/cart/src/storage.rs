//! Key-value slot storage backends.
//!
//! A slot is a named string value, the same shape as browser local storage.
//! The cart uses exactly one slot; the backends know nothing about carts.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write as _};
use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// Abstraction over durable string-valued slots.
///
/// Implementations must treat a missing slot as `Ok(None)`, not an error.
pub trait SlotStorage {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the value cannot be stored.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Validate a slot key: non-empty ASCII alphanumerics, `-` and `_` only.
///
/// # Errors
///
/// Returns [`StorageError::InvalidKey`] for anything else.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

// =============================================================================
// In-memory storage
// =============================================================================

/// Slot storage held in memory.
///
/// Optionally enforces a byte quota over all stored keys and values, which
/// is how browser storage fails when it fills up.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Unbounded in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// In-memory storage that rejects writes beyond `bytes` in total.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            slots: HashMap::new(),
            quota: Some(bytes),
        }
    }

    /// Seed a slot without quota checks.
    #[must_use]
    pub fn with_slot(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.slots.insert(key.into(), value.into());
        self
    }

    /// Raw slot content, for inspection.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }

    fn used_excluding(&self, key: &str) -> usize {
        self.slots
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl SlotStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            let available = quota.saturating_sub(self.used_excluding(key));
            let needed = key.len() + value.len();
            if needed > available {
                return Err(StorageError::QuotaExceeded { needed, available });
            }
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// File storage
// =============================================================================

/// Slot storage backed by a directory, one `<key>.json` file per slot.
///
/// Writes go to a uniquely named temporary sibling file which is synced to
/// disk and then renamed over the slot, so a crash mid-write never leaves a
/// half-written cart. Concurrent writers each get their own temporary file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The root directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] if the key is not file-safe.
    pub fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SlotStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        fs::create_dir_all(&self.dir)?;

        let tmp = self
            .dir
            .join(format!(".{key}.{}.tmp", uuid::Uuid::new_v4().simple()));

        let result = write_synced(&tmp, value).and_then(|()| fs::rename(&tmp, &path));
        if let Err(e) = result {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        tracing::trace!(path = %path.display(), bytes = value.len(), "Slot written");
        Ok(())
    }
}

fn write_synced(path: &Path, value: &str) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(value.as_bytes())?;
    file.sync_all()
}
