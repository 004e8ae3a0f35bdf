//! Key-value storage backends.
//!
//! The store only needs "get a string by key" and "overwrite a string by
//! key". [`FileStorage`] keeps one JSON file per key on disk,
//! [`MemoryStorage`] keeps everything in a map.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{ProfileError, Result};

/// Durable string storage addressed by key.
pub trait KeyValueStorage {
    /// Stored value, or `None` if nothing was ever written under `key`.
    ///
    /// A value that exists but cannot be read back as text is reported as
    /// [`ProfileError::CorruptValue`].
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

// =============================================================================
// Memory
// =============================================================================

/// In-process storage. Lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// File
// =============================================================================

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Move the file for `key` aside to `<key>.json.bak`, replacing any
    /// older backup. Returns the backup path, or `None` if there was no file.
    pub fn backup(&self, key: &str) -> Result<Option<PathBuf>> {
        let path = self.file_for(key)?;
        let backup = self.dir.join(format!("{key}.json.bak"));

        match std::fs::rename(&path, &backup) {
            Ok(()) => {
                log::info!("Moved {} to {}", path.display(), backup.display());
                Ok(Some(backup))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ProfileError::Storage(format!(
                "Failed to back up {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn file_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key == "." || key == ".." {
            return Err(ProfileError::InvalidInput(format!(
                "Invalid storage key '{}'",
                key
            )));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.file_for(key)?;
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ProfileError::Storage(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| ProfileError::CorruptValue {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.file_for(key)?;

        std::fs::create_dir_all(&self.dir).map_err(|e| {
            ProfileError::Storage(format!(
                "Failed to create {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        std::fs::write(&path, value).map_err(|e| {
            ProfileError::Storage(format!("Failed to write {}: {}", path.display(), e))
        })?;

        log::debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new();
        assert!(storage.is_empty());
        assert_eq!(storage.get("k").unwrap(), None);

        storage.set("k", "one").unwrap();
        storage.set("k", "two").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("two"));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_file_storage_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("profiles");
        let mut storage = FileStorage::new(&dir);

        assert_eq!(storage.get("profile-data").unwrap(), None);

        storage.set("profile-data", "{}").unwrap();
        assert!(dir.join("profile-data.json").exists());
        assert_eq!(storage.get("profile-data").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_file_storage_non_utf8_is_corrupt() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("profile-data.json"), [0xff, 0xfe, b'{']).unwrap();

        let storage = FileStorage::new(tmp.path());
        assert!(matches!(
            storage.get("profile-data"),
            Err(ProfileError::CorruptValue { key, .. }) if key == "profile-data"
        ));
    }

    #[test]
    fn test_file_storage_backup() {
        let tmp = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(tmp.path());
        assert_eq!(storage.backup("profile-data").unwrap(), None);

        storage.set("profile-data", "{broken").unwrap();
        let backup = storage.backup("profile-data").unwrap().unwrap();

        assert_eq!(backup, tmp.path().join("profile-data.json.bak"));
        assert_eq!(std::fs::read_to_string(&backup).unwrap(), "{broken");
        assert_eq!(storage.get("profile-data").unwrap(), None);
    }

    #[test]
    fn test_file_storage_rejects_path_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(tmp.path());

        assert!(matches!(
            storage.set("../escape", "x"),
            Err(ProfileError::InvalidInput(_))
        ));
        assert!(matches!(storage.get(""), Err(ProfileError::InvalidInput(_))));
    }

    #[test]
    fn test_boxed_storage() {
        let mut storage: Box<dyn KeyValueStorage> = Box::new(MemoryStorage::new());
        storage.set("a", "1").unwrap();
        assert_eq!(storage.get("a").unwrap().as_deref(), Some("1"));
    }
}
