//! Durable key-value slots.
//!
//! The event store only needs to read and overwrite one named value, so the
//! storage behind it is kept to that: a string per key.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{AgendaError, AgendaResult};

/// A named, durable string slot.
pub trait KeyValueStore {
    /// Read the value stored under `key`, or None if nothing was ever saved.
    fn load(&self, key: &str) -> AgendaResult<Option<String>>;

    /// Overwrite the value stored under `key`.
    fn save(&mut self, key: &str, value: &str) -> AgendaResult<()>;
}

/// Slots stored as `<dir>/<key>.json` files.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> AgendaResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            && !key.starts_with('.');

        if !valid {
            return Err(AgendaError::Storage(format!("Invalid storage key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> AgendaResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AgendaError::Storage(format!(
                "Could not read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Writes to a sibling temp file and renames it over the slot, so a
    /// crash mid-write never leaves a truncated slot behind.
    fn save(&mut self, key: &str, value: &str) -> AgendaResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            AgendaError::Storage(format!("Could not create {}: {}", self.dir.display(), e))
        })?;

        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        std::fs::write(&tmp, value)
            .and_then(|_| std::fs::rename(&tmp, &path))
            .map_err(|e| AgendaError::Storage(format!("Could not write {}: {}", path.display(), e)))
    }
}

/// In-memory slots.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> AgendaResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> AgendaResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn load(&self, key: &str) -> AgendaResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> AgendaResult<()> {
        (**self).save(key, value)
    }
}
