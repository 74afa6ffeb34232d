//! Durable key-value slots that hold the serialized event collection.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{DaybookError, DaybookResult};

/// A key-value persistence boundary. Values are always read and written whole.
pub trait Slot {
    /// Read the value stored under `key`, `None` if nothing was ever written.
    fn read(&self, key: &str) -> DaybookResult<Option<String>>;

    /// Replace the value stored under `key`.
    fn write(&mut self, key: &str, value: &str) -> DaybookResult<()>;
}

/// Slot backed by a directory, one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileSlot { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Slot for FileSlot {
    fn read(&self, key: &str) -> DaybookResult<Option<String>> {
        let path = self.path_for(key);

        if !path.exists() {
            return Ok(None);
        }

        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn write(&mut self, key: &str, value: &str) -> DaybookResult<()> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.path_for(key);
        let temp = self.dir.join(format!("{}.json.tmp", key));

        std::fs::write(&temp, value)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }
}

/// In-memory slot, optionally capped at a total number of bytes the way
/// browser storage is.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    values: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot that refuses writes once stored values would exceed `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        MemorySlot {
            values: HashMap::new(),
            quota: Some(bytes),
        }
    }

    /// Seed a raw value, bypassing the quota.
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl Slot for MemorySlot {
    fn read(&self, key: &str) -> DaybookResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> DaybookResult<()> {
        if let Some(quota) = self.quota {
            let others: usize = self
                .values
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();

            if others + key.len() + value.len() > quota {
                return Err(DaybookError::Io(std::io::Error::other(format!(
                    "storage quota of {} bytes exceeded",
                    quota
                ))));
            }
        }

        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
