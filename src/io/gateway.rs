use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::io::recovery::atomic_write;

/// Error type for persistence gateways
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("storage quota exceeded: {needed} bytes needed, {limit} allowed")]
    QuotaExceeded { needed: usize, limit: usize },
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
    #[error("could not access {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

/// A key-value string store the engine reads snapshots from and writes them to
pub trait PersistenceGateway {
    /// Read the value under `key`; `Ok(None)` if nothing is stored
    fn read(&self, key: &str) -> Result<Option<String>, GatewayError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), GatewayError>;
    /// Remove `key`; removing a missing key is not an error
    fn remove(&mut self, key: &str) -> Result<(), GatewayError>;
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// In-memory gateway with an optional total size limit (bytes of keys + values)
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        MemoryGateway::default()
    }

    /// A gateway that refuses writes once the stored total would exceed `limit`
    pub fn with_quota(limit: usize) -> Self {
        MemoryGateway {
            entries: HashMap::new(),
            quota: Some(limit),
        }
    }

    fn used_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl PersistenceGateway for MemoryGateway {
    fn read(&self, key: &str) -> Result<Option<String>, GatewayError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), GatewayError> {
        if let Some(limit) = self.quota {
            let needed = self.used_without(key) + key.len() + value.len();
            if needed > limit {
                return Err(GatewayError::QuotaExceeded { needed, limit });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), GatewayError> {
        self.entries.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// File-backed
// ---------------------------------------------------------------------------

/// One file per key (`<dir>/<key>.json`), written atomically
#[derive(Debug, Clone)]
pub struct FileGateway {
    dir: PathBuf,
}

impl FileGateway {
    /// Use `dir` for storage, creating it if needed
    pub fn open(dir: &Path) -> Result<Self, GatewayError> {
        fs::create_dir_all(dir).map_err(|e| GatewayError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
        Ok(FileGateway {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a key is stored at. Keys are limited to `A-Z a-z 0-9 - _ .` and
    /// may not start with a dot.
    pub fn key_path(&self, key: &str) -> Result<PathBuf, GatewayError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(GatewayError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl PersistenceGateway for FileGateway {
    fn read(&self, key: &str) -> Result<Option<String>, GatewayError> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(GatewayError::Io { path, source: e }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), GatewayError> {
        let path = self.key_path(key)?;
        atomic_write(&path, value.as_bytes()).map_err(|e| GatewayError::Io { path, source: e })
    }

    fn remove(&mut self, key: &str) -> Result<(), GatewayError> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(GatewayError::Io { path, source: e }),
        }
    }
}
