//! Durable locale storage
//!
//! This module defines the key-value store the locale preference is
//! persisted to, with in-memory, JSON file and Redis implementations.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use redis::Commands;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use crate::config::{StorageBackend, StorageConfig};
use crate::utils::errors::{LocaleError, Result};

/// Connect, read and write timeout for the Redis backend. Locale reads
/// happen on the UI path, so an unreachable or silent server must fail fast.
const REDIS_TIMEOUT: Duration = Duration::from_millis(500);

/// A small string key-value store that survives restarts
pub trait LocaleStorage: Send + Sync {
    /// Read a value, `None` when the key was never written
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

/// Build the storage backend selected in the configuration
pub fn storage_from_config(config: &StorageConfig) -> Result<Arc<dyn LocaleStorage>> {
    let storage: Arc<dyn LocaleStorage> = match config.backend {
        StorageBackend::Memory => Arc::new(MemoryStorage::new()),
        StorageBackend::File => Arc::new(FileStorage::new(&config.file_path)),
        StorageBackend::Redis => Arc::new(RedisStorage::new(&config.redis_url, &config.prefix)?),
    };
    debug!(backend = ?config.backend, "Locale storage created");
    Ok(storage)
}

/// Process-local storage, mainly for tests and non-persistent sessions
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
    unavailable: AtomicBool,
}

impl MemoryStorage {
    /// Create an empty, available store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose every operation fails, as when no durable
    /// storage exists in the current environment
    pub fn unavailable() -> Self {
        let storage = Self::default();
        storage.set_available(false);
        storage
    }

    /// Toggle availability at runtime
    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(LocaleError::StorageUnavailable(
                "memory storage is disabled".to_string()
            ));
        }
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.items
            .lock()
            .map_err(|_| LocaleError::StorageUnavailable("memory storage lock poisoned".to_string()))
    }
}

impl LocaleStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.check_available()?;
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.check_available()?;
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage backed by a JSON object file, one entry per key
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Create a file store. Nothing touches the disk until first use.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Option<Map<String, Value>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => Ok(Some(map)),
            _ => Err(LocaleError::StorageUnavailable(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }
}

impl LocaleStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let Some(map) = self.read_map()? else {
            return Ok(None);
        };

        Ok(match map.get(key) {
            Some(Value::String(value)) => Some(value.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        })
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| LocaleError::StorageUnavailable("file storage lock poisoned".to_string()))?;

        let mut map = match self.read_map() {
            Ok(map) => map.unwrap_or_default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Discarding unreadable storage file");
                Map::new()
            }
        };
        map.insert(key.to_string(), Value::String(value.to_string()));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(&map)?)?;

        debug!(path = %self.path.display(), key = key, "Storage file written");
        Ok(())
    }
}

/// Storage backed by Redis string keys under a namespace prefix
pub struct RedisStorage {
    client: redis::Client,
    prefix: String,
}

impl RedisStorage {
    /// Create a Redis store. The URL is validated here; the connection is
    /// opened per operation.
    pub fn new(url: &str, prefix: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        Ok(Self {
            client,
            prefix: prefix.to_string(),
        })
    }

    /// Full Redis key for a storage key
    pub fn redis_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    fn connection(&self) -> Result<redis::Connection> {
        let conn = self
            .client
            .get_connection_with_timeout(REDIS_TIMEOUT)
            .map_err(|e| LocaleError::StorageUnavailable(format!("redis connection failed: {}", e)))?;
        conn.set_read_timeout(Some(REDIS_TIMEOUT))?;
        conn.set_write_timeout(Some(REDIS_TIMEOUT))?;
        Ok(conn)
    }
}

impl LocaleStorage for RedisStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection()?;
        let value: Option<String> = conn.get(self.redis_key(key))?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.connection()?;
        conn.set::<_, _, ()>(self.redis_key(key), value)?;
        Ok(())
    }
}

impl std::fmt::Debug for RedisStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStorage")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("fx-trading-locale").unwrap(), None);

        storage.set_item("fx-trading-locale", "en").unwrap();
        assert_eq!(storage.get_item("fx-trading-locale").unwrap(), Some("en".to_string()));
    }

    #[test]
    fn test_memory_storage_unavailable() {
        let storage = MemoryStorage::unavailable();
        assert_matches!(storage.get_item("k"), Err(LocaleError::StorageUnavailable(_)));
        assert_matches!(storage.set_item("k", "v"), Err(LocaleError::StorageUnavailable(_)));

        storage.set_available(true);
        assert!(storage.set_item("k", "v").is_ok());
    }

    #[test]
    fn test_file_storage_roundtrip_and_preserves_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("locale.json");
        let storage = FileStorage::new(&path);

        assert_eq!(storage.get_item("fx-trading-locale").unwrap(), None);

        storage.set_item("other", "value").unwrap();
        storage.set_item("fx-trading-locale", "en").unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get_item("fx-trading-locale").unwrap(), Some("en".to_string()));
        assert_eq!(reopened.get_item("other").unwrap(), Some("value".to_string()));
    }

    #[test]
    fn test_file_storage_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locale.json");
        std::fs::write(&path, "not json").unwrap();

        let storage = FileStorage::new(&path);
        assert!(storage.get_item("fx-trading-locale").is_err());

        // A write replaces the unreadable file
        storage.set_item("fx-trading-locale", "ja").unwrap();
        assert_eq!(storage.get_item("fx-trading-locale").unwrap(), Some("ja".to_string()));
    }

    #[test]
    fn test_redis_key_uses_prefix() {
        let storage = RedisStorage::new("redis://127.0.0.1:6379", "fxsync:").unwrap();
        assert_eq!(storage.redis_key("fx-trading-locale"), "fxsync:fx-trading-locale");
    }

    #[test]
    fn test_redis_rejects_invalid_url() {
        assert!(RedisStorage::new("not a url", "fxsync:").is_err());
    }

    /// Accepts connections and never writes a reply
    fn silent_server() -> std::net::SocketAddr {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let mut held = Vec::new();
            for stream in listener.incoming().flatten() {
                held.push(stream);
            }
        });
        addr
    }

    #[test]
    fn test_redis_silent_server_times_out() {
        let addr = silent_server();
        let storage = RedisStorage::new(&format!("redis://{}", addr), "fxsync:").unwrap();

        let started = std::time::Instant::now();
        assert!(storage.get_item("fx-trading-locale").is_err());
        assert!(storage.set_item("fx-trading-locale", "en").is_err());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_storage_from_config() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            ..StorageConfig::default()
        };
        let storage = storage_from_config(&config).unwrap();
        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), Some("v".to_string()));
    }
}
