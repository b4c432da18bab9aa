//! Key-value persistence port with automatic serialization.

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Raw key-value storage, the client's equivalent of browser local storage.
pub trait KeyValueStore: Send + Sync {
    /// Get the bytes stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store bytes under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key)?.is_some())
    }

    /// All stored keys.
    fn keys(&self) -> Result<Vec<String>, CacheError>;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Process-local store. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        lock(&self.entries).insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        lock(&self.entries).remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(lock(&self.entries).keys().cloned().collect())
    }
}

/// Store persisted as a single JSON object of string values.
///
/// Every operation re-reads the file, so separate processes sharing a path see each
/// other's writes. There is no cross-process locking; the last writer wins.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileStore {
    /// Open a store at `path`. The file is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();
        if path.is_dir() {
            return Err(CacheError::OpenError(format!(
                "{} is a directory",
                path.display()
            )));
        }
        Ok(Self {
            path,
            guard: Mutex::new(()),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, CacheError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let _guard = lock(&self.guard);
        Ok(self.read_all()?.remove(key).map(String::into_bytes))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let value = std::str::from_utf8(value)
            .map_err(|_| CacheError::InvalidString(key.to_string()))?
            .to_string();
        let _guard = lock(&self.guard);
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value);
        self.write_all(&entries)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let _guard = lock(&self.guard);
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let _guard = lock(&self.guard);
        Ok(self.read_all()?.into_keys().collect())
    }
}

/// Type-safe handle over a [`KeyValueStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Cloning shares the underlying store.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

impl Cache {
    /// Wrap an existing store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// A fresh in-memory store.
    pub fn memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// A file-backed store.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open_file("/home/me/.local/share/storefront/storage.json")?;
    /// ```
    pub fn open_file(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        Ok(Self::new(Arc::new(FileStore::open(path)?)))
    }

    /// Get a JSON value.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let user: Option<AuthUser> = cache.get("user")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a JSON value.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }

    /// Get a bare string value (stored without JSON quoting).
    pub fn get_string(&self, key: &str) -> Result<Option<String>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| CacheError::InvalidString(key.to_string())),
            None => Ok(None),
        }
    }

    /// Set a bare string value.
    pub fn set_string(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.store.set(key, value.as_bytes())
    }

    /// Delete a value.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Get all keys.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: String,
        quantity: u32,
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "storefront-cache-{}-{}.json",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_memory_json_round_trip() {
        let cache = Cache::memory();
        let items = vec![Item {
            id: "a".into(),
            quantity: 2,
        }];

        cache.set("cartItems", &items).unwrap();
        let back: Vec<Item> = cache.get("cartItems").unwrap().unwrap();
        assert_eq!(back, items);
    }

    #[test]
    fn test_missing_key() {
        let cache = Cache::memory();
        assert!(cache.get::<Item>("nope").unwrap().is_none());
        assert!(!cache.exists("nope").unwrap());
        cache.delete("nope").unwrap();
    }

    #[test]
    fn test_bare_strings() {
        let cache = Cache::memory();
        cache.set_string("token", "abc.def").unwrap();
        assert_eq!(cache.get_string("token").unwrap().as_deref(), Some("abc.def"));
    }

    #[test]
    fn test_corrupt_json_is_an_error() {
        let cache = Cache::memory();
        cache.set_string("user", "{not json").unwrap();
        assert!(matches!(
            cache.get::<Item>("user"),
            Err(CacheError::SerializeError(_))
        ));
    }

    #[test]
    fn test_clones_share_store() {
        let a = Cache::memory();
        let b = a.clone();
        a.set_string("k", "v").unwrap();
        assert!(b.exists("k").unwrap());
    }

    #[test]
    fn test_file_store_persists_across_handles() {
        let path = temp_path("persist");
        let _ = std::fs::remove_file(&path);

        let first = Cache::open_file(&path).unwrap();
        first.set_string("token", "t1").unwrap();
        first.set("count", &3u32).unwrap();

        let second = Cache::open_file(&path).unwrap();
        assert_eq!(second.get_string("token").unwrap().as_deref(), Some("t1"));
        assert_eq!(second.get::<u32>("count").unwrap(), Some(3));

        second.delete("token").unwrap();
        assert!(!first.exists("token").unwrap());
        assert_eq!(first.keys().unwrap(), vec!["count".to_string()]);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let path = temp_path("missing");
        let _ = std::fs::remove_file(&path);
        let cache = Cache::open_file(&path).unwrap();
        assert!(cache.keys().unwrap().is_empty());
    }
}
