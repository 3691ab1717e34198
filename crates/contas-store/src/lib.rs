//! Persisted key-value store
//!
//! Values are kept as serialized JSON text under string keys, one JSON
//! object file per store. Reads fall back to a caller-provided default
//! when a key is missing or its value no longer parses; writes are
//! best-effort and never fail the caller.

pub mod error;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

pub use error::StoreError;

/// Shared backend reference
pub type StoreRef = Arc<dyn StorageBackend>;

// ==================== Backend Trait ====================

/// Raw string storage under named keys
pub trait StorageBackend: Send + Sync {
    /// Get the raw serialized value for a key
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the raw serialized value for a key
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Human-readable location, for logs
    fn describe(&self) -> String;
}

/// In-memory backend, lost on drop
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// JSON file backend
///
/// The file holds a single object mapping keys to serialized text. The
/// whole map is cached in memory and rewritten on every `set`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open a store file, starting empty when it does not exist yet
    ///
    /// An unreadable or corrupt file is logged and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::load_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!(
                    target: "contas::store",
                    "Ignoring unreadable store {}: {}",
                    path.display(),
                    e
                );
                BTreeMap::new()
            }
        };
        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_entries(path: &Path) -> Result<BTreeMap<String, String>, StoreError> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| StoreError::CorruptFile {
            path: path.to_string_lossy().to_string(),
            message: e.to_string(),
        })
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl StorageBackend for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn describe(&self) -> String {
        self.path.to_string_lossy().to_string()
    }
}

// ==================== Typed Access ====================

/// Typed read/write over a backend
#[derive(Clone)]
pub struct Store {
    backend: StoreRef,
}

impl Store {
    pub fn new(backend: StoreRef) -> Self {
        Self { backend }
    }

    /// Store kept only in memory
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Store backed by a JSON file
    pub fn json_file(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(JsonFileStore::open(path)))
    }

    /// Read a value, or `default` when it is missing or unparseable
    pub fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                log::warn!(target: "contas::store", "Read of '{}' failed: {}", key, e);
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                log::warn!(
                    target: "contas::store",
                    "Value under '{}' in {} does not parse, using default: {}",
                    key,
                    self.backend.describe(),
                    e
                );
                default
            }
        }
    }

    /// Overwrite a value; failures are logged and otherwise ignored
    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_write(key, value) {
            log::error!(
                target: "contas::store",
                "Write of '{}' to {} failed: {}",
                key,
                self.backend.describe(),
                e
            );
        }
    }

    /// Overwrite a value, returning the failure to the caller
    pub fn try_write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.backend.set(key, &raw)
    }

    /// Human-readable location of the backend
    pub fn describe(&self) -> String {
        self.backend.describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: String,
        value: u32,
    }

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "contas-store-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir.join("state.json")
    }

    fn remove_temp(path: &Path) {
        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    struct ReadOnlyBackend;

    impl StorageBackend for ReadOnlyBackend {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::IoError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }

        fn describe(&self) -> String {
            "read-only".to_string()
        }
    }

    #[test]
    fn test_read_missing_returns_default() {
        let store = Store::in_memory();
        assert_eq!(store.read("saldo", 0.0_f64), 0.0);
        assert!(store.read::<Vec<Item>>("contas", vec![]).is_empty());
    }

    #[test]
    fn test_write_visible_to_next_read() {
        let store = Store::in_memory();
        let items = vec![Item { id: "1".to_string(), value: 7 }];
        store.write("contas", &items);
        assert_eq!(store.read::<Vec<Item>>("contas", vec![]), items);

        store.write("contas", &Vec::<Item>::new());
        assert!(store.read::<Vec<Item>>("contas", vec![]).is_empty());
    }

    #[test]
    fn test_unparseable_value_returns_default() {
        let backend = Arc::new(MemoryStore::new());
        backend.set("saldo", "not json").unwrap();
        let store = Store::new(backend);
        assert_eq!(store.read("saldo", 42_u32), 42);
    }

    #[test]
    fn test_wrong_shape_returns_default() {
        let store = Store::in_memory();
        store.write("contas", &"a string");
        assert!(store.read::<Vec<Item>>("contas", vec![]).is_empty());
    }

    #[test]
    fn test_json_file_persists_across_instances() {
        let path = temp_path("persist");
        {
            let store = Store::json_file(&path);
            store.write("saldo", &1500_u32);
        }
        let reopened = Store::json_file(&path);
        assert_eq!(reopened.read("saldo", 0_u32), 1500);
        assert!(path.exists());
        remove_temp(&path);
    }

    #[test]
    fn test_json_file_corrupt_starts_empty() {
        let path = temp_path("corrupt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ this is not json").unwrap();

        let store = Store::json_file(&path);
        assert_eq!(store.read("saldo", 5_u32), 5);

        store.write("saldo", &9_u32);
        assert_eq!(Store::json_file(&path).read("saldo", 0_u32), 9);
        remove_temp(&path);
    }

    #[test]
    fn test_file_layout_is_key_to_text() {
        let path = temp_path("layout");
        let store = Store::json_file(&path);
        store.write("saldoInicial", &100_u32);

        let raw = std::fs::read_to_string(&path).unwrap();
        let map: BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(map.get("saldoInicial").map(String::as_str), Some("100"));
        remove_temp(&path);
    }

    #[test]
    fn test_try_write_reports_failure() {
        let store = Store::new(Arc::new(ReadOnlyBackend));
        let err = store.try_write("saldo", &1_u32).unwrap_err();
        assert!(matches!(err, StoreError::IoError(_)));

        // the best-effort write swallows the same failure
        store.write("saldo", &1_u32);
        assert_eq!(store.read("saldo", 0_u32), 0);

        assert!(Store::in_memory().try_write("saldo", &1_u32).is_ok());
    }
}
