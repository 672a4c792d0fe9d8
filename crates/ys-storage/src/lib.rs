use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage quota exceeded writing {key} ({needed} bytes)")]
    QuotaExceeded { key: String, needed: usize },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Durable string-to-string storage, one value per key.
///
/// Writes overwrite the previous value completely. Implementations use
/// interior mutability so a store can be shared by reference.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Map-backed store with an optional byte quota, counted as the sum of key
/// and value lengths across all entries.
#[derive(Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, String>>,
    quota: RwLock<Option<usize>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: RwLock::default(),
            quota: RwLock::new(Some(bytes)),
        }
    }

    pub fn set_quota(&self, bytes: Option<usize>) -> Result<()> {
        let mut guard = self.quota.write().map_err(|_| poisoned())?;
        *guard = bytes;
        Ok(())
    }

    pub fn keys(&self) -> Result<Vec<String>> {
        let guard = self.entries.read().map_err(|_| poisoned())?;
        let mut keys: Vec<String> = guard.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    pub fn used_bytes(&self) -> Result<usize> {
        let guard = self.entries.read().map_err(|_| poisoned())?;
        Ok(guard.iter().map(|(k, v)| k.len() + v.len()).sum())
    }
}

fn poisoned() -> StorageError {
    StorageError::Unavailable("in-memory store lock poisoned".to_owned())
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let guard = self.entries.read().map_err(|_| poisoned())?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let quota = *self.quota.read().map_err(|_| poisoned())?;
        let mut guard = self.entries.write().map_err(|_| poisoned())?;

        if let Some(limit) = quota {
            let others: usize = guard
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = key.len() + value.len();
            let available = limit.saturating_sub(others);
            if needed > available {
                warn!(key, needed, available, "in-memory store quota exceeded");
                return Err(StorageError::QuotaExceeded {
                    key: key.to_owned(),
                    needed,
                });
            }
        }

        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut guard = self.entries.write().map_err(|_| poisoned())?;
        guard.remove(key);
        Ok(())
    }
}

#[cfg(feature = "rocksdb")]
pub use rocks::RocksDbStore;

#[cfg(feature = "rocksdb")]
mod rocks {
    use super::{KeyValueStore, Result, StorageError};
    use rocksdb::{DB, Options};
    use std::path::Path;
    use std::sync::Arc;

    /// On-disk store for running the widgets outside a browser.
    pub struct RocksDbStore {
        db: Arc<DB>,
    }

    impl RocksDbStore {
        pub fn open_default(path: impl AsRef<Path>) -> Result<Self> {
            let mut options = Options::default();
            options.create_if_missing(true);
            let db = DB::open(&options, path).map_err(backend)?;
            Ok(Self { db: Arc::new(db) })
        }
    }

    fn backend(err: rocksdb::Error) -> StorageError {
        StorageError::Backend(err.to_string())
    }

    impl KeyValueStore for RocksDbStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            let value = self.db.get(key.as_bytes()).map_err(backend)?;
            match value {
                Some(raw) => String::from_utf8(raw)
                    .map(Some)
                    .map_err(|err| StorageError::Backend(format!("value at {key} is not UTF-8: {err}"))),
                None => Ok(None),
            }
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.db.put(key.as_bytes(), value.as_bytes()).map_err(backend)
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.db.delete(key.as_bytes()).map_err(backend)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites_previous_value() -> anyhow::Result<()> {
        let store = InMemoryStore::new();
        store.set("messageBoardPosts", "first")?;
        store.set("messageBoardPosts", "second")?;

        assert_eq!(store.get("messageBoardPosts")?.as_deref(), Some("second"));
        assert_eq!(store.keys()?, vec!["messageBoardPosts".to_owned()]);
        Ok(())
    }

    #[test]
    fn missing_key_reads_as_none() -> anyhow::Result<()> {
        let store = InMemoryStore::new();
        assert_eq!(store.get("customIconShortcuts")?, None);
        store.remove("customIconShortcuts")?;
        Ok(())
    }

    #[test]
    fn quota_rejects_oversized_write_and_keeps_old_value() -> anyhow::Result<()> {
        let store = InMemoryStore::with_quota(16);
        store.set("k", "small")?;

        let err = store.set("k", "this value is far too long").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { needed: 27, .. }));
        assert_eq!(store.get("k")?.as_deref(), Some("small"));
        Ok(())
    }

    #[test]
    fn quota_counts_other_entries_but_not_the_replaced_one() -> anyhow::Result<()> {
        let store = InMemoryStore::with_quota(10);
        store.set("a", "1234")?;
        store.set("b", "1234")?;
        store.set("b", "1234")?;
        assert_eq!(store.used_bytes()?, 10);

        assert!(store.set("c", "").is_err());
        store.set_quota(None)?;
        store.set("c", "")?;
        Ok(())
    }

    #[test]
    fn shared_references_see_the_same_entries() -> anyhow::Result<()> {
        let store = Arc::new(InMemoryStore::new());
        let writer = Arc::clone(&store);
        writer.set("darkMode", "true")?;

        let by_ref: &InMemoryStore = &store;
        assert_eq!(KeyValueStore::get(&by_ref, "darkMode")?.as_deref(), Some("true"));
        Ok(())
    }
}
