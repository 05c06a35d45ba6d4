//! Raw string key/value stores standing in for browser local/session storage.
//!
//! Writes are not transactional: two writers updating the same key race and
//! the last write wins. Callers read-modify-write whole values.

use dashmap::DashMap;
use sha2::{Digest, Sha256};
use starlight_core::{StarlightError, StarlightResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// String-keyed blob storage.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> StarlightResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StarlightResult<()>;
    fn remove(&self, key: &str) -> StarlightResult<()>;

    /// Whether the backing medium is reachable.
    fn ping(&self) -> StarlightResult<()> {
        Ok(())
    }
}

/// Process-local store backed by DashMap. Used for session scope and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<DashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> StarlightResult<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> StarlightResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StarlightResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One JSON file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: impl AsRef<Path>) -> StarlightResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        info!(dir = %dir.display(), "File store opened");
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(key)))
    }
}

/// Map a key onto a file stem: hex SHA-256 of the full key. Distinct keys
/// get distinct files whatever script or punctuation they carry, and the
/// name length stays fixed for long search queries.
fn file_stem(key: &str) -> String {
    hex::encode(Sha256::digest(key.as_bytes()))
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> StarlightResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StarlightError::Storage(format!("read '{key}': {e}"))),
        }
    }

    fn set(&self, key: &str, value: &str) -> StarlightResult<()> {
        fs::write(self.path_for(key), value)
            .map_err(|e| StarlightError::Storage(format!("write '{key}': {e}")))?;
        debug!(key, bytes = value.len(), "File store write");
        Ok(())
    }

    fn remove(&self, key: &str) -> StarlightResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StarlightError::Storage(format!("remove '{key}': {e}"))),
        }
    }

    fn ping(&self) -> StarlightResult<()> {
        match fs::metadata(&self.dir) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(StarlightError::Storage(format!("{} is not a directory", self.dir.display()))),
            Err(e) => Err(StarlightError::Storage(format!("{}: {e}", self.dir.display()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(store: &dyn KvStore) {
        assert_eq!(store.get("starlight_a").unwrap(), None);
        store.set("starlight_a", "[1]").unwrap();
        store.set("starlight_a", "[2]").unwrap();
        store.set("starlight_b", "{}").unwrap();
        assert_eq!(store.get("starlight_a").unwrap().as_deref(), Some("[2]"));
        assert_eq!(store.get("starlight_b").unwrap().as_deref(), Some("{}"));

        store.remove("starlight_a").unwrap();
        store.remove("starlight_a").unwrap();
        assert_eq!(store.get("starlight_a").unwrap(), None);
        assert!(store.get("starlight_b").unwrap().is_some());
    }

    #[test]
    fn test_memory_store() {
        exercise(&MemoryStore::new());
    }

    #[test]
    fn test_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        exercise(&store);

        // A second handle on the same directory sees the same data
        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get("starlight_b").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_file_store_ping() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        let store = FileStore::open(&data).unwrap();
        assert!(store.ping().is_ok());
        assert!(MemoryStore::new().ping().is_ok());

        fs::remove_dir_all(&data).unwrap();
        assert!(matches!(store.ping(), Err(StarlightError::Storage(_))));
    }

    #[test]
    fn test_file_store_keeps_lookalike_keys_apart() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        // Pairs that differ only in non-ASCII letters or punctuation
        store.set("starlight_search_cache_गाना", "[\"a\"]").unwrap();
        assert_eq!(store.get("starlight_search_cache_खाना").unwrap(), None);

        store.set("starlight_comments_cache_part 1: intro", "[1]").unwrap();
        store.set("starlight_comments_cache_part 1? intro", "[2]").unwrap();
        assert_eq!(store.get("starlight_comments_cache_part 1: intro").unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.get("starlight_comments_cache_part 1? intro").unwrap().as_deref(), Some("[2]"));
    }

    #[test]
    fn test_file_stem_fixed_length() {
        let long = "q".repeat(2_000);
        assert_eq!(file_stem(&long).len(), 64);
        assert_ne!(file_stem("a/b"), file_stem("a_b"));
    }
}
