//! Typed access to the local and session stores.

use crate::kv::{KvStore, MemoryStore};
use crate::namespace::{Key, Scope};
use serde::de::DeserializeOwned;
use serde::Serialize;
use starlight_core::{StarlightError, StarlightResult};
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub struct Storage {
    local: Arc<dyn KvStore>,
    session: Arc<dyn KvStore>,
}

impl Storage {
    pub fn new(local: Arc<dyn KvStore>, session: Arc<dyn KvStore>) -> Self {
        Self { local, session }
    }

    /// Both scopes in memory.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new()))
    }

    fn backend(&self, scope: Scope) -> &dyn KvStore {
        match scope {
            Scope::Local => self.local.as_ref(),
            Scope::Session => self.session.as_ref(),
        }
    }

    /// Both scopes reachable. Says nothing about whether stored values decode.
    pub fn ping(&self) -> StarlightResult<()> {
        self.local.ping()?;
        self.session.ping()
    }

    /// Raw access for callers that manage their own key space.
    pub fn local(&self) -> &dyn KvStore {
        self.local.as_ref()
    }

    /// Read and decode a value. Unparsable data is reported as
    /// [`StarlightError::Corrupt`], never silently dropped here.
    pub fn read<T: DeserializeOwned>(&self, key: &Key<T>) -> StarlightResult<Option<T>> {
        let Some(raw) = self.backend(key.scope()).get(key.name())? else {
            return Ok(None);
        };
        serde_json::from_str(&raw).map(Some).map_err(|e| {
            metrics::counter!("store.corrupt_reads").increment(1);
            StarlightError::Corrupt {
                key: key.name().to_string(),
                reason: e.to_string(),
            }
        })
    }

    pub fn write<T: Serialize>(&self, key: &Key<T>, value: &T) -> StarlightResult<()> {
        let raw = serde_json::to_string(value)?;
        self.backend(key.scope()).set(key.name(), &raw)
    }

    pub fn remove<T>(&self, key: &Key<T>) -> StarlightResult<()> {
        self.backend(key.scope()).remove(key.name())
    }

    /// Read a list namespace, treating a missing or corrupt value as empty.
    /// Corruption is logged; the next write replaces the bad value.
    pub fn read_list<T: DeserializeOwned>(&self, key: &Key<Vec<T>>) -> Vec<T> {
        match self.read(key) {
            Ok(Some(items)) => items,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key = key.name(), error = %e, "Unreadable list, treating as empty");
                Vec::new()
            }
        }
    }

    /// Read-modify-write a list namespace and return the stored result.
    pub fn update_list<T, F>(&self, key: &Key<Vec<T>>, f: F) -> StarlightResult<Vec<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut Vec<T>),
    {
        let mut items = self.read_list(key);
        f(&mut items);
        self.write(key, &items)?;
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::{self, INTRO_SHOWN, WATCH_LATER};

    #[test]
    fn test_scopes_are_separate() {
        let storage = Storage::in_memory();
        storage.write(&INTRO_SHOWN, &true).unwrap();
        assert_eq!(storage.read(&INTRO_SHOWN).unwrap(), Some(true));
        assert_eq!(storage.local().get(INTRO_SHOWN.name()).unwrap(), None);
    }

    #[test]
    fn test_corrupt_value_is_reported_and_list_reads_recover() {
        let storage = Storage::in_memory();
        storage.local().set(WATCH_LATER.name(), "{not json").unwrap();

        let err = storage.read(&WATCH_LATER).unwrap_err();
        assert!(matches!(err, StarlightError::Corrupt { .. }));
        assert!(storage.read_list(&WATCH_LATER).is_empty());
    }

    #[test]
    fn test_update_list_persists() {
        let storage = Storage::in_memory();
        let key = namespace::search_cache("x");
        let out = storage.update_list(&key, |v| v.clear()).unwrap();
        assert!(out.is_empty());
        assert_eq!(storage.local().get(key.name()).unwrap().as_deref(), Some("[]"));
    }
}
