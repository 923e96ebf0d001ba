//! In-memory store for tests and embedding callers.

use super::{CollectionKey, RecordStore, StoreError};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Volatile store with the same contract as [`FileStore`](super::FileStore):
/// collections are absent until first written and replaced whole.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<CollectionKey, Vec<u8>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop a collection, as if it had never been written.
    pub fn clear(&self, key: CollectionKey) {
        self.guard().remove(&key);
    }

    /// Overwrite a collection with raw bytes, bypassing encode.
    ///
    /// Lets tests plant payloads that fail to decode.
    pub fn inject(&self, key: CollectionKey, bytes: Vec<u8>) {
        self.guard().insert(key, bytes);
    }

    fn guard(&self) -> MutexGuard<'_, HashMap<CollectionKey, Vec<u8>>> {
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl RecordStore for MemoryStore {
    fn read_collection(&self, key: CollectionKey) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.guard().get(&key).cloned())
    }

    fn write_collection(&self, key: CollectionKey, bytes: &[u8]) -> Result<(), StoreError> {
        self.guard().insert(key, bytes.to_vec());
        Ok(())
    }
}
