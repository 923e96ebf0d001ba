//! File-backed store: one JSON file per collection under `.encosta/`.

use super::{CollectionKey, RecordStore, StoreError};
use crate::lock::CollectionLock;
use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::debug;

/// Default bound on waiting for another process's write lock.
const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_millis(500);

/// Production store. Each collection is one JSON file under
/// `<root>/.encosta/`, replaced by writing a sibling temp file and renaming
/// it over the target while an exclusive advisory lock is held. Readers see
/// either the old contents or the new, never a partial write.
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
    lock_timeout: Duration,
}

impl FileStore {
    /// Directory under the project root holding collection files.
    pub const DATA_DIR: &'static str = ".encosta";

    /// Store rooted at `project_root`.
    #[must_use]
    pub fn open(project_root: &Path) -> Self {
        Self {
            data_dir: project_root.join(Self::DATA_DIR),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    /// Override the advisory-lock timeout. Tests use short timeouts.
    #[must_use]
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// The `.encosta/` directory this store reads and writes.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn collection_path(&self, key: CollectionKey) -> PathBuf {
        self.data_dir.join(key.file_name())
    }

    fn lock_path(&self, key: CollectionKey) -> PathBuf {
        self.data_dir.join(key.lock_name())
    }
}

impl RecordStore for FileStore {
    fn read_collection(&self, key: CollectionKey) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.collection_path(key);
        match fs::read(&path) {
            Ok(bytes) => {
                debug!(key = %key, bytes = bytes.len(), "read collection");
                Ok(Some(bytes))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read { path, source }),
        }
    }

    fn write_collection(&self, key: CollectionKey, bytes: &[u8]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir).map_err(|source| StoreError::Write {
            path: self.data_dir.clone(),
            source,
        })?;

        let _guard = CollectionLock::acquire(&self.lock_path(key), self.lock_timeout)?;

        let path = self.collection_path(key);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, bytes).map_err(|source| StoreError::Write {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &path).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })?;

        debug!(key = %key, bytes = bytes.len(), "wrote collection");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{CollectionKey, FileStore, RecordStore};
    use crate::lock::CollectionLock;
    use crate::store::StoreError;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn absent_collection_reads_none() {
        let dir = TempDir::new().expect("temp dir");
        let store = FileStore::open(dir.path());

        let bytes = store
            .read_collection(CollectionKey::Reports)
            .expect("read should succeed");
        assert!(bytes.is_none());
        // Reading must not create the data directory as a side effect.
        assert!(!dir.path().join(FileStore::DATA_DIR).exists());
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = TempDir::new().expect("temp dir");
        let store = FileStore::open(dir.path());

        store
            .write_collection(CollectionKey::Reports, b"[1,2,3]")
            .expect("write should succeed");
        let bytes = store
            .read_collection(CollectionKey::Reports)
            .expect("read should succeed");
        assert_eq!(bytes.as_deref(), Some(b"[1,2,3]".as_slice()));
    }

    #[test]
    fn write_replaces_previous_contents() {
        let dir = TempDir::new().expect("temp dir");
        let store = FileStore::open(dir.path());

        store
            .write_collection(CollectionKey::Users, b"[\"old\"]")
            .expect("first write");
        store
            .write_collection(CollectionKey::Users, b"[\"new\"]")
            .expect("second write");

        let bytes = store
            .read_collection(CollectionKey::Users)
            .expect("read should succeed");
        assert_eq!(bytes.as_deref(), Some(b"[\"new\"]".as_slice()));
    }

    #[test]
    fn write_leaves_no_temp_file() {
        let dir = TempDir::new().expect("temp dir");
        let store = FileStore::open(dir.path());

        store
            .write_collection(CollectionKey::Reports, b"[]")
            .expect("write should succeed");

        let leftovers: Vec<_> = std::fs::read_dir(store.data_dir())
            .expect("data dir readable")
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
    }

    #[test]
    fn keys_are_stored_independently() {
        let dir = TempDir::new().expect("temp dir");
        let store = FileStore::open(dir.path());

        store
            .write_collection(CollectionKey::Reports, b"[\"report\"]")
            .expect("write reports");
        assert!(
            store
                .read_collection(CollectionKey::Users)
                .expect("read users")
                .is_none()
        );
    }

    #[test]
    fn held_lock_times_out_the_writer() {
        let dir = TempDir::new().expect("temp dir");
        let store =
            FileStore::open(dir.path()).with_lock_timeout(Duration::from_millis(20));

        let lock_path = store.data_dir().join(CollectionKey::Reports.lock_name());
        let _held =
            CollectionLock::acquire(&lock_path, Duration::from_millis(50)).expect("hold lock");

        let err = store
            .write_collection(CollectionKey::Reports, b"[]")
            .expect_err("write should time out");
        assert!(matches!(err, StoreError::Lock(_)));
    }
}
