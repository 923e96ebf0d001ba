//! Keyed byte-blob storage for record collections.
//!
//! Two named collections, read and replaced whole. Absence of a collection
//! reads as `None` and is treated as empty by callers; a collection that
//! exists but fails to decode is an error, surfaced by the repositories and
//! never downgraded to an empty result.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::ErrorCode;
use crate::lock::LockError;
use std::{fmt, io, path::PathBuf};
use thiserror::Error;

/// The two durable collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    Reports,
    Users,
}

impl CollectionKey {
    pub const ALL: [Self; 2] = [Self::Reports, Self::Users];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reports => "reports",
            Self::Users => "users",
        }
    }

    /// File the collection lives in, relative to the data directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Reports => "reports.json",
            Self::Users => "users.json",
        }
    }

    /// Advisory lock file guarding writes to this collection.
    #[must_use]
    pub const fn lock_name(self) -> &'static str {
        match self {
            Self::Reports => "reports.lock",
            Self::Users => "users.lock",
        }
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode the {key} collection")]
    Decode {
        key: CollectionKey,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode the {key} collection")]
    Encode {
        key: CollectionKey,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Lock(#[from] LockError),
}

impl StoreError {
    /// Machine-readable code associated with this storage error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Read { .. } => ErrorCode::CollectionReadFailed,
            Self::Write { .. } => ErrorCode::CollectionWriteFailed,
            Self::Decode { .. } | Self::Encode { .. } => ErrorCode::CollectionDecodeFailed,
            Self::Lock(err) => err.code(),
        }
    }

    /// Optional remediation hint for operators and agents.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }
}

/// Durable keyed storage for record collections.
///
/// Implementations provide whole-collection reads and atomic
/// whole-collection replacement; record-level semantics are layered on top
/// by the repositories.
pub trait RecordStore {
    /// Read the raw bytes of a collection.
    ///
    /// `None` means the collection has never been written; callers treat
    /// that as empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on I/O failure. Absence of the collection is
    /// not an error.
    fn read_collection(&self, key: CollectionKey) -> Result<Option<Vec<u8>>, StoreError>;

    /// Atomically replace the full contents of a collection.
    ///
    /// After a successful return the bytes are durable; after a failure the
    /// previous contents are still intact.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on I/O failure or lock contention.
    fn write_collection(&self, key: CollectionKey, bytes: &[u8]) -> Result<(), StoreError>;
}
