//! The users collection: registration and lookup.

use super::{decode_collection, encode_collection};
use crate::error::ReportError;
use crate::model::user::UserRecord;
use crate::store::{CollectionKey, RecordStore};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

/// Typed operations over the users collection.
///
/// Same discipline as the reports side: read all, change one thing, write
/// all back under the mutex.
pub struct UserRepository<S> {
    store: Arc<S>,
    write_guard: Mutex<()>,
}

impl<S: RecordStore> UserRepository<S> {
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            write_guard: Mutex::new(()),
        }
    }

    /// All registered users in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Storage`] when the collection cannot be read
    /// or decoded.
    pub fn list(&self) -> Result<Vec<UserRecord>, ReportError> {
        self.load()
    }

    /// Look up one user by id.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Storage`] when the collection cannot be read
    /// or decoded. An unknown id is `Ok(None)`, not an error.
    pub fn find(&self, id: &str) -> Result<Option<UserRecord>, ReportError> {
        Ok(self.load()?.into_iter().find(|user| user.id == id))
    }

    /// Register a user. Ids are unique across the collection.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::DuplicateUser`] when the id is taken, or
    /// [`ReportError::Storage`] on persistence failure.
    pub fn add(&self, record: UserRecord) -> Result<UserRecord, ReportError> {
        let _guard = self
            .write_guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut users = self.load()?;

        if users.iter().any(|user| user.id == record.id) {
            return Err(ReportError::DuplicateUser { id: record.id });
        }

        users.push(record.clone());
        self.persist(&users)?;
        info!(id = %record.id, role = %record.role, "registered user");
        Ok(record)
    }

    fn load(&self) -> Result<Vec<UserRecord>, ReportError> {
        let bytes = self.store.read_collection(CollectionKey::Users)?;
        Ok(decode_collection(CollectionKey::Users, bytes)?)
    }

    fn persist(&self, users: &[UserRecord]) -> Result<(), ReportError> {
        let bytes = encode_collection(CollectionKey::Users, users)?;
        self.store.write_collection(CollectionKey::Users, &bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::UserRepository;
    use crate::error::ReportError;
    use crate::model::user::{Role, UserRecord};
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn repo() -> UserRepository<MemoryStore> {
        UserRepository::new(Arc::new(MemoryStore::new()))
    }

    fn user(id: &str, role: Role) -> UserRecord {
        UserRecord {
            id: id.to_string(),
            name: format!("User {id}"),
            email: format!("{id}@example.com"),
            role,
        }
    }

    #[test]
    fn add_then_list_preserves_order() {
        let repo = repo();
        repo.add(user("a1", Role::Admin)).expect("add admin");
        repo.add(user("p1", Role::Reporter)).expect("add reporter");

        let users = repo.list().expect("list");
        let ids: Vec<&str> = users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ["a1", "p1"]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let repo = repo();
        repo.add(user("p1", Role::Reporter)).expect("first add");

        let err = repo
            .add(user("p1", Role::Admin))
            .expect_err("duplicate must fail");
        assert!(matches!(err, ReportError::DuplicateUser { id } if id == "p1"));

        // The original registration must be unchanged.
        let found = repo.find("p1").expect("find").expect("present");
        assert_eq!(found.role, Role::Reporter);
    }

    #[test]
    fn find_returns_none_for_unknown_ids() {
        let repo = repo();
        assert!(repo.find("ghost").expect("find").is_none());
    }
}
