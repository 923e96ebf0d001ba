//! The service facade: identity checks in front of the repositories.
//!
//! Callers hand every operation an optional [`Identity`]. The service
//! decides whether the operation needs one, which roles may run it, and
//! which projection of the data the caller gets back. Repositories below
//! this layer trust their inputs.

use crate::error::ReportError;
use crate::model::location::{Catalog, Location};
use crate::model::report::{ReportDraft, ReportRecord, Status};
use crate::model::user::{Identity, UserRecord};
use crate::repo::{ReportRepository, UserRepository};
use crate::store::RecordStore;
use crate::view;
use std::sync::Arc;

/// One handle over both collections, sharing a single store.
pub struct ReportService<S> {
    reports: ReportRepository<S>,
    users: UserRepository<S>,
}

impl<S: RecordStore> ReportService<S> {
    #[must_use]
    pub fn new(store: S, catalog: Catalog) -> Self {
        let store = Arc::new(store);
        Self {
            reports: ReportRepository::new(Arc::clone(&store), catalog),
            users: UserRepository::new(store),
        }
    }

    /// Submit a new report on behalf of the caller.
    ///
    /// The stored record carries the caller's id as its reporter; drafts
    /// cannot claim another identity.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Unauthenticated`] without a caller,
    /// [`ReportError::Validation`] for a rejected draft field, or
    /// [`ReportError::Storage`] on persistence failure.
    pub fn create_report(
        &self,
        caller: Option<&Identity>,
        draft: ReportDraft,
    ) -> Result<ReportRecord, ReportError> {
        let caller = require_identity(caller)?;
        self.reports.create(&draft, &caller.id)
    }

    /// The reports the caller is allowed to see.
    ///
    /// Reporters get their own submissions; reviewing roles get the whole
    /// collection. Both come back in submission order.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Unauthenticated`] without a caller, or
    /// [`ReportError::Storage`] when the collection cannot be read.
    pub fn list_reports_for_caller(
        &self,
        caller: Option<&Identity>,
    ) -> Result<Vec<ReportRecord>, ReportError> {
        let caller = require_identity(caller)?;
        let reports = self.reports.list_all()?;
        if caller.role.can_review() {
            Ok(view::for_reviewer(&reports))
        } else {
            Ok(view::for_reporter(&reports, &caller.id))
        }
    }

    /// Every report in the collection, for reviewing roles only.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Unauthenticated`] without a caller,
    /// [`ReportError::Unauthorized`] for a reporter, or
    /// [`ReportError::Storage`] when the collection cannot be read.
    pub fn list_all_reports(
        &self,
        caller: Option<&Identity>,
    ) -> Result<Vec<ReportRecord>, ReportError> {
        let caller = require_identity(caller)?;
        if !caller.role.can_review() {
            return Err(ReportError::Unauthorized { role: caller.role });
        }
        self.reports.list_all()
    }

    /// Apply a review decision to one report.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Unauthenticated`] without a caller,
    /// [`ReportError::NotFound`] for an unknown id,
    /// [`ReportError::Unauthorized`] for a role that may not review,
    /// [`ReportError::IllegalTransition`] when the lifecycle refuses the
    /// move, or [`ReportError::Storage`] on persistence failure.
    pub fn transition_report(
        &self,
        caller: Option<&Identity>,
        id: &str,
        requested: Status,
    ) -> Result<ReportRecord, ReportError> {
        let caller = require_identity(caller)?;
        self.reports.update_status(id, requested, caller.role)
    }

    /// The location catalog. Needs no identity: the catalog is reference
    /// data, not report data.
    #[must_use]
    pub fn list_locations(&self) -> &[Location] {
        self.reports.locations()
    }

    /// Register a user. Open so a fresh project can create its first
    /// admin.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::DuplicateUser`] when the id is taken, or
    /// [`ReportError::Storage`] on persistence failure.
    pub fn register_user(&self, record: UserRecord) -> Result<UserRecord, ReportError> {
        self.users.add(record)
    }

    /// Every registered user, for reviewing roles only.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Unauthenticated`] without a caller,
    /// [`ReportError::Unauthorized`] for a reporter, or
    /// [`ReportError::Storage`] when the collection cannot be read.
    pub fn list_users(&self, caller: Option<&Identity>) -> Result<Vec<UserRecord>, ReportError> {
        let caller = require_identity(caller)?;
        if !caller.role.can_review() {
            return Err(ReportError::Unauthorized { role: caller.role });
        }
        self.users.list()
    }

    /// Look up one user by id. Used to resolve a claimed identity before
    /// any gated call, so it takes none itself.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Storage`] when the collection cannot be
    /// read. An unknown id is `Ok(None)`.
    pub fn find_user(&self, id: &str) -> Result<Option<UserRecord>, ReportError> {
        self.users.find(id)
    }
}

fn require_identity(caller: Option<&Identity>) -> Result<&Identity, ReportError> {
    caller.ok_or(ReportError::Unauthenticated)
}

#[cfg(test)]
mod tests {
    use super::ReportService;
    use crate::error::ReportError;
    use crate::model::location::Catalog;
    use crate::model::report::ReportDraft;
    use crate::model::user::{Identity, Role};
    use crate::store::MemoryStore;

    fn service() -> ReportService<MemoryStore> {
        ReportService::new(MemoryStore::new(), Catalog::builtin())
    }

    fn identity(id: &str, role: Role) -> Identity {
        Identity {
            id: id.to_string(),
            role,
        }
    }

    fn draft() -> ReportDraft {
        ReportDraft {
            date: "10/05/2024".to_string(),
            time: "14:30".to_string(),
            soil_moisture: "humid".to_string(),
            soil_slope: "steep".to_string(),
            location_id: "3".to_string(),
        }
    }

    #[test]
    fn every_gated_operation_requires_an_identity() {
        let svc = service();

        assert!(matches!(
            svc.create_report(None, draft()),
            Err(ReportError::Unauthenticated)
        ));
        assert!(matches!(
            svc.list_reports_for_caller(None),
            Err(ReportError::Unauthenticated)
        ));
        assert!(matches!(
            svc.list_all_reports(None),
            Err(ReportError::Unauthenticated)
        ));
        assert!(matches!(
            svc.transition_report(None, "1", crate::model::report::Status::Confirmed),
            Err(ReportError::Unauthenticated)
        ));
        assert!(matches!(
            svc.list_users(None),
            Err(ReportError::Unauthenticated)
        ));
    }

    #[test]
    fn listing_is_scoped_by_role() {
        let svc = service();
        let p1 = identity("p1", Role::Reporter);
        let p2 = identity("p2", Role::Reporter);
        let admin = identity("a1", Role::Admin);

        svc.create_report(Some(&p1), draft()).expect("p1 report");
        svc.create_report(Some(&p2), draft()).expect("p2 report");

        let mine = svc.list_reports_for_caller(Some(&p1)).expect("p1 list");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].reporter_id, "p1");

        let all = svc.list_reports_for_caller(Some(&admin)).expect("admin list");
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn full_listing_refuses_reporters() {
        let svc = service();
        let p1 = identity("p1", Role::Reporter);

        let err = svc.list_all_reports(Some(&p1)).expect_err("must refuse");
        assert!(matches!(err, ReportError::Unauthorized { role: Role::Reporter }));
    }

    #[test]
    fn locations_need_no_identity() {
        let svc = service();
        assert_eq!(svc.list_locations().len(), 5);
    }
}
