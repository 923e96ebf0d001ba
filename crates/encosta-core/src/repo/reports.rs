//! The reports collection: listing, creation, and review decisions.

use super::{decode_collection, encode_collection};
use crate::error::ReportError;
use crate::lifecycle::{self, Refusal};
use crate::model::location::{Catalog, Location};
use crate::model::report::{
    DraftField, ReportDraft, ReportRecord, SoilMoisture, SoilSlope, Status,
};
use crate::model::user::Role;
use crate::store::{CollectionKey, RecordStore};
use chrono::Utc;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

/// Typed operations over the reports collection.
///
/// Every mutation re-reads the full collection, applies one change, and
/// writes the full collection back. The mutex keeps in-process
/// read-modify-write cycles from interleaving; across processes the last
/// writer wins.
pub struct ReportRepository<S> {
    store: Arc<S>,
    catalog: Catalog,
    write_guard: Mutex<()>,
}

impl<S: RecordStore> ReportRepository<S> {
    #[must_use]
    pub fn new(store: Arc<S>, catalog: Catalog) -> Self {
        Self {
            store,
            catalog,
            write_guard: Mutex::new(()),
        }
    }

    /// The location catalog used to validate and denormalize drafts.
    #[must_use]
    pub fn locations(&self) -> &[Location] {
        self.catalog.as_slice()
    }

    /// All stored reports in insertion order. An absent collection is empty.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Storage`] when the collection cannot be read
    /// or decoded.
    pub fn list_all(&self) -> Result<Vec<ReportRecord>, ReportError> {
        self.load()
    }

    /// Validate a draft and append the resulting record.
    ///
    /// Draft fields are checked in a fixed order (date, soil moisture, soil
    /// slope, location); the first failure is reported and nothing is
    /// persisted. On success the record starts out `pending`, owned by
    /// `reporter_id`, with the location's name and region denormalized in.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Validation`] naming the first failing field,
    /// or [`ReportError::Storage`] on persistence failure.
    pub fn create(
        &self,
        draft: &ReportDraft,
        reporter_id: &str,
    ) -> Result<ReportRecord, ReportError> {
        let (soil_moisture, soil_slope, location) = self.validate(draft)?;

        let _guard = self
            .write_guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut reports = self.load()?;
        let id = allocate_id(Utc::now().timestamp_millis(), &reports);

        let record = ReportRecord {
            id,
            reporter_id: reporter_id.to_string(),
            location_id: location.id.clone(),
            location_name: location.name.clone(),
            region_label: location.region.clone(),
            date: draft.date.trim().to_string(),
            time: draft.time.clone(),
            soil_moisture,
            soil_slope,
            status: Status::Pending,
        };

        reports.push(record.clone());
        self.persist(&reports)?;
        info!(id = %record.id, reporter = reporter_id, "created report");
        Ok(record)
    }

    /// Apply a review decision to one report.
    ///
    /// The record is looked up first, then the lifecycle rules authorize
    /// the change (role gate before state rule). Nothing is persisted on
    /// refusal.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::NotFound`] for an unknown id,
    /// [`ReportError::Unauthorized`] when `role` may not review,
    /// [`ReportError::IllegalTransition`] when the state machine refuses,
    /// or [`ReportError::Storage`] on persistence failure.
    pub fn update_status(
        &self,
        id: &str,
        requested: Status,
        role: Role,
    ) -> Result<ReportRecord, ReportError> {
        let _guard = self
            .write_guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut reports = self.load()?;

        let record = reports
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| ReportError::NotFound { id: id.to_string() })?;

        lifecycle::authorize(record.status, requested, role).map_err(|refusal| match refusal {
            Refusal::RoleNotPermitted { role } => ReportError::Unauthorized { role },
            Refusal::TransitionNotAllowed { from, to } => {
                ReportError::IllegalTransition { from, to }
            }
        })?;

        record.status = requested;
        let updated = record.clone();
        self.persist(&reports)?;
        info!(id = %updated.id, status = %updated.status, "updated report status");
        Ok(updated)
    }

    fn validate(
        &self,
        draft: &ReportDraft,
    ) -> Result<(SoilMoisture, SoilSlope, &Location), ReportError> {
        if draft.date.trim().is_empty() {
            return Err(ReportError::Validation {
                field: DraftField::Date,
            });
        }

        let soil_moisture: SoilMoisture = draft.soil_moisture.parse().map_err(|_| {
            ReportError::Validation {
                field: DraftField::SoilMoisture,
            }
        })?;

        let soil_slope: SoilSlope =
            draft
                .soil_slope
                .parse()
                .map_err(|_| ReportError::Validation {
                    field: DraftField::SoilSlope,
                })?;

        let location =
            self.catalog
                .find(draft.location_id.trim())
                .ok_or(ReportError::Validation {
                    field: DraftField::Location,
                })?;

        Ok((soil_moisture, soil_slope, location))
    }

    fn load(&self) -> Result<Vec<ReportRecord>, ReportError> {
        let bytes = self.store.read_collection(CollectionKey::Reports)?;
        Ok(decode_collection(CollectionKey::Reports, bytes)?)
    }

    fn persist(&self, reports: &[ReportRecord]) -> Result<(), ReportError> {
        let bytes = encode_collection(CollectionKey::Reports, reports)?;
        self.store.write_collection(CollectionKey::Reports, &bytes)?;
        Ok(())
    }
}

/// Allocate a fresh report id.
///
/// Ids are decimal millisecond timestamps; the candidate is bumped by one
/// until it matches no id already in the collection, so creations in the
/// same millisecond stay unique.
fn allocate_id(now_ms: i64, existing: &[ReportRecord]) -> String {
    let mut candidate = now_ms.max(0);
    loop {
        let id = candidate.to_string();
        if !existing.iter().any(|record| record.id == id) {
            return id;
        }
        candidate += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::{ReportRepository, allocate_id};
    use crate::error::ReportError;
    use crate::model::location::Catalog;
    use crate::model::report::{
        DraftField, ReportDraft, ReportRecord, SoilMoisture, SoilSlope, Status,
    };
    use crate::model::user::Role;
    use crate::store::{CollectionKey, MemoryStore, RecordStore, StoreError};
    use std::sync::Arc;

    fn repo() -> (Arc<MemoryStore>, ReportRepository<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let repo = ReportRepository::new(Arc::clone(&store), Catalog::builtin());
        (store, repo)
    }

    fn valid_draft() -> ReportDraft {
        ReportDraft {
            date: "10/05/2024".to_string(),
            time: String::new(),
            soil_moisture: "humid".to_string(),
            soil_slope: "steep".to_string(),
            location_id: "3".to_string(),
        }
    }

    fn make_record(id: &str) -> ReportRecord {
        ReportRecord {
            id: id.to_string(),
            reporter_id: "p1".to_string(),
            location_id: "1".to_string(),
            location_name: "Zona Sul".to_string(),
            region_label: "São Paulo".to_string(),
            date: "01/01/2024".to_string(),
            time: String::new(),
            soil_moisture: SoilMoisture::Dry,
            soil_slope: SoilSlope::Flat,
            status: Status::Pending,
        }
    }

    #[test]
    fn allocate_id_uses_the_clock() {
        assert_eq!(allocate_id(1_714_763_897_000, &[]), "1714763897000");
    }

    #[test]
    fn allocate_id_bumps_past_collisions() {
        let existing = vec![
            make_record("1714763897000"),
            make_record("1714763897001"),
        ];
        assert_eq!(allocate_id(1_714_763_897_000, &existing), "1714763897002");
    }

    #[test]
    fn create_assigns_pending_and_denormalizes_location() {
        let (_store, repo) = repo();
        let record = repo.create(&valid_draft(), "p1").expect("create");

        assert_eq!(record.status, Status::Pending);
        assert_eq!(record.reporter_id, "p1");
        assert_eq!(record.location_id, "3");
        assert_eq!(record.location_name, "Zona Oeste");
        assert_eq!(record.region_label, "São Paulo");
        assert_eq!(record.soil_moisture, SoilMoisture::Humid);
        assert_eq!(record.soil_slope, SoilSlope::Steep);

        let listed = repo.list_all().expect("list");
        assert_eq!(listed, vec![record]);
    }

    #[test]
    fn create_accepts_legacy_form_labels() {
        let (_store, repo) = repo();
        let draft = ReportDraft {
            soil_moisture: "Úmido".to_string(),
            soil_slope: "Íngreme".to_string(),
            ..valid_draft()
        };

        let record = repo.create(&draft, "p1").expect("create");
        assert_eq!(record.soil_moisture, SoilMoisture::Humid);
        assert_eq!(record.soil_slope, SoilSlope::Steep);
    }

    #[test]
    fn validation_reports_the_first_failing_field() {
        let (_store, repo) = repo();

        let empty = ReportDraft::default();
        assert!(matches!(
            repo.create(&empty, "p1"),
            Err(ReportError::Validation {
                field: DraftField::Date
            })
        ));

        let bad_moisture = ReportDraft {
            date: "10/05/2024".to_string(),
            soil_moisture: "damp".to_string(),
            soil_slope: "also-bad".to_string(),
            ..ReportDraft::default()
        };
        assert!(matches!(
            repo.create(&bad_moisture, "p1"),
            Err(ReportError::Validation {
                field: DraftField::SoilMoisture
            })
        ));

        let bad_slope = ReportDraft {
            soil_slope: "vertical".to_string(),
            ..valid_draft()
        };
        assert!(matches!(
            repo.create(&bad_slope, "p1"),
            Err(ReportError::Validation {
                field: DraftField::SoilSlope
            })
        ));

        let bad_location = ReportDraft {
            location_id: "99".to_string(),
            ..valid_draft()
        };
        assert!(matches!(
            repo.create(&bad_location, "p1"),
            Err(ReportError::Validation {
                field: DraftField::Location
            })
        ));
    }

    #[test]
    fn failed_validation_persists_nothing() {
        let (store, repo) = repo();
        let bad = ReportDraft {
            location_id: "99".to_string(),
            ..valid_draft()
        };

        let _ = repo.create(&bad, "p1");
        assert!(
            store
                .read_collection(CollectionKey::Reports)
                .expect("read")
                .is_none()
        );
    }

    #[test]
    fn update_status_walks_the_lifecycle() {
        let (_store, repo) = repo();
        let record = repo.create(&valid_draft(), "p1").expect("create");

        let updated = repo
            .update_status(&record.id, Status::Confirmed, Role::Reviewer)
            .expect("confirm");
        assert_eq!(updated.status, Status::Confirmed);

        let err = repo
            .update_status(&record.id, Status::Confirmed, Role::Admin)
            .expect_err("second confirm must fail");
        assert!(matches!(
            err,
            ReportError::IllegalTransition {
                from: Status::Confirmed,
                to: Status::Confirmed
            }
        ));
    }

    #[test]
    fn update_status_refuses_reporters() {
        let (_store, repo) = repo();
        let record = repo.create(&valid_draft(), "p1").expect("create");

        let err = repo
            .update_status(&record.id, Status::Cancelled, Role::Reporter)
            .expect_err("reporter must be refused");
        assert!(matches!(
            err,
            ReportError::Unauthorized {
                role: Role::Reporter
            }
        ));

        // The refusal must not have touched the record.
        let listed = repo.list_all().expect("list");
        assert_eq!(listed[0].status, Status::Pending);
    }

    #[test]
    fn update_status_reports_unknown_ids() {
        let (_store, repo) = repo();
        let err = repo
            .update_status("999", Status::Confirmed, Role::Admin)
            .expect_err("missing id");
        assert!(matches!(err, ReportError::NotFound { id } if id == "999"));
    }

    #[test]
    fn corrupt_collection_surfaces_and_is_left_untouched() {
        let (store, repo) = repo();
        store.inject(CollectionKey::Reports, b"{not an array".to_vec());

        let err = repo.list_all().expect_err("list must fail");
        assert!(matches!(
            err,
            ReportError::Storage(StoreError::Decode { .. })
        ));

        let err = repo.create(&valid_draft(), "p1").expect_err("create must fail");
        assert!(matches!(err, ReportError::Storage(_)));

        // The corrupt bytes must still be there, not truncated or replaced.
        let bytes = store
            .read_collection(CollectionKey::Reports)
            .expect("read")
            .expect("still present");
        assert_eq!(bytes, b"{not an array");
    }
}
