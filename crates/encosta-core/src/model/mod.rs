//! Domain records and closed vocabularies.

pub mod location;
pub mod report;
pub mod user;

pub use location::{Catalog, Location};
pub use report::{DraftField, ReportDraft, ReportRecord, SoilMoisture, SoilSlope, Status};
pub use user::{Identity, Role, UserRecord};
