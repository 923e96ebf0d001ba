//! Role-scoped projections over the reports collection.
//!
//! Pure functions: they take a slice, return owned rows, and never touch
//! storage. Scoping decisions (who sees what) live here so the service
//! layer reads as policy, not filtering code.

use crate::model::report::ReportRecord;

/// The rows a reporter may see: only their own submissions, in
/// submission order.
#[must_use]
pub fn for_reporter(reports: &[ReportRecord], reporter_id: &str) -> Vec<ReportRecord> {
    reports
        .iter()
        .filter(|report| report.reporter_id == reporter_id)
        .cloned()
        .collect()
}

/// The rows a reviewing role may see: everything, in submission order.
#[must_use]
pub fn for_reviewer(reports: &[ReportRecord]) -> Vec<ReportRecord> {
    reports.to_vec()
}

#[cfg(test)]
mod tests {
    use super::{for_reporter, for_reviewer};
    use crate::model::report::{ReportRecord, SoilMoisture, SoilSlope, Status};

    fn record(id: &str, reporter: &str) -> ReportRecord {
        ReportRecord {
            id: id.to_string(),
            reporter_id: reporter.to_string(),
            location_id: "1".to_string(),
            location_name: "Zona Sul".to_string(),
            region_label: "São Paulo".to_string(),
            date: "10/05/2024".to_string(),
            time: "14:30".to_string(),
            soil_moisture: SoilMoisture::Humid,
            soil_slope: SoilSlope::Steep,
            status: Status::Pending,
        }
    }

    #[test]
    fn reporter_view_is_scoped_to_their_own_rows() {
        let reports = vec![
            record("1", "p1"),
            record("2", "p2"),
            record("3", "p1"),
            record("4", "p3"),
        ];

        let mine = for_reporter(&reports, "p1");
        let ids: Vec<&str> = mine.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[test]
    fn reporter_view_of_a_stranger_is_empty() {
        let reports = vec![record("1", "p1")];
        assert!(for_reporter(&reports, "p9").is_empty());
    }

    #[test]
    fn reviewer_view_keeps_every_row_in_order() {
        let reports = vec![record("1", "p1"), record("2", "p2"), record("3", "p1")];

        let all = for_reviewer(&reports);
        let ids: Vec<&str> = all.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }
}
