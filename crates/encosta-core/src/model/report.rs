use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The three review states of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Confirmed,
    Cancelled,
}

impl Status {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Validate whether a transition from self to `target` is allowed.
    ///
    /// Valid transitions:
    /// - `pending -> confirmed`
    /// - `pending -> cancelled`
    ///
    /// `confirmed` and `cancelled` are terminal. Who may request a
    /// transition is a separate question, answered by [`crate::lifecycle`].
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] naming both endpoints when the target
    /// repeats the current status or the current status is terminal.
    pub fn can_transition_to(self, target: Self) -> Result<(), InvalidTransition> {
        if self == target {
            return Err(InvalidTransition {
                from: self,
                to: target,
                reason: "re-applying the current status is not allowed",
            });
        }

        let allowed = matches!(
            (self, target),
            (Self::Pending, Self::Confirmed) | (Self::Pending, Self::Cancelled)
        );

        if allowed {
            Ok(())
        } else {
            Err(InvalidTransition {
                from: self,
                to: target,
                reason: "only pending reports accept a review decision",
            })
        }
    }
}

/// Observed soil moisture at the reported location.
///
/// Stored collections written by earlier releases carry the Portuguese form
/// labels; the serde aliases keep those blobs decodable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilMoisture {
    #[serde(alias = "Seco")]
    Dry,
    #[serde(alias = "Úmido")]
    Humid,
    #[serde(alias = "Encharcado")]
    Waterlogged,
}

impl SoilMoisture {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Dry => "dry",
            Self::Humid => "humid",
            Self::Waterlogged => "waterlogged",
        }
    }
}

/// Observed soil slope at the reported location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilSlope {
    #[serde(alias = "Plano")]
    Flat,
    #[serde(alias = "Leve")]
    Mild,
    #[serde(alias = "Íngreme")]
    Steep,
}

impl SoilSlope {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Mild => "mild",
            Self::Steep => "steep",
        }
    }
}

/// One persisted risk observation.
///
/// `location_name` and `region_label` are denormalized from the catalog at
/// creation time so stored records stay readable even if the catalog changes.
/// Only `status` ever changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    pub id: String,
    pub reporter_id: String,
    pub location_id: String,
    pub location_name: String,
    pub region_label: String,
    pub date: String,
    pub time: String,
    pub soil_moisture: SoilMoisture,
    pub soil_slope: SoilSlope,
    pub status: Status,
}

/// Caller-supplied input for creating a report.
///
/// Fields are raw text; the repository validates them in a fixed order and
/// reports the first failure by [`DraftField`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportDraft {
    pub date: String,
    pub time: String,
    pub soil_moisture: String,
    pub soil_slope: String,
    pub location_id: String,
}

/// Draft fields in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Date,
    SoilMoisture,
    SoilSlope,
    Location,
}

impl DraftField {
    /// The field name as it appears in serialized records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::SoilMoisture => "soilMoisture",
            Self::SoilSlope => "soilSlope",
            Self::Location => "locationId",
        }
    }
}

/// Error returned when a state transition is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: Status,
    pub to: Status,
    pub reason: &'static str,
}

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SoilMoisture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SoilSlope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Not `to_ascii_lowercase`: the legacy labels carry accented characters.
fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseEnumError {
                expected: "status",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for SoilMoisture {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        match normalized.as_str() {
            "dry" | "seco" => Ok(Self::Dry),
            "humid" | "úmido" | "umido" => Ok(Self::Humid),
            "waterlogged" | "encharcado" => Ok(Self::Waterlogged),
            _ => Err(ParseEnumError {
                expected: "soil moisture",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for SoilSlope {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        match normalized.as_str() {
            "flat" | "plano" => Ok(Self::Flat),
            "mild" | "leve" => Ok(Self::Mild),
            "steep" | "íngreme" | "ingreme" => Ok(Self::Steep),
            _ => Err(ParseEnumError {
                expected: "soil slope",
                got: s.to_string(),
            }),
        }
    }
}
