use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// What a caller is allowed to do.
///
/// The `doctor` and `patient` aliases keep user collections written by
/// earlier releases decodable; they map onto reviewer and reporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[serde(alias = "doctor")]
    Reviewer,
    #[serde(alias = "patient")]
    Reporter,
}

impl Role {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Reviewer => "reviewer",
            Self::Reporter => "reporter",
        }
    }

    /// True for the roles allowed to confirm or cancel reports.
    #[must_use]
    pub const fn can_review(self) -> bool {
        matches!(self, Self::Admin | Self::Reviewer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = crate::model::report::ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "reviewer" | "doctor" => Ok(Self::Reviewer),
            "reporter" | "patient" => Ok(Self::Reporter),
            _ => Err(crate::model::report::ParseEnumError {
                expected: "role",
                got: s.to_string(),
            }),
        }
    }
}

/// One registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// The caller on whose behalf an operation runs.
///
/// Produced outside the core (the CLI resolves it from flags, environment,
/// and the user registry) and consumed as opaque input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub role: Role,
}
