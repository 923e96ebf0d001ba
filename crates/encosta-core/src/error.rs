use crate::model::report::{DraftField, Status};
use crate::model::user::Role;
use crate::store::StoreError;
use std::fmt;
use thiserror::Error;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    ReportNotFound,
    InvalidStateTransition,
    ValidationFailed,
    DuplicateUser,
    Unauthenticated,
    Unauthorized,
    CollectionReadFailed,
    CollectionWriteFailed,
    CollectionDecodeFailed,
    LockContention,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::ReportNotFound => "E2001",
            Self::InvalidStateTransition => "E2002",
            Self::ValidationFailed => "E2003",
            Self::DuplicateUser => "E2004",
            Self::Unauthenticated => "E4001",
            Self::Unauthorized => "E4003",
            Self::CollectionReadFailed => "E5001",
            Self::CollectionWriteFailed => "E5002",
            Self::CollectionDecodeFailed => "E5003",
            Self::LockContention => "E5004",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::ReportNotFound => "Report not found",
            Self::InvalidStateTransition => "Invalid status transition",
            Self::ValidationFailed => "Draft validation failed",
            Self::DuplicateUser => "User id already registered",
            Self::Unauthenticated => "No caller identity",
            Self::Unauthorized => "Caller role not permitted",
            Self::CollectionReadFailed => "Collection read failed",
            Self::CollectionWriteFailed => "Collection write failed",
            Self::CollectionDecodeFailed => "Collection decode failed",
            Self::LockContention => "Lock contention",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .encosta/config.toml and retry."),
            Self::ReportNotFound => None,
            Self::InvalidStateTransition => {
                Some("Only pending reports can be confirmed or cancelled.")
            }
            Self::ValidationFailed => Some("Correct the named field and resubmit."),
            Self::DuplicateUser => Some("Pick an unused id; `enc user list` shows existing ones."),
            Self::Unauthenticated => Some("Pass --as <id> or set ENCOSTA_IDENTITY."),
            Self::Unauthorized => Some("Only admin and reviewer identities can review reports."),
            Self::CollectionReadFailed => Some("Check permissions on the .encosta/ directory."),
            Self::CollectionWriteFailed => Some("Check disk space and write permissions."),
            Self::CollectionDecodeFailed => {
                Some("Inspect the JSON file under .encosta/; it has been left untouched.")
            }
            Self::LockContention => Some("Retry after the other enc process releases its lock."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The error type for report and user operations.
///
/// Validation names the first failing draft field; transition refusals carry
/// both endpoints so callers can explain exactly what was attempted. Storage
/// failures pass through unchanged: a collection that fails to decode is an
/// error, never an empty result.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{field} is missing or not an accepted value")]
    Validation { field: DraftField },

    #[error("cannot change report status from {from} to {to}")]
    IllegalTransition { from: Status, to: Status },

    #[error("no report with id {id}")]
    NotFound { id: String },

    #[error("user id {id} is already registered")]
    DuplicateUser { id: String },

    #[error("no caller identity was provided")]
    Unauthenticated,

    #[error("{role} identities may not perform this operation")]
    Unauthorized { role: Role },

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl ReportError {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { .. } => ErrorCode::ValidationFailed,
            Self::IllegalTransition { .. } => ErrorCode::InvalidStateTransition,
            Self::NotFound { .. } => ErrorCode::ReportNotFound,
            Self::DuplicateUser { .. } => ErrorCode::DuplicateUser,
            Self::Unauthenticated => ErrorCode::Unauthenticated,
            Self::Unauthorized { .. } => ErrorCode::Unauthorized,
            Self::Storage(err) => err.code(),
        }
    }

    /// Optional remediation hint for operators and agents.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }
}
