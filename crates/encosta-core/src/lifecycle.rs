//! Review lifecycle rules.
//!
//! The single authority on which status changes are legal and who may
//! request them. Everything else in the crate asks this module instead of
//! re-deriving the rules.

use crate::model::report::Status;
use crate::model::user::Role;

/// Why a requested transition was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    /// The caller's role may not review reports at all.
    RoleNotPermitted { role: Role },
    /// The state machine forbids this edge.
    TransitionNotAllowed { from: Status, to: Status },
}

/// Authorize a requested status change.
///
/// Checks run in a fixed order: the role gate first, so reporters are
/// refused before the record's state is even considered, then the
/// transition table.
///
/// # Errors
///
/// Returns the first applicable [`Refusal`].
pub fn authorize(current: Status, requested: Status, role: Role) -> Result<(), Refusal> {
    if !role.can_review() {
        return Err(Refusal::RoleNotPermitted { role });
    }

    current
        .can_transition_to(requested)
        .map_err(|refused| Refusal::TransitionNotAllowed {
            from: refused.from,
            to: refused.to,
        })
}

/// True when `role` may move a report from `current` to `requested`.
#[must_use]
pub fn is_legal(current: Status, requested: Status, role: Role) -> bool {
    authorize(current, requested, role).is_ok()
}
