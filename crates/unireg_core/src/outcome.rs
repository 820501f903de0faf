//! Result codes for registry operations.

use crate::entity::EntityKind;
use std::fmt;

/// What a registry operation did.
///
/// Missing and duplicate records are ordinary outcomes, not errors. Callers
/// that only care whether state changed can use [`Outcome::is_applied`] or
/// convert to `bool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    /// State changed.
    Applied,
    /// The request was valid but there was nothing to change.
    Unchanged,
    /// A record with the same ID already exists.
    AlreadyExists(EntityKind),
    /// A referenced record does not exist.
    NotFound(EntityKind),
    /// The student is not enrolled in the course.
    NotEnrolled,
    /// The grade lies outside the accepted range.
    OutOfRange,
}

impl Outcome {
    /// Returns true if state changed.
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

impl From<Outcome> for bool {
    fn from(outcome: Outcome) -> bool {
        outcome.is_applied()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied => f.write_str("done"),
            Self::Unchanged => f.write_str("nothing to change"),
            Self::AlreadyExists(kind) => write!(f, "{kind} ID already exists"),
            Self::NotFound(kind) => write!(f, "{kind} not found"),
            Self::NotEnrolled => f.write_str("student is not enrolled in that course"),
            Self::OutOfRange => f.write_str("grade must be between 0.0 and 4.0"),
        }
    }
}
