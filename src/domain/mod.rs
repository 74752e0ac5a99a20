// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod answer;
pub mod comment;
pub mod ownership;
pub mod pagination;
pub mod profile;
pub mod question;
pub mod rating;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Question Domain
pub use question::{NewQuestion, Question, QuestionBuilder};

// Answer Domain
pub use answer::{Answer, AnswerBuilder, NewAnswer};

// Comment Domain
pub use comment::{Comment, CommentBuilder, CommentParent, NewComment};

// Profile Domain
pub use profile::{validate_profile_names, Profile};

// Value objects
pub use ownership::{ensure_owner, Subject};
pub use pagination::{PageRequest, MAX_PAGE_LIMIT};
pub use rating::RatingDelta;

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of construction rules and argument contracts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A required argument is missing, empty or out of its legal range.
    #[error("Precondition violation: {0}")]
    PreconditionViolation(String),

    /// A multi-field construction rule does not hold.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The argument is present but its value is not accepted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

/// Rejects ids that storage could never have assigned.
pub fn require_id(id: i64, what: &str) -> DomainResult<i64> {
    if id <= 0 {
        return Err(DomainError::PreconditionViolation(format!(
            "{} must be a positive id, got {}",
            what, id
        )));
    }
    Ok(id)
}

/// Rejects blank text for a named field.
pub fn require_text(value: &str, field: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::PreconditionViolation(format!(
            "{} cannot be empty",
            field
        )));
    }
    Ok(())
}
