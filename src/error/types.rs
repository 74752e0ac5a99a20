// src/error/types.rs
use serde::Serialize;
use thiserror::Error;

use crate::domain::DomainError;

/// The four aggregates, used to tell not-found errors apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Question,
    Answer,
    Comment,
    Profile,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Question => write!(f, "question"),
            EntityKind::Answer => write!(f, "answer"),
            EntityKind::Comment => write!(f, "comment"),
            EntityKind::Profile => write!(f, "profile"),
        }
    }
}

/// No row of `kind` exists with `id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Could not find {kind} with id {id}")]
pub struct EntityNotFound {
    pub kind: EntityKind,
    pub id: i64,
}

impl EntityNotFound {
    pub fn new(kind: EntityKind, id: i64) -> Self {
        Self { kind, id }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    NotFound(#[from] EntityNotFound),

    #[error("Subject {subject} may not modify {kind} {id:?}")]
    Forbidden {
        subject: String,
        kind: EntityKind,
        id: Option<i64>,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Flat classification of every failure path, for callers that branch on
/// the outcome rather than on the concrete error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    PreconditionViolation,
    EntityNotFound(EntityKind),
    InvalidState,
    InvalidArgument,
    Forbidden,
    StorageFailure,
    Internal,
}

impl ErrorKind {
    /// Whether the caller, not the system, is at fault.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ErrorKind::StorageFailure | ErrorKind::Internal)
    }
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Domain(DomainError::PreconditionViolation(_)) => {
                ErrorKind::PreconditionViolation
            }
            AppError::Domain(DomainError::InvalidState(_)) => ErrorKind::InvalidState,
            AppError::Domain(DomainError::InvalidArgument(_)) => ErrorKind::InvalidArgument,
            AppError::NotFound(not_found) => ErrorKind::EntityNotFound(not_found.kind),
            AppError::Forbidden { .. } => ErrorKind::Forbidden,
            AppError::Database(_) | AppError::Pool(_) | AppError::Io(_) => {
                ErrorKind::StorageFailure
            }
            AppError::Config(_) => ErrorKind::Internal,
        }
    }

    pub fn not_found(kind: EntityKind, id: i64) -> Self {
        AppError::NotFound(EntityNotFound::new(kind, id))
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        AppError::Domain(DomainError::InvalidArgument(message.into()))
    }

    /// The missing entity, if this is a not-found error.
    pub fn as_not_found(&self) -> Option<&EntityNotFound> {
        match self {
            AppError::NotFound(not_found) => Some(not_found),
            _ => None,
        }
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_kind_and_id() {
        let err = AppError::not_found(EntityKind::Profile, 99);
        assert_eq!(err.to_string(), "Could not find profile with id 99");
        assert_eq!(err.kind(), ErrorKind::EntityNotFound(EntityKind::Profile));
        assert_eq!(err.as_not_found().map(|e| e.id), Some(99));
    }

    #[test]
    fn test_domain_errors_keep_their_kind() {
        let precondition: AppError =
            DomainError::PreconditionViolation("id cannot be null".to_string()).into();
        let state: AppError = DomainError::InvalidState("both parents".to_string()).into();
        let argument = AppError::invalid_argument("rating must be either 1 or -1");

        assert_eq!(precondition.kind(), ErrorKind::PreconditionViolation);
        assert_eq!(state.kind(), ErrorKind::InvalidState);
        assert_eq!(argument.kind(), ErrorKind::InvalidArgument);
        assert!(argument.kind().is_client_error());
    }

    #[test]
    fn test_storage_errors_are_opaque_failures() {
        let err = AppError::Database(rusqlite::Error::InvalidQuery);
        assert_eq!(err.kind(), ErrorKind::StorageFailure);
        assert!(!err.kind().is_client_error());

        let pool = AppError::Pool("timed out".to_string());
        assert_eq!(pool.kind(), ErrorKind::StorageFailure);
    }

    #[test]
    fn test_not_found_kinds_are_distinguishable() {
        let question = AppError::not_found(EntityKind::Question, 1).kind();
        let answer = AppError::not_found(EntityKind::Answer, 1).kind();
        assert_ne!(question, answer);
    }

    #[test]
    fn test_serializes_as_message() {
        let err = AppError::not_found(EntityKind::Comment, 5);
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "\"Could not find comment with id 5\"");
    }
}
