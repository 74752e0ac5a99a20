// src/application/error_handling.rs
//
// Error mapping for the transport boundary
//
// ARCHITECTURE:
// - Maps internal errors → caller-facing responses with a status code
// - Client errors keep their message; storage failures are logged and hidden
// - Not-found responses name the aggregate that was missing

use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorKind};

/// Standard error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Missing or malformed argument (400)
    Validation,

    /// Structural construction rule violated (400)
    InvalidState,

    /// Resource not found (404)
    NotFound,

    /// Subject does not own the resource (401)
    Forbidden,

    /// Database/persistence error (500)
    Database,

    /// Other/unknown error (500)
    Internal,
}

impl ErrorType {
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorType::Validation | ErrorType::InvalidState => 400,
            ErrorType::Forbidden => 401,
            ErrorType::NotFound => 404,
            ErrorType::Database | ErrorType::Internal => 500,
        }
    }
}

impl ErrorResponse {
    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error.kind() {
            ErrorKind::PreconditionViolation | ErrorKind::InvalidArgument => Self {
                success: false,
                error_type: ErrorType::Validation,
                message: "Request validation failed".to_string(),
                details: Some(error.to_string()),
            },

            ErrorKind::InvalidState => Self {
                success: false,
                error_type: ErrorType::InvalidState,
                message: "Invalid entity state".to_string(),
                details: Some(error.to_string()),
            },

            ErrorKind::EntityNotFound(kind) => Self {
                success: false,
                error_type: ErrorType::NotFound,
                message: format!("{} not found", kind),
                details: Some(error.to_string()),
            },

            ErrorKind::Forbidden => Self {
                success: false,
                error_type: ErrorType::Forbidden,
                message: "Not allowed to modify this resource".to_string(),
                details: None,
            },

            ErrorKind::StorageFailure => {
                // Log full error for debugging
                log::error!("Storage failure: {:?}", error);

                Self {
                    success: false,
                    error_type: ErrorType::Database,
                    message: "Database operation failed".to_string(),
                    details: Some("Check logs for details".to_string()),
                }
            }

            ErrorKind::Internal => {
                log::error!("Internal error: {:?}", error);

                Self {
                    success: false,
                    error_type: ErrorType::Internal,
                    message: "Internal error".to_string(),
                    details: None,
                }
            }
        }
    }

    pub fn status_code(&self) -> u16 {
        self.error_type.status_code()
    }
}

/// Helper trait to convert Results to a serialized ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, ErrorResponse>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, ErrorResponse> {
        self.map_err(ErrorResponse::from_app_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::error::EntityKind;

    #[test]
    fn test_not_found_error() {
        let error = ErrorResponse::from_app_error(AppError::not_found(EntityKind::Answer, 3));
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert_eq!(error.message, "answer not found");
        assert_eq!(error.details.as_deref(), Some("Could not find answer with id 3"));
        assert_eq!(error.status_code(), 404);
    }

    #[test]
    fn test_client_errors_are_400() {
        let precondition =
            ErrorResponse::from_app_error(DomainError::PreconditionViolation("x".into()).into());
        let state = ErrorResponse::from_app_error(DomainError::InvalidState("y".into()).into());
        let argument = ErrorResponse::from_app_error(AppError::invalid_argument("z"));

        assert_eq!(precondition.status_code(), 400);
        assert_eq!(state.error_type, ErrorType::InvalidState);
        assert_eq!(state.status_code(), 400);
        assert_eq!(argument.error_type, ErrorType::Validation);
    }

    #[test]
    fn test_forbidden_is_401() {
        let error = ErrorResponse::from_app_error(AppError::Forbidden {
            subject: "2".to_string(),
            kind: EntityKind::Question,
            id: Some(1),
        });
        assert_eq!(error.status_code(), 401);
        assert!(error.details.is_none());
    }

    #[test]
    fn test_database_error_hides_details() {
        let error = ErrorResponse::from_app_error(AppError::Database(
            rusqlite::Error::InvalidColumnName("secret_column".to_string()),
        ));
        assert_eq!(error.error_type, ErrorType::Database);
        assert_eq!(error.status_code(), 500);
        assert!(!error.details.unwrap_or_default().contains("secret_column"));
    }

    #[test]
    fn test_serialized_shape() {
        let error = ErrorResponse::from_app_error(AppError::not_found(EntityKind::Profile, 7));
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["error_type"], "not_found");
        assert_eq!(json["message"], "profile not found");
    }

    #[test]
    fn test_to_error_response() {
        let ok: Result<i64, AppError> = Ok(1);
        assert_eq!(ok.to_error_response().unwrap(), 1);

        let err: Result<i64, AppError> = Err(AppError::Config("bad".to_string()));
        assert_eq!(err.to_error_response().unwrap_err().status_code(), 500);
    }
}
