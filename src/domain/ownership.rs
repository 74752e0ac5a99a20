// src/domain/ownership.rs
//
// Ownership checks against a verified token subject.
//
// The subject arrives already verified by the transport layer; this module
// only compares it with the stored owner.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, EntityKind};

/// Identity of the caller, as taken from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subject(String);

impl Subject {
    pub fn new(subject: impl Into<String>) -> Self {
        Self(subject.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn owns(&self, user_id: &str) -> bool {
        self.0 == user_id
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fails with `AppError::Forbidden` unless `subject` is `owner_user_id`.
pub fn ensure_owner(
    subject: &Subject,
    owner_user_id: &str,
    kind: EntityKind,
    id: Option<i64>,
) -> AppResult<()> {
    if subject.owns(owner_user_id) {
        return Ok(());
    }
    log::info!(
        "Subject {} is not the owner of {} {:?}",
        subject,
        kind,
        id
    );
    Err(AppError::Forbidden {
        subject: subject.to_string(),
        kind,
        id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_matching_subject_passes() {
        let subject = Subject::new("42");
        assert!(ensure_owner(&subject, "42", EntityKind::Question, Some(1)).is_ok());
    }

    #[test]
    fn test_foreign_subject_is_forbidden() {
        let subject = Subject::new("42");
        let err = ensure_owner(&subject, "7", EntityKind::Answer, Some(3)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_comparison_is_exact() {
        let subject = Subject::new("user-1");
        assert!(!subject.owns("USER-1"));
        assert!(!subject.owns("user-1 "));
    }
}
