use crate::domain::{require_text, DomainResult};

/// Validates the fields a profile is created with
pub fn validate_profile_names(user_id: &str, first_name: &str, last_name: &str) -> DomainResult<()> {
    require_text(user_id, "userID")?;
    require_text(first_name, "first name")?;
    require_text(last_name, "last name")?;
    Ok(())
}

/// Invariants that must hold true for Profile domain:
///
/// 1. user_id is unique across profiles
/// 2. first and last name are never empty
/// 3. description and image are optional
/// 4. reputation is only changed through relative deltas
