use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public profile of a user
/// One profile per external identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i64,

    /// External identity (unique)
    #[serde(rename = "userID")]
    pub user_id: String,

    pub first_name: String,

    pub last_name: String,

    pub description: Option<String>,

    /// Raw image bytes
    pub image: Option<Vec<u8>>,

    /// Adjusted by arbitrary deltas, may go negative
    pub reputation: i64,

    pub created_at: DateTime<Utc>,

    pub modified_at: DateTime<Utc>,
}

impl Profile {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
