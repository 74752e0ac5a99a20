use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An answer to a question
///
/// Correctness is a two-state flag: unset -> correct via `set_correct_answer`,
/// correct -> unset via `unset_correct_answer`. At most one answer per
/// question is correct; the answer service keeps that true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    /// Storage-assigned identifier
    pub id: i64,

    /// External identity of the owner
    #[serde(rename = "userID")]
    pub user_id: String,

    /// Question being answered (REQUIRED)
    #[serde(rename = "questionID")]
    pub question_id: i64,

    pub description: String,

    /// Vote balance, may go negative
    pub rating: i64,

    /// Accepted by the question owner
    pub is_correct: bool,

    pub created_at: DateTime<Utc>,

    pub modified_at: DateTime<Utc>,
}

impl Answer {
    pub fn answers(&self, question_id: i64) -> bool {
        self.question_id == question_id
    }
}
