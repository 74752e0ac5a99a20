use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A question asked by a user
/// This is the root of the question/answer/comment family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Storage-assigned identifier
    pub id: i64,

    /// External identity of the owner
    #[serde(rename = "userID")]
    pub user_id: String,

    pub title: String,

    pub description: String,

    /// Number of times the question was viewed
    pub view: i64,

    /// Vote balance, may go negative
    pub rating: i64,

    /// Answer accepted by the owner, if any
    #[serde(rename = "correctAnswerID")]
    pub correct_answer_id: Option<i64>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub modified_at: DateTime<Utc>,
}

impl Question {
    pub fn has_correct_answer(&self) -> bool {
        self.correct_answer_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_external_field_names() {
        let now = Utc::now();
        let question = Question {
            id: 1,
            user_id: "1".to_string(),
            title: "title".to_string(),
            description: "description".to_string(),
            view: 0,
            rating: -2,
            correct_answer_id: None,
            created_at: now,
            modified_at: now,
        };

        let json = serde_json::to_value(&question).unwrap();
        assert_eq!(json["userID"], "1");
        assert_eq!(json["rating"], -2);
        assert!(json["correctAnswerID"].is_null());
        assert!(json.get("createdAt").is_some());
        assert!(!question.has_correct_answer());
    }
}
