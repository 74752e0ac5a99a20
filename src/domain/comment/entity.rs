use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a comment is attached to: a question or an answer, never both
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentParent {
    #[serde(rename = "questionID")]
    Question(i64),
    #[serde(rename = "answerID")]
    Answer(i64),
}

impl CommentParent {
    /// Rebuilds the parent from the two nullable storage columns.
    pub fn from_columns(question_id: Option<i64>, answer_id: Option<i64>) -> Option<Self> {
        match (question_id, answer_id) {
            (Some(q), None) => Some(CommentParent::Question(q)),
            (None, Some(a)) => Some(CommentParent::Answer(a)),
            _ => None,
        }
    }

    pub fn question_id(&self) -> Option<i64> {
        match self {
            CommentParent::Question(id) => Some(*id),
            CommentParent::Answer(_) => None,
        }
    }

    pub fn answer_id(&self) -> Option<i64> {
        match self {
            CommentParent::Answer(id) => Some(*id),
            CommentParent::Question(_) => None,
        }
    }
}

/// A comment on a question or an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,

    #[serde(rename = "userID")]
    pub user_id: String,

    /// Parent reference, serialized as `questionID` or `answerID`
    #[serde(flatten)]
    pub parent: CommentParent,

    pub description: String,

    /// Vote balance, may go negative
    pub rating: i64,

    pub created_at: DateTime<Utc>,

    pub modified_at: DateTime<Utc>,
}

impl Comment {
    pub fn question_id(&self) -> Option<i64> {
        self.parent.question_id()
    }

    pub fn answer_id(&self) -> Option<i64> {
        self.parent.answer_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_from_columns() {
        assert_eq!(
            CommentParent::from_columns(Some(3), None),
            Some(CommentParent::Question(3))
        );
        assert_eq!(
            CommentParent::from_columns(None, Some(4)),
            Some(CommentParent::Answer(4))
        );
        assert_eq!(CommentParent::from_columns(Some(3), Some(4)), None);
        assert_eq!(CommentParent::from_columns(None, None), None);
    }

    #[test]
    fn test_parent_is_flattened_in_json() {
        let now = Utc::now();
        let comment = Comment {
            id: 9,
            user_id: "1".to_string(),
            parent: CommentParent::Answer(4),
            description: "nice".to_string(),
            rating: 0,
            created_at: now,
            modified_at: now,
        };

        let json = serde_json::to_value(&comment).unwrap();
        assert_eq!(json["answerID"], 4);
        assert!(json.get("questionID").is_none());
        assert_eq!(comment.answer_id(), Some(4));
        assert_eq!(comment.question_id(), None);
    }
}
