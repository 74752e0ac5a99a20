// src/domain/comment/builder.rs
//
// Comment construction.
//
// Field rules are checked by the setters. The parent rule (exactly one of
// questionID / answerID) spans two fields and is checked by `build`.

use crate::domain::comment::CommentParent;
use crate::domain::{require_id, require_text, DomainError, DomainResult};

/// A validated comment that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    user_id: String,
    parent: CommentParent,
    description: String,
}

impl NewComment {
    pub fn new(
        user_id: impl Into<String>,
        question_id: Option<i64>,
        answer_id: Option<i64>,
        description: impl Into<String>,
    ) -> DomainResult<Self> {
        let mut builder = CommentBuilder::new()
            .with_user_id(user_id)?
            .with_description(description)?;
        if let Some(question_id) = question_id {
            builder = builder.with_question_id(question_id)?;
        }
        if let Some(answer_id) = answer_id {
            builder = builder.with_answer_id(answer_id)?;
        }
        builder.build()
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn parent(&self) -> CommentParent {
        self.parent
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Default)]
pub struct CommentBuilder {
    user_id: Option<String>,
    question_id: Option<i64>,
    answer_id: Option<i64>,
    description: Option<String>,
}

impl CommentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> DomainResult<Self> {
        let user_id = user_id.into();
        require_text(&user_id, "userID")?;
        self.user_id = Some(user_id);
        Ok(self)
    }

    pub fn with_question_id(mut self, question_id: i64) -> DomainResult<Self> {
        self.question_id = Some(require_id(question_id, "questionID")?);
        Ok(self)
    }

    pub fn with_answer_id(mut self, answer_id: i64) -> DomainResult<Self> {
        self.answer_id = Some(require_id(answer_id, "answerID")?);
        Ok(self)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> DomainResult<Self> {
        let description = description.into();
        require_text(&description, "description")?;
        self.description = Some(description);
        Ok(self)
    }

    pub fn build(self) -> DomainResult<NewComment> {
        let parent = match (self.question_id, self.answer_id) {
            (Some(_), Some(_)) => {
                return Err(DomainError::InvalidState(
                    "QuestionID and AnswerID cannot be set at once".to_string(),
                ))
            }
            (None, None) => {
                return Err(DomainError::InvalidState(
                    "QuestionID or AnswerID has to be set".to_string(),
                ))
            }
            (Some(question_id), None) => CommentParent::Question(question_id),
            (None, Some(answer_id)) => CommentParent::Answer(answer_id),
        };

        let user_id = self
            .user_id
            .ok_or_else(|| DomainError::PreconditionViolation("userID has to be set".to_string()))?;
        let description = self.description.ok_or_else(|| {
            DomainError::PreconditionViolation("description has to be set".to_string())
        })?;

        Ok(NewComment {
            user_id,
            parent,
            description,
        })
    }
}
