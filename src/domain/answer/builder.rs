// src/domain/answer/builder.rs

use crate::domain::{require_id, require_text, DomainError, DomainResult};

/// A validated answer that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnswer {
    user_id: String,
    question_id: i64,
    description: String,
}

impl NewAnswer {
    pub fn new(
        user_id: impl Into<String>,
        question_id: i64,
        description: impl Into<String>,
    ) -> DomainResult<Self> {
        AnswerBuilder::new()
            .with_user_id(user_id)?
            .with_question_id(question_id)?
            .with_description(description)?
            .build()
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn question_id(&self) -> i64 {
        self.question_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnswerBuilder {
    user_id: Option<String>,
    question_id: Option<i64>,
    description: Option<String>,
}

impl AnswerBuilder {
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

    pub fn with_description(mut self, description: impl Into<String>) -> DomainResult<Self> {
        let description = description.into();
        require_text(&description, "description")?;
        self.description = Some(description);
        Ok(self)
    }

    pub fn build(self) -> DomainResult<NewAnswer> {
        let user_id = self
            .user_id
            .ok_or_else(|| DomainError::PreconditionViolation("userID has to be set".to_string()))?;
        let question_id = self.question_id.ok_or_else(|| {
            DomainError::PreconditionViolation("questionID has to be set".to_string())
        })?;
        let description = self.description.ok_or_else(|| {
            DomainError::PreconditionViolation("description has to be set".to_string())
        })?;

        Ok(NewAnswer {
            user_id,
            question_id,
            description,
        })
    }
}
