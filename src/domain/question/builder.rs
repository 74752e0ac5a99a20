// src/domain/question/builder.rs
//
// Construction of new questions.
//
// Each `with_*` setter checks its own field immediately. `build` only checks
// that every required field was supplied.

use crate::domain::{require_text, DomainError, DomainResult};

/// A validated question that has not been persisted yet.
///
/// Only obtainable through `NewQuestion::new` or `QuestionBuilder::build`,
/// so a value of this type always satisfies the field rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    user_id: String,
    title: String,
    description: String,
}

impl NewQuestion {
    pub fn new(
        user_id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> DomainResult<Self> {
        QuestionBuilder::new()
            .with_user_id(user_id)?
            .with_title(title)?
            .with_description(description)?
            .build()
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuestionBuilder {
    user_id: Option<String>,
    title: Option<String>,
    description: Option<String>,
}

impl QuestionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> DomainResult<Self> {
        let user_id = user_id.into();
        require_text(&user_id, "userID")?;
        self.user_id = Some(user_id);
        Ok(self)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> DomainResult<Self> {
        let title = title.into();
        require_text(&title, "title")?;
        self.title = Some(title);
        Ok(self)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> DomainResult<Self> {
        let description = description.into();
        require_text(&description, "description")?;
        self.description = Some(description);
        Ok(self)
    }

    pub fn build(self) -> DomainResult<NewQuestion> {
        Ok(NewQuestion {
            user_id: self.user_id.ok_or_else(|| missing("userID"))?,
            title: self.title.ok_or_else(|| missing("title"))?,
            description: self.description.ok_or_else(|| missing("description"))?,
        })
    }
}

fn missing(field: &str) -> DomainError {
    DomainError::PreconditionViolation(format!("{} has to be set", field))
}
