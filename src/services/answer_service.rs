// src/services/answer_service.rs
//
// Answer orchestration
//
// Correctness state machine per answer: unset <-> correct. Marking is
// idempotent and replaces any other correct answer of the same question;
// the question's link follows the answer in both directions.

use std::sync::Arc;

use crate::domain::{ensure_owner, Answer, NewAnswer, PageRequest, RatingDelta, Subject};
use crate::error::{AppResult, EntityKind};
use crate::repositories::{AnswerRepository, QuestionRepository};

pub struct AnswerService {
    answer_repo: Arc<dyn AnswerRepository>,
    question_repo: Arc<dyn QuestionRepository>,
}

impl AnswerService {
    pub fn new(
        answer_repo: Arc<dyn AnswerRepository>,
        question_repo: Arc<dyn QuestionRepository>,
    ) -> Self {
        Self {
            answer_repo,
            question_repo,
        }
    }

    pub fn find_answer(&self, id: i64) -> AppResult<Answer> {
        self.answer_repo.find_by_id(id)
    }

    pub fn find_answers(&self, limit: u32, offset: u32) -> AppResult<Vec<Answer>> {
        let page = PageRequest::new(limit, offset)?;
        self.answer_repo.list_paginated(page)
    }

    pub fn find_answers_by_question_id(
        &self,
        question_id: i64,
        limit: u32,
        offset: u32,
    ) -> AppResult<Vec<Answer>> {
        let page = PageRequest::new(limit, offset)?;
        self.answer_repo.list_by_question(question_id, page)
    }

    /// Creates an answer; the question must exist
    pub fn create_answer(
        &self,
        user_id: &str,
        question_id: i64,
        description: &str,
    ) -> AppResult<Answer> {
        let answer = NewAnswer::new(user_id, question_id, description)?;
        self.question_repo.find_by_id(answer.question_id())?;
        self.answer_repo.create(&answer)
    }

    pub fn update_description(&self, id: i64, description: &str) -> AppResult<Answer> {
        self.answer_repo.update_description(id, description)
    }

    pub fn increment_rating(&self, id: i64) -> AppResult<i64> {
        self.answer_repo.update_rating(id, RatingDelta::Up.value())
    }

    pub fn decrement_rating(&self, id: i64) -> AppResult<i64> {
        self.answer_repo.update_rating(id, RatingDelta::Down.value())
    }

    /// Both sides are loaded before anything is written, so a missing
    /// question leaves the answer unchanged.
    pub fn set_correct_answer(&self, id: i64) -> AppResult<Answer> {
        let answer = self.answer_repo.find_by_id(id)?;
        let question = self.question_repo.find_by_id(answer.question_id)?;

        let answer = self.answer_repo.mark_correct(answer.id)?;
        if question.correct_answer_id != Some(answer.id) {
            self.question_repo.set_correct_answer(question.id, answer.id)?;
        }

        log::info!("Answer {} is now correct for question {}", answer.id, question.id);
        Ok(answer)
    }

    pub fn unset_correct_answer(&self, id: i64) -> AppResult<Answer> {
        let answer = self.answer_repo.unmark_correct(id)?;
        self.unlink_from_question(&answer)?;
        Ok(answer)
    }

    /// Hard delete; a question accepting this answer loses its link
    pub fn remove_answer(&self, id: i64) -> AppResult<()> {
        let answer = self.answer_repo.find_by_id(id)?;
        self.answer_repo.remove(id)?;
        self.unlink_from_question(&answer)
    }

    pub fn authorize(&self, subject: &Subject, id: i64) -> AppResult<Answer> {
        let answer = self.answer_repo.find_by_id(id)?;
        ensure_owner(subject, &answer.user_id, EntityKind::Answer, Some(id))?;
        Ok(answer)
    }

    pub fn authorize_creation(&self, subject: &Subject, user_id: &str) -> AppResult<()> {
        ensure_owner(subject, user_id, EntityKind::Answer, None)
    }

    /// Clears the question's link if it points at `answer`. A question that
    /// no longer exists has nothing to unlink.
    fn unlink_from_question(&self, answer: &Answer) -> AppResult<()> {
        let question = match self.question_repo.find_by_id(answer.question_id) {
            Ok(question) => question,
            Err(err) if err.as_not_found().is_some() => {
                log::warn!(
                    "Question {} of answer {} no longer exists",
                    answer.question_id,
                    answer.id
                );
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        if question.correct_answer_id == Some(answer.id) {
            self.question_repo.clear_correct_answer(question.id)?;
        }
        Ok(())
    }
}
