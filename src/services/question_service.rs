// src/services/question_service.rs
//
// Question orchestration
//
// Correct-answer policy: a question has at most one correct answer. Setting a
// new one clears the previous answer's flag (done by the answer repository in
// the same transaction as the new flag) and overwrites the question's link.

use std::sync::Arc;

use crate::domain::{ensure_owner, NewQuestion, PageRequest, Question, RatingDelta, Subject};
use crate::error::{AppError, AppResult, EntityKind};
use crate::repositories::{AnswerRepository, QuestionRepository};

pub struct QuestionService {
    question_repo: Arc<dyn QuestionRepository>,
    answer_repo: Arc<dyn AnswerRepository>,
}

impl QuestionService {
    pub fn new(
        question_repo: Arc<dyn QuestionRepository>,
        answer_repo: Arc<dyn AnswerRepository>,
    ) -> Self {
        Self {
            question_repo,
            answer_repo,
        }
    }

    pub fn find_question(&self, id: i64) -> AppResult<Question> {
        self.question_repo.find_by_id(id)
    }

    pub fn find_questions(&self, limit: u32, offset: u32) -> AppResult<Vec<Question>> {
        let page = PageRequest::new(limit, offset)?;
        self.question_repo.list_paginated(page)
    }

    pub fn create_question(
        &self,
        user_id: &str,
        title: &str,
        description: &str,
    ) -> AppResult<Question> {
        let question = NewQuestion::new(user_id, title, description)?;
        self.question_repo.create(&question)
    }

    pub fn update_title(&self, id: i64, title: &str) -> AppResult<Question> {
        self.question_repo.update_title(id, title)
    }

    pub fn update_description(&self, id: i64, description: &str) -> AppResult<Question> {
        self.question_repo.update_description(id, description)
    }

    /// Returns the new view count
    pub fn increment_view(&self, id: i64) -> AppResult<i64> {
        self.question_repo.increment_view(id)
    }

    pub fn upvote_rating(&self, id: i64) -> AppResult<i64> {
        self.question_repo.update_rating(id, RatingDelta::Up.value())
    }

    pub fn downvote_rating(&self, id: i64) -> AppResult<i64> {
        self.question_repo.update_rating(id, RatingDelta::Down.value())
    }

    /// Links `answer_id` as the accepted answer of `question_id`.
    ///
    /// Fails with a question not-found or an answer not-found depending on
    /// which side is missing, and with an invalid argument when the answer
    /// belongs to another question. Repeating the call is a no-op.
    pub fn set_correct_answer(&self, question_id: i64, answer_id: i64) -> AppResult<i64> {
        let question = self.question_repo.find_by_id(question_id)?;
        let answer = self.answer_repo.find_by_id(answer_id)?;

        if !answer.answers(question.id) {
            log::info!(
                "Answer {} belongs to question {}, not {}",
                answer.id,
                answer.question_id,
                question.id
            );
            return Err(AppError::invalid_argument(format!(
                "answer {} does not belong to question {}",
                answer.id, question.id
            )));
        }

        self.answer_repo.mark_correct(answer.id)?;
        if question.correct_answer_id != Some(answer.id) {
            if question.has_correct_answer() {
                log::info!(
                    "Question {} replaces accepted answer {:?}",
                    question.id,
                    question.correct_answer_id
                );
            }
            self.question_repo.set_correct_answer(question.id, answer.id)?;
        }

        log::info!("Question {} accepted answer {}", question.id, answer.id);
        Ok(answer.id)
    }

    /// Number of questions owned by `user_id`; zero when there are none
    pub fn get_count(&self, user_id: &str) -> AppResult<i64> {
        self.question_repo.count_by_user(user_id)
    }

    /// Hard delete; the question's answers and every comment under it go too
    pub fn remove_question(&self, id: i64) -> AppResult<()> {
        self.question_repo.remove(id)
    }

    /// Loads the question and checks that `subject` owns it
    pub fn authorize(&self, subject: &Subject, id: i64) -> AppResult<Question> {
        let question = self.question_repo.find_by_id(id)?;
        ensure_owner(subject, &question.user_id, EntityKind::Question, Some(id))?;
        Ok(question)
    }

    /// Checks that `subject` may create a question on behalf of `user_id`
    pub fn authorize_creation(&self, subject: &Subject, user_id: &str) -> AppResult<()> {
        ensure_owner(subject, user_id, EntityKind::Question, None)
    }
}
