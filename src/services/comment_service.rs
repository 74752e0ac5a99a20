// src/services/comment_service.rs
//
// Comment orchestration

use std::sync::Arc;

use crate::domain::{
    ensure_owner, Comment, CommentParent, NewComment, PageRequest, RatingDelta, Subject,
};
use crate::error::{AppResult, EntityKind};
use crate::repositories::{AnswerRepository, CommentRepository, QuestionRepository};

pub struct CommentService {
    comment_repo: Arc<dyn CommentRepository>,
    question_repo: Arc<dyn QuestionRepository>,
    answer_repo: Arc<dyn AnswerRepository>,
}

impl CommentService {
    pub fn new(
        comment_repo: Arc<dyn CommentRepository>,
        question_repo: Arc<dyn QuestionRepository>,
        answer_repo: Arc<dyn AnswerRepository>,
    ) -> Self {
        Self {
            comment_repo,
            question_repo,
            answer_repo,
        }
    }

    pub fn find_comment(&self, id: i64) -> AppResult<Comment> {
        self.comment_repo.find_by_id(id)
    }

    pub fn find_comments(&self, limit: u32, offset: u32) -> AppResult<Vec<Comment>> {
        let page = PageRequest::new(limit, offset)?;
        self.comment_repo.list_paginated(page)
    }

    pub fn find_comments_by_question_id(
        &self,
        question_id: i64,
        limit: u32,
        offset: u32,
    ) -> AppResult<Vec<Comment>> {
        let page = PageRequest::new(limit, offset)?;
        self.comment_repo.list_by_question(question_id, page)
    }

    pub fn find_comments_by_answer_id(
        &self,
        answer_id: i64,
        limit: u32,
        offset: u32,
    ) -> AppResult<Vec<Comment>> {
        let page = PageRequest::new(limit, offset)?;
        self.comment_repo.list_by_answer(answer_id, page)
    }

    /// Creates a comment on exactly one of a question or an answer.
    ///
    /// The parent combination is checked before anything is read, then the
    /// named parent must exist.
    pub fn create_comment(
        &self,
        user_id: &str,
        question_id: Option<i64>,
        answer_id: Option<i64>,
        description: &str,
    ) -> AppResult<Comment> {
        let comment = NewComment::new(user_id, question_id, answer_id, description)?;

        match comment.parent() {
            CommentParent::Question(id) => {
                self.question_repo.find_by_id(id)?;
            }
            CommentParent::Answer(id) => {
                self.answer_repo.find_by_id(id)?;
            }
        }

        self.comment_repo.create(&comment)
    }

    pub fn update_description(&self, id: i64, description: &str) -> AppResult<Comment> {
        self.comment_repo.update_description(id, description)
    }

    pub fn increment_rating(&self, id: i64) -> AppResult<i64> {
        self.comment_repo.update_rating(id, RatingDelta::Up.value())
    }

    pub fn decrement_rating(&self, id: i64) -> AppResult<i64> {
        self.comment_repo.update_rating(id, RatingDelta::Down.value())
    }

    pub fn remove_comment(&self, id: i64) -> AppResult<()> {
        self.comment_repo.remove(id)
    }

    pub fn authorize(&self, subject: &Subject, id: i64) -> AppResult<Comment> {
        let comment = self.comment_repo.find_by_id(id)?;
        ensure_owner(subject, &comment.user_id, EntityKind::Comment, Some(id))?;
        Ok(comment)
    }

    pub fn authorize_creation(&self, subject: &Subject, user_id: &str) -> AppResult<()> {
        ensure_owner(subject, user_id, EntityKind::Comment, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use crate::domain::{NewAnswer, NewQuestion};
    use crate::error::ErrorKind;
    use crate::repositories::answer_repository::MockAnswerRepository;
    use crate::repositories::comment_repository::MockCommentRepository;
    use crate::repositories::question_repository::MockQuestionRepository;
    use crate::repositories::{
        SqliteAnswerRepository, SqliteCommentRepository, SqliteQuestionRepository,
    };

    struct Fixture {
        service: CommentService,
        question_id: i64,
        answer_id: i64,
    }

    fn fixture() -> Fixture {
        let pool = Arc::new(create_test_pool().unwrap());
        let questions = Arc::new(SqliteQuestionRepository::new(pool.clone()));
        let answers = Arc::new(SqliteAnswerRepository::new(pool.clone()));

        let question_id = questions
            .create(&NewQuestion::new("1", "Title", "Body").unwrap())
            .unwrap()
            .id;
        let answer_id = answers
            .create(&NewAnswer::new("2", question_id, "Answer").unwrap())
            .unwrap()
            .id;

        let service = CommentService::new(
            Arc::new(SqliteCommentRepository::new(pool)),
            questions,
            answers,
        );
        Fixture {
            service,
            question_id,
            answer_id,
        }
    }

    #[test]
    fn test_comment_on_question_and_answer() {
        let f = fixture();

        let on_question = f
            .service
            .create_comment("3", Some(f.question_id), None, "Unclear")
            .unwrap();
        let on_answer = f
            .service
            .create_comment("3", None, Some(f.answer_id), "Works")
            .unwrap();

        assert_eq!(on_question.question_id(), Some(f.question_id));
        assert_eq!(on_answer.answer_id(), Some(f.answer_id));

        let by_question = f
            .service
            .find_comments_by_question_id(f.question_id, 10, 0)
            .unwrap();
        assert_eq!(by_question, vec![on_question]);

        let by_answer = f.service.find_comments_by_answer_id(f.answer_id, 10, 0).unwrap();
        assert_eq!(by_answer, vec![on_answer]);
        assert_eq!(f.service.find_comments(10, 0).unwrap().len(), 2);
    }

    #[test]
    fn test_both_or_neither_parent_is_invalid_state() {
        let f = fixture();

        let err = f
            .service
            .create_comment("3", Some(f.question_id), Some(f.answer_id), "Text")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);

        let err = f.service.create_comment("3", None, None, "Text").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert!(err.to_string().contains("QuestionID or AnswerID has to be set"));
    }

    #[test]
    fn test_missing_parent_is_not_found_of_that_kind() {
        let f = fixture();

        let err = f.service.create_comment("3", Some(500), None, "Text").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EntityNotFound(EntityKind::Question));

        let err = f.service.create_comment("3", None, Some(500), "Text").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EntityNotFound(EntityKind::Answer));
    }

    #[test]
    fn test_update_rate_remove() {
        let f = fixture();
        let comment = f
            .service
            .create_comment("3", Some(f.question_id), None, "First")
            .unwrap();

        let updated = f.service.update_description(comment.id, "Edited").unwrap();
        assert_eq!(updated.description, "Edited");
        assert!(updated.modified_at >= comment.modified_at);

        assert_eq!(f.service.increment_rating(comment.id).unwrap(), 1);
        assert_eq!(f.service.decrement_rating(comment.id).unwrap(), 0);

        f.service.remove_comment(comment.id).unwrap();
        let err = f.service.find_comment(comment.id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EntityNotFound(EntityKind::Comment));
    }

    #[test]
    fn test_authorize() {
        let f = fixture();
        let comment = f
            .service
            .create_comment("3", None, Some(f.answer_id), "Mine")
            .unwrap();

        assert!(f.service.authorize(&Subject::new("3"), comment.id).is_ok());
        let err = f.service.authorize(&Subject::new("2"), comment.id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }

    #[test]
    fn test_invalid_parent_never_reaches_storage() {
        let mut comments = MockCommentRepository::new();
        comments.expect_create().never();
        let mut questions = MockQuestionRepository::new();
        questions.expect_find_by_id().never();
        let mut answers = MockAnswerRepository::new();
        answers.expect_find_by_id().never();

        let service = CommentService::new(
            Arc::new(comments),
            Arc::new(questions),
            Arc::new(answers),
        );

        let err = service.create_comment("3", Some(1), Some(2), "Text").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }
}
