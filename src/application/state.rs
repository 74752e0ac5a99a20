// src/application/state.rs

use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::repositories::{
    SqliteAnswerRepository, SqliteCommentRepository, SqliteProfileRepository,
    SqliteQuestionRepository,
};
use crate::services::{AnswerService, CommentService, ProfileService, QuestionService};

/// Wired services shared by the transport layer.
/// All fields are Arc-wrapped for thread-safe sharing across requests.
pub struct AppState {
    pub question_service: Arc<QuestionService>,
    pub answer_service: Arc<AnswerService>,
    pub comment_service: Arc<CommentService>,
    pub profile_service: Arc<ProfileService>,
}

impl AppState {
    /// Builds every repository over `pool` and the services on top of them
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        let question_repo = Arc::new(SqliteQuestionRepository::new(pool.clone()));
        let answer_repo = Arc::new(SqliteAnswerRepository::new(pool.clone()));
        let comment_repo = Arc::new(SqliteCommentRepository::new(pool.clone()));
        let profile_repo = Arc::new(SqliteProfileRepository::new(pool));

        Self {
            question_service: Arc::new(QuestionService::new(
                question_repo.clone(),
                answer_repo.clone(),
            )),
            answer_service: Arc::new(AnswerService::new(
                answer_repo.clone(),
                question_repo.clone(),
            )),
            comment_service: Arc::new(CommentService::new(
                comment_repo,
                question_repo,
                answer_repo,
            )),
            profile_service: Arc::new(ProfileService::new(profile_repo)),
        }
    }
}
