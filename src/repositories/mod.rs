// src/repositories/mod.rs
//
// Repository layer
//
// RULES:
// - Repositories map rows to entities and back
// - Argument checks only (ids, text, deltas); no cross-aggregate rules
// - Removing a question deletes its answers and comments in the same transaction
// - NO cross-repository calls
// - Every mutation runs in exactly one transaction
// - Explicit SQL only

pub(crate) mod support;

pub mod answer_repository;
pub mod comment_repository;
pub mod profile_repository;
pub mod question_repository;

pub use answer_repository::{AnswerRepository, SqliteAnswerRepository};
pub use comment_repository::{CommentRepository, SqliteCommentRepository};
pub use profile_repository::{ProfileRepository, SqliteProfileRepository};
pub use question_repository::{QuestionRepository, SqliteQuestionRepository};
