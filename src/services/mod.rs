// src/services/mod.rs
//
// Services Module - Orchestration Layer
//
// Services hold repositories behind trait objects and add the rules that span
// aggregates (parent existence, correct-answer linkage, ownership).

pub mod answer_service;
pub mod comment_service;
pub mod profile_service;
pub mod question_service;

pub use answer_service::AnswerService;
pub use comment_service::CommentService;
pub use profile_service::ProfileService;
pub use question_service::QuestionService;
