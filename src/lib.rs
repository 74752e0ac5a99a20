// src/lib.rs
// qa - Question & answer backend core
//
// Architecture:
// - Domain: entities, builders and value objects; no storage access
// - Repositories: one per aggregate, one transaction per mutation
// - Services: orchestration and cross-aggregate rules
// - Application: wiring and error mapping for the transport layer

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    ensure_owner,
    // Answer
    Answer,
    AnswerBuilder,
    // Comment
    Comment,
    CommentBuilder,
    CommentParent,
    DomainError,
    DomainResult,
    NewAnswer,
    NewComment,
    NewQuestion,
    // Value objects
    PageRequest,
    // Profile
    Profile,
    // Question
    Question,
    QuestionBuilder,
    RatingDelta,
    Subject,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult, EntityKind, EntityNotFound, ErrorKind};

// ============================================================================
// PUBLIC API - Configuration & Database
// ============================================================================

pub use config::{DatabaseConfig, QaConfig};
pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    AnswerRepository,
    CommentRepository,
    ProfileRepository,
    QuestionRepository,
    SqliteAnswerRepository,
    SqliteCommentRepository,
    SqliteProfileRepository,
    SqliteQuestionRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{AnswerService, CommentService, ProfileService, QuestionService};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, ErrorResponse, ErrorType, ToErrorResponse};
