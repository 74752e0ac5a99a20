// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Sits between the transport layer and the services
// - Wires repositories and services over one connection pool
// - Translates errors into caller-facing responses

pub mod error_handling;
pub mod state;

pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use state::AppState;
