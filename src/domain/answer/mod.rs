pub mod builder;
pub mod entity;

pub use builder::{AnswerBuilder, NewAnswer};
pub use entity::Answer;
