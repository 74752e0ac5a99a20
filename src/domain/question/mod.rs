pub mod builder;
pub mod entity;

pub use builder::{NewQuestion, QuestionBuilder};
pub use entity::Question;
