pub mod builder;
pub mod entity;

pub use builder::{CommentBuilder, NewComment};
pub use entity::{Comment, CommentParent};
