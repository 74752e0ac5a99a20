pub mod entity;
pub mod invariants;

pub use entity::Profile;
pub use invariants::validate_profile_names;
