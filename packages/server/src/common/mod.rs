// Common types and utilities shared across the application

pub mod custom_id;
pub mod entity_ids;
pub mod errors;
pub mod id;
pub mod text;

pub use custom_id::ComponentAction;
pub use entity_ids::*;
pub use errors::*;
pub use id::Id;
