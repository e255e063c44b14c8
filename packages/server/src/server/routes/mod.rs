// HTTP routes
pub mod health;
pub mod interactions;

pub use health::*;
pub use interactions::*;
