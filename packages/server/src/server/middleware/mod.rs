// HTTP middleware
pub mod signature;

pub use signature::*;
