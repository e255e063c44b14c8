//! Notifications domain - best-effort delivery of review traffic
//!
//! Nothing here retries. Failures are logged and returned so the caller can
//! list them in the reviewer's warnings.

pub mod actions;
pub mod messages;

pub use actions::*;
