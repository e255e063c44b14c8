//! Ledger domain - append-only record of every review decision

pub mod actions;
pub mod models;

pub use actions::append;
pub use models::DecisionRecord;
