// Quest Review Service - Core
//
// Members submit quest completions through the chat platform; reviewers
// approve or reject them. Approval records the decision in the ledger sheet,
// grants the quest's role and retires lower tiers of the same track.
//
// Domain logic lives in domains/*; infrastructure traits and the dependency
// container in kernel/; the HTTP edge in server/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
