//! Quests domain - catalog lookup and submission intake
//!
//! Flow: panel button → quest dropdown → player-name modal →
//! `create_submission`, which posts the review request and registers it.

pub mod actions;
pub mod models;
pub mod views;

pub use actions::*;
pub use models::{QuestCatalog, SubmissionRequest, SubmissionState};
