//! Quests domain actions

mod catalog;
mod panel;
mod submit;

pub use catalog::{list_categories, list_quests, load_catalog, quest_at};
pub use panel::{ensure_intake_panel, PanelOutcome};
pub use submit::create_submission;
