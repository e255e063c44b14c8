pub mod catalog;
pub mod submission;

pub use catalog::{QuestCatalog, QuestCatalogEntry};
pub use submission::{SubmissionRequest, SubmissionState};
