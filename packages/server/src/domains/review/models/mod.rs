pub mod decision;
pub mod report;

pub use decision::Decision;
pub use report::{DecisionReport, StepFailure};
