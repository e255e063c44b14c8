pub mod record;

pub use record::{DecisionRecord, TIMESTAMP_FORMAT};
