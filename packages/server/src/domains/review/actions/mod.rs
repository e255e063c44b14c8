mod decide;

pub use decide::{approve, decide, decide_for_reviewer, decide_submission, reject};
