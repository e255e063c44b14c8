//! Review domain - the approve/reject state machine
//!
//! Architecture:
//!   registry.claim(id) → decide() → ReviewMachine::plan(decision) → one step at a time
//!
//! The plan is static data; the executor in `actions::decide` attempts every
//! step and collects failures into a `DecisionReport`.

pub mod actions;
pub mod machines;
pub mod models;
pub mod registry;

pub use actions::*;
pub use machines::{ReviewMachine, ReviewStep};
pub use models::{Decision, DecisionReport, StepFailure};
pub use registry::{PendingSubmission, PendingSubmissions};
