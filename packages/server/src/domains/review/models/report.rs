use crate::common::{RoleId, SubmissionId};
use crate::domains::review::machines::ReviewStep;

use super::Decision;

/// A step of the decision workflow that did not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    pub step: ReviewStep,
    pub message: String,
}

/// Per-step outcome of one decision.
///
/// Every step is attempted regardless of earlier failures; the report is what
/// the reviewer sees afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionReport {
    pub submission_id: SubmissionId,
    pub decision: Decision,
    pub granted: Option<RoleId>,
    pub revoked: Vec<RoleId>,
    pub failures: Vec<StepFailure>,
}

impl DecisionReport {
    pub fn new(submission_id: SubmissionId, decision: Decision) -> Self {
        Self {
            submission_id,
            decision,
            granted: None,
            revoked: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn fail(&mut self, step: ReviewStep, error: impl std::fmt::Display) {
        self.failures.push(StepFailure {
            step,
            message: error.to_string(),
        });
    }

    pub fn failed(&self, step: ReviewStep) -> bool {
        self.failures.iter().any(|f| f.step == step)
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// One line per failure, for the reviewer's follow-up.
    pub fn warnings(&self) -> Vec<String> {
        self.failures
            .iter()
            .map(|f| format!("{}: {}", f.step.label(), f.message))
            .collect()
    }
}
