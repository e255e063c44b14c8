use chrono::{DateTime, Utc};

use crate::common::{SubmissionId, UserId, ValidationError};
use crate::domains::review::machines::ReviewMachine;
use crate::domains::review::models::Decision;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionState {
    Pending,
    Approved,
    Rejected,
}

impl SubmissionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// A member's claim that they completed a quest, awaiting review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub id: SubmissionId,
    pub submitter_id: UserId,
    pub player_name: String,
    pub category: String,
    pub quest_title: String,
    pub created_at: DateTime<Utc>,
    pub state: SubmissionState,
}

impl SubmissionRequest {
    pub fn new(
        submitter_id: UserId,
        player_name: impl Into<String>,
        category: impl Into<String>,
        quest_title: impl Into<String>,
    ) -> Self {
        Self {
            id: SubmissionId::new(),
            submitter_id,
            player_name: player_name.into(),
            category: category.into(),
            quest_title: quest_title.into(),
            created_at: Utc::now(),
            state: SubmissionState::Pending,
        }
    }

    /// Apply a reviewer decision. Succeeds at most once per request.
    pub fn decide(&mut self, decision: Decision) -> Result<SubmissionState, ValidationError> {
        let next = ReviewMachine::transition(self.state, decision).ok_or(
            ValidationError::AlreadyDecided {
                id: self.id,
                state: self.state.as_str(),
            },
        )?;
        self.state = next;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_is_pending() {
        let request = SubmissionRequest::new(UserId::new(1), "Alice", "BeginnerQuests", "No_3");
        assert_eq!(request.state, SubmissionState::Pending);
    }

    #[test]
    fn test_second_decision_is_refused() {
        let mut request = SubmissionRequest::new(UserId::new(1), "Alice", "BeginnerQuests", "No_3");

        assert_eq!(request.decide(Decision::Approved).unwrap(), SubmissionState::Approved);

        let err = request.decide(Decision::Rejected).unwrap_err();
        assert!(matches!(err, ValidationError::AlreadyDecided { state: "approved", .. }));
        assert_eq!(request.state, SubmissionState::Approved);
    }
}
