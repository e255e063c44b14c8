use crate::domains::quests::models::SubmissionState;
use crate::domains::review::models::Decision;

/// One side effect of a decision. Executed in plan order, each independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewStep {
    AppendLedger,
    ResolveRole,
    GrantRole,
    DowngradeTrack,
    CloseSurface,
    NotifySubmitter,
    NotifyReviewChannel,
}

impl ReviewStep {
    pub fn label(&self) -> &'static str {
        match self {
            Self::AppendLedger => "ledger",
            Self::ResolveRole => "role lookup",
            Self::GrantRole => "role grant",
            Self::DowngradeTrack => "tier downgrade",
            Self::CloseSurface => "review message",
            Self::NotifySubmitter => "submitter DM",
            Self::NotifyReviewChannel => "review channel notice",
        }
    }

    pub fn mutates_roles(&self) -> bool {
        matches!(self, Self::GrantRole | Self::DowngradeTrack)
    }
}

const APPROVE_PLAN: &[ReviewStep] = &[
    ReviewStep::AppendLedger,
    ReviewStep::ResolveRole,
    ReviewStep::GrantRole,
    ReviewStep::DowngradeTrack,
    ReviewStep::CloseSurface,
    ReviewStep::NotifySubmitter,
    ReviewStep::NotifyReviewChannel,
];

const REJECT_PLAN: &[ReviewStep] = &[
    ReviewStep::AppendLedger,
    ReviewStep::CloseSurface,
    ReviewStep::NotifySubmitter,
    ReviewStep::NotifyReviewChannel,
];

/// Review state machine - pure decision logic
///
/// `Pending → {Approved, Rejected}`; both outcomes are terminal.
pub struct ReviewMachine;

impl ReviewMachine {
    /// Next state, or `None` when the submission was already decided.
    pub fn transition(state: SubmissionState, decision: Decision) -> Option<SubmissionState> {
        match (state, decision) {
            (SubmissionState::Pending, Decision::Approved) => Some(SubmissionState::Approved),
            (SubmissionState::Pending, Decision::Rejected) => Some(SubmissionState::Rejected),
            (SubmissionState::Approved | SubmissionState::Rejected, _) => None,
        }
    }

    pub fn plan(decision: Decision) -> &'static [ReviewStep] {
        match decision {
            Decision::Approved => APPROVE_PLAN,
            Decision::Rejected => REJECT_PLAN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states_accept_nothing() {
        for state in [SubmissionState::Approved, SubmissionState::Rejected] {
            assert_eq!(ReviewMachine::transition(state, Decision::Approved), None);
            assert_eq!(ReviewMachine::transition(state, Decision::Rejected), None);
        }
    }

    #[test]
    fn test_reject_plan_never_touches_roles() {
        assert!(!ReviewMachine::plan(Decision::Rejected)
            .iter()
            .any(|s| s.mutates_roles() || *s == ReviewStep::ResolveRole));
    }

    #[test]
    fn test_ledger_precedes_role_mutation() {
        let plan = ReviewMachine::plan(Decision::Approved);
        let ledger = plan.iter().position(|s| *s == ReviewStep::AppendLedger).unwrap();
        let first_role = plan.iter().position(|s| s.mutates_roles()).unwrap();
        assert!(ledger < first_role);
        assert_eq!(plan.iter().filter(|s| **s == ReviewStep::AppendLedger).count(), 1);
    }

    #[test]
    fn test_grant_precedes_downgrade() {
        let plan = ReviewMachine::plan(Decision::Approved);
        let grant = plan.iter().position(|s| *s == ReviewStep::GrantRole).unwrap();
        let downgrade = plan.iter().position(|s| *s == ReviewStep::DowngradeTrack).unwrap();
        assert!(grant < downgrade);
    }
}
