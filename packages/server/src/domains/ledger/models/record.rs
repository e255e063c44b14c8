use chrono::{DateTime, Local};

use crate::common::UserId;
use crate::domains::quests::models::SubmissionRequest;
use crate::domains::review::models::Decision;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One immutable ledger row describing a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionRecord {
    pub timestamp: DateTime<Local>,
    pub player_name: String,
    pub category: String,
    pub quest_title: String,
    pub decision: Decision,
    pub submitter_id: UserId,
}

impl DecisionRecord {
    pub fn for_request(request: &SubmissionRequest, decision: Decision) -> Self {
        Self {
            timestamp: Local::now(),
            player_name: request.player_name.clone(),
            category: request.category.clone(),
            quest_title: request.quest_title.clone(),
            decision,
            submitter_id: request.submitter_id,
        }
    }

    /// `[timestamp, playerName, category, questTitle, decisionText, submitterId]`
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            self.player_name.clone(),
            self.category.clone(),
            self.quest_title.clone(),
            self.decision.as_str().to_string(),
            self.submitter_id.to_string(),
        ]
    }
}
