//! Error taxonomy for the review workflow.
//!
//! - [`ValidationError`]: bad input from the acting user; shown to them privately.
//! - [`LookupError`]: reference data or member identity could not be resolved;
//!   logged, and the dependent step is skipped.
//! - [`TransportError`]: a message could not be delivered; logged and ignored.

use thiserror::Error;

use super::{RoleId, SubmissionId, UserId};

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Category `{0}` has no quests")]
    EmptyCatalog(String),

    #[error("Unknown quest category `{0}`")]
    UnknownCategory(String),

    #[error("Quest `{quest}` is not listed under `{category}`")]
    UnknownQuest { category: String, quest: String },

    #[error("Player name must not be empty")]
    EmptyPlayerName,

    #[error("Submission {0} is no longer pending")]
    UnknownSubmission(SubmissionId),

    #[error("Submission {id} was already {state}")]
    AlreadyDecided { id: SubmissionId, state: &'static str },
}

/// Failures while listing or validating against the quest catalog.
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Catalog store error: {0}")]
    Store(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("No role mapping for quest `{quest}`")]
    NoRoleMapping { quest: String },

    #[error("Malformed role mapping in `{sheet}` row {row}: {reason}")]
    MalformedMapping {
        sheet: String,
        row: usize,
        reason: String,
    },

    #[error("Member {0} could not be found in the guild")]
    MemberNotFound(UserId),

    #[error("Member {member} already holds terminal role {terminal_role} of track `{track}`; {role} not granted")]
    TrackCompleted {
        member: UserId,
        track: String,
        terminal_role: RoleId,
        role: RoleId,
    },

    #[error("Lookup store error: {0}")]
    Store(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Delivery to {target} failed: {reason}")]
    Delivery { target: String, reason: String },
}

impl TransportError {
    pub fn delivery(target: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Delivery {
            target: target.into(),
            reason: err.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Ledger append failed: {0}")]
    Append(#[from] anyhow::Error),
}
