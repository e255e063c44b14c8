//! In-memory registry of submissions awaiting a decision.

use dashmap::DashMap;
use std::sync::Arc;

use crate::common::SubmissionId;
use crate::domains::quests::models::SubmissionRequest;
use crate::kernel::MessageRef;

/// A pending request together with the review message carrying its buttons.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub request: SubmissionRequest,
    pub surface: MessageRef,
}

/// Shared across handlers. Entries are lost on restart; the decision surface
/// of a lost entry answers "no longer pending".
#[derive(Clone, Default)]
pub struct PendingSubmissions {
    inner: Arc<DashMap<SubmissionId, PendingSubmission>>,
}

impl PendingSubmissions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, request: SubmissionRequest, surface: MessageRef) {
        self.inner
            .insert(request.id, PendingSubmission { request, surface });
    }

    /// Take the submission out of the registry.
    ///
    /// Removal is atomic: of any number of concurrent claims for the same id,
    /// exactly one receives the entry.
    pub fn claim(&self, id: &SubmissionId) -> Option<PendingSubmission> {
        self.inner.remove(id).map(|(_, pending)| pending)
    }

    pub fn contains(&self, id: &SubmissionId) -> bool {
        self.inner.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
