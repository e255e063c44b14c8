//! Decision executor - runs a decision plan against the outside world

use tokio::sync::OwnedMutexGuard;
use tracing::{info, warn};

use crate::common::{SubmissionId, UserId, ValidationError};
use crate::domains::ledger::{self, DecisionRecord};
use crate::domains::notifications::{self, messages};
use crate::domains::review::machines::{ReviewMachine, ReviewStep};
use crate::domains::review::models::{Decision, DecisionReport};
use crate::domains::review::registry::PendingSubmission;
use crate::domains::roles::{self, RoleResolution};
use crate::kernel::ServerDeps;

pub async fn approve(
    pending: PendingSubmission,
    reviewer: UserId,
    deps: &ServerDeps,
) -> Result<DecisionReport, ValidationError> {
    decide(pending, Decision::Approved, reviewer, deps).await
}

pub async fn reject(
    pending: PendingSubmission,
    reviewer: UserId,
    deps: &ServerDeps,
) -> Result<DecisionReport, ValidationError> {
    decide(pending, Decision::Rejected, reviewer, deps).await
}

/// Claim a pending submission by id and decide it.
///
/// Fails with `UnknownSubmission` when the id was never registered or has
/// already been claimed by another decision.
pub async fn decide_submission(
    id: SubmissionId,
    decision: Decision,
    reviewer: UserId,
    deps: &ServerDeps,
) -> Result<DecisionReport, ValidationError> {
    let pending = deps
        .pending
        .claim(&id)
        .ok_or(ValidationError::UnknownSubmission(id))?;
    decide(pending, decision, reviewer, deps).await
}

/// Transition the request and run every step of the decision plan.
///
/// Steps are attempted independently: a failed step is recorded in the
/// report and the next step still runs. Only the state transition itself can
/// fail the call.
pub async fn decide(
    pending: PendingSubmission,
    decision: Decision,
    reviewer: UserId,
    deps: &ServerDeps,
) -> Result<DecisionReport, ValidationError> {
    let PendingSubmission {
        mut request,
        surface,
    } = pending;
    request.decide(decision)?;

    info!(
        submission_id = %request.id,
        decision = decision.as_str(),
        reviewer = %reviewer,
        "Executing review decision"
    );

    let member = request.submitter_id;
    let mut report = DecisionReport::new(request.id, decision);
    let mut resolution: Option<RoleResolution> = None;
    // Held from grant through downgrade
    let mut member_guard: Option<OwnedMutexGuard<()>> = None;

    for &step in ReviewMachine::plan(decision) {
        match step {
            ReviewStep::AppendLedger => {
                let record = DecisionRecord::for_request(&request, decision);
                if let Err(e) = ledger::append(&record, deps).await {
                    report.fail(step, e);
                }
            }
            ReviewStep::ResolveRole => match roles::resolve(&request.quest_title, deps).await {
                Ok(resolved) => resolution = Some(resolved),
                Err(e) => {
                    warn!(submission_id = %request.id, quest = %request.quest_title, error = %e, "Role resolution failed");
                    report.fail(step, e);
                }
            },
            ReviewStep::GrantRole => {
                let Some(resolved) = &resolution else {
                    continue;
                };
                member_guard = Some(deps.member_locks.lock(member).await);

                let role = resolved.mapping.role_id;
                match roles::grant_resolved(resolved, member, deps).await {
                    Ok(_) => report.granted = Some(role),
                    Err(e) => {
                        warn!(submission_id = %request.id, role_id = %role, error = %e, "Role grant failed");
                        report.fail(step, e);
                    }
                }
            }
            ReviewStep::DowngradeTrack => {
                if let Some(resolved) = resolution.as_ref().filter(|r| r.terminal) {
                    match roles::tier_downgrade(&resolved.superseded, member, deps).await {
                        Ok(outcome) => {
                            for (role, reason) in outcome.failures {
                                report.fail(step, format!("role {}: {}", role, reason));
                            }
                            report.revoked = outcome.revoked;
                        }
                        Err(e) => {
                            warn!(submission_id = %request.id, error = %e, "Tier downgrade failed");
                            report.fail(step, e);
                        }
                    }
                }
                drop(member_guard.take());
            }
            ReviewStep::CloseSurface => {
                if let Err(e) =
                    notifications::close_surface(surface, &request, decision, reviewer, deps).await
                {
                    report.fail(step, e);
                }
            }
            ReviewStep::NotifySubmitter => {
                let message = messages::outcome_dm(&request, decision);
                if let Err(e) = notifications::notify_submitter(member, message, deps).await {
                    report.fail(step, e);
                }
            }
            ReviewStep::NotifyReviewChannel => {
                let message = messages::review_channel_notice(&request, decision, reviewer);
                if let Err(e) = notifications::notify_review_channel(message, deps).await {
                    report.fail(step, e);
                }
            }
        }
    }

    info!(
        submission_id = %request.id,
        decision = decision.as_str(),
        granted = ?report.granted.map(|r| r.to_string()),
        revoked = report.revoked.len(),
        failures = report.failures.len(),
        "Review decision complete"
    );
    Ok(report)
}

/// Decide on behalf of an interaction and send any warnings back to the
/// reviewer as an ephemeral follow-up.
pub async fn decide_for_reviewer(
    pending: PendingSubmission,
    decision: Decision,
    reviewer: UserId,
    interaction_token: &str,
    deps: &ServerDeps,
) -> Result<DecisionReport, ValidationError> {
    let report = decide(pending, decision, reviewer, deps).await?;
    if !report.is_clean() {
        let recorded = !report.failed(ReviewStep::AppendLedger);
        let _ =
            notifications::warn_reviewer(interaction_token, &report.warnings(), recorded, deps).await;
    }
    Ok(report)
}
