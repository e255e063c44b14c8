use discord::models::CreateMessage;
use tracing::{info, warn};

use crate::common::{TransportError, UserId};
use crate::domains::notifications::messages;
use crate::domains::quests::models::SubmissionRequest;
use crate::domains::review::models::Decision;
use crate::kernel::{MessageRef, ServerDeps};

/// Post the review request and its decision surface to the review channel.
pub async fn post_review_request(
    request: &SubmissionRequest,
    deps: &ServerDeps,
) -> Result<MessageRef, TransportError> {
    let channel = deps.settings.review_channel;
    let surface = deps
        .messenger
        .post(channel, messages::review_request(request))
        .await
        .map_err(|e| {
            warn!(submission_id = %request.id, channel = %channel, error = %e, "Failed to post review request");
            TransportError::delivery(format!("review channel {}", channel), e)
        })?;

    info!(
        submission_id = %request.id,
        message_id = %surface.message_id,
        "Posted review request"
    );
    Ok(surface)
}

/// Replace the review request with terminal content and strip its buttons.
pub async fn close_surface(
    surface: MessageRef,
    request: &SubmissionRequest,
    decision: Decision,
    reviewer: UserId,
    deps: &ServerDeps,
) -> Result<(), TransportError> {
    deps.messenger
        .edit(surface, messages::closed_surface(request, decision, reviewer))
        .await
        .map_err(|e| {
            warn!(submission_id = %request.id, error = %e, "Failed to close review message");
            TransportError::delivery(format!("review message {}", surface.message_id), e)
        })
}

pub async fn notify_submitter(
    user: UserId,
    message: CreateMessage,
    deps: &ServerDeps,
) -> Result<(), TransportError> {
    deps.messenger
        .direct_message(user, message)
        .await
        .map_err(|e| {
            // Members with DMs closed are common; never retried
            warn!(user = %user, error = %e, "Failed to DM submitter");
            TransportError::delivery(format!("DM to {}", user.mention()), e)
        })
}

pub async fn notify_review_channel(
    message: CreateMessage,
    deps: &ServerDeps,
) -> Result<(), TransportError> {
    let channel = deps.settings.review_channel;
    deps.messenger
        .post(channel, message)
        .await
        .map(|_| ())
        .map_err(|e| {
            warn!(channel = %channel, error = %e, "Failed to notify review channel");
            TransportError::delivery(format!("review channel {}", channel), e)
        })
}

/// Ephemeral follow-up to the reviewer's interaction listing failed steps.
pub async fn warn_reviewer(
    interaction_token: &str,
    warnings: &[String],
    recorded: bool,
    deps: &ServerDeps,
) -> Result<(), TransportError> {
    if warnings.is_empty() {
        return Ok(());
    }

    deps.messenger
        .followup(interaction_token, messages::reviewer_warnings(warnings, recorded))
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to send reviewer warnings");
            TransportError::delivery("reviewer follow-up", e)
        })
}
