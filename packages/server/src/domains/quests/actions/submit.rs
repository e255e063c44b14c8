use tracing::{error, info};

use crate::common::{IntakeError, UserId, ValidationError};
use crate::domains::notifications;
use crate::domains::quests::actions::load_catalog;
use crate::domains::quests::models::SubmissionRequest;
use crate::kernel::ServerDeps;

/// Validate a submission, post it for review and register it as pending.
///
/// A failure to post the review request is logged but does not fail the
/// submission; such a request is never registered and cannot be decided.
pub async fn create_submission(
    submitter: UserId,
    category: &str,
    quest_title: &str,
    player_name: &str,
    deps: &ServerDeps,
) -> Result<SubmissionRequest, IntakeError> {
    let player_name = player_name.trim();
    if player_name.is_empty() {
        return Err(ValidationError::EmptyPlayerName.into());
    }

    let catalog = load_catalog(category, deps).await?;
    if quest_title.trim().is_empty() || !catalog.contains(quest_title) {
        return Err(ValidationError::UnknownQuest {
            category: category.to_string(),
            quest: quest_title.to_string(),
        }
        .into());
    }

    let request = SubmissionRequest::new(submitter, player_name, category, quest_title);

    match notifications::post_review_request(&request, deps).await {
        Ok(surface) => {
            deps.pending.register(request.clone(), surface);
            info!(
                submission_id = %request.id,
                submitter = %submitter,
                category,
                quest = quest_title,
                "Submission pending review"
            );
        }
        Err(e) => {
            error!(submission_id = %request.id, error = %e, "Submission could not be posted for review");
        }
    }

    Ok(request)
}
