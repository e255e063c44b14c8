//! Interaction dispatch: maps platform interactions onto domain actions.

use discord::models::{interaction_type, Interaction, InteractionResponse};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::common::{ComponentAction, IntakeError, SubmissionId, UserId, ValidationError};
use crate::domains::quests::{self, views};
use crate::domains::review::{self, Decision};
use crate::kernel::ServerDeps;

/// The synchronous reply plus, for decisions, the spawned decision task.
pub struct Dispatched {
    pub response: InteractionResponse,
    pub decision: Option<JoinHandle<()>>,
}

impl From<InteractionResponse> for Dispatched {
    fn from(response: InteractionResponse) -> Self {
        Self {
            response,
            decision: None,
        }
    }
}

pub async fn handle(interaction: Interaction, deps: &ServerDeps) -> InteractionResponse {
    dispatch(interaction, deps).await.response
}

pub async fn dispatch(interaction: Interaction, deps: &ServerDeps) -> Dispatched {
    match interaction.kind {
        interaction_type::PING => InteractionResponse::pong().into(),
        interaction_type::MESSAGE_COMPONENT | interaction_type::MODAL_SUBMIT => {
            dispatch_component(interaction, deps).await
        }
        kind => {
            debug!(kind, "Ignoring unsupported interaction type");
            InteractionResponse::private("This interaction is not supported.").into()
        }
    }
}

async fn dispatch_component(interaction: Interaction, deps: &ServerDeps) -> Dispatched {
    let Some(action) = interaction.custom_id().and_then(ComponentAction::parse) else {
        warn!(custom_id = ?interaction.custom_id(), "Unrecognised component");
        return InteractionResponse::private("This control is no longer active.").into();
    };
    let Some(actor) = interaction
        .actor()
        .and_then(|user| UserId::parse(&user.id).ok())
    else {
        warn!(interaction_id = %interaction.id, "Interaction without a usable actor");
        return InteractionResponse::private("Could not identify who you are.").into();
    };

    match action {
        ComponentAction::Category(category) => {
            match quests::load_catalog(&category, deps).await {
                Ok(catalog) => InteractionResponse::message(views::quest_select(&catalog)).into(),
                Err(e) => intake_failure(e).into(),
            }
        }
        ComponentAction::QuestSelect(category) => {
            let index = interaction
                .data
                .as_ref()
                .and_then(|d| d.values.first())
                .and_then(|v| v.parse::<usize>().ok());
            match index {
                Some(index) => views::intake_modal(&category, index).into(),
                None => InteractionResponse::private("Please pick a quest from the list.").into(),
            }
        }
        ComponentAction::Intake { category, index } => {
            let player_name = interaction
                .data
                .as_ref()
                .and_then(|d| d.text_value(views::PLAYER_NAME_INPUT))
                .unwrap_or_default();
            match submit(actor, &category, index, player_name, deps).await {
                Ok(request) => {
                    InteractionResponse::message(views::submission_confirmation(&request)).into()
                }
                Err(e) => intake_failure(e).into(),
            }
        }
        ComponentAction::Approve(id) => start_decision(id, Decision::Approved, actor, interaction.token, deps),
        ComponentAction::Reject(id) => start_decision(id, Decision::Rejected, actor, interaction.token, deps),
    }
}

async fn submit(
    submitter: UserId,
    category: &str,
    index: usize,
    player_name: &str,
    deps: &ServerDeps,
) -> Result<quests::SubmissionRequest, IntakeError> {
    let quest_title = quests::quest_at(category, index, deps).await?;
    quests::create_submission(submitter, category, &quest_title, player_name, deps).await
}

fn intake_failure(err: IntakeError) -> InteractionResponse {
    match err {
        IntakeError::Validation(e) => InteractionResponse::private(e.to_string()),
        IntakeError::Store(e) => {
            error!(error = %e, "Catalog store unavailable");
            InteractionResponse::private("The quest list is unavailable right now. Please try again later.")
        }
    }
}

/// Claim the submission and run the decision in the background.
///
/// The platform expects an answer within three seconds, so the interaction is
/// acknowledged with a deferred update before any step runs.
fn start_decision(
    id: SubmissionId,
    decision: Decision,
    reviewer: UserId,
    interaction_token: String,
    deps: &ServerDeps,
) -> Dispatched {
    let Some(pending) = deps.pending.claim(&id) else {
        info!(submission_id = %id, reviewer = %reviewer, "Decision on a submission that is not pending");
        return InteractionResponse::private(ValidationError::UnknownSubmission(id).to_string()).into();
    };

    let deps = deps.clone();
    let task = tokio::spawn(async move {
        if let Err(e) =
            review::decide_for_reviewer(pending, decision, reviewer, &interaction_token, &deps).await
        {
            warn!(submission_id = %id, error = %e, "Decision refused");
        }
    });

    Dispatched {
        response: InteractionResponse::deferred_update(),
        decision: Some(task),
    }
}
