//! Message bodies sent by the notification dispatcher.

use discord::models::{button_style, Component, CreateMessage, Embed};

use crate::common::{ComponentAction, UserId};
use crate::domains::quests::models::SubmissionRequest;
use crate::domains::review::models::Decision;

pub const COLOR_PENDING: u32 = 0x3498db;
pub const COLOR_APPROVED: u32 = 0x2ecc71;
pub const COLOR_REJECTED: u32 = 0xe74c3c;

fn decision_color(decision: Decision) -> u32 {
    match decision {
        Decision::Approved => COLOR_APPROVED,
        Decision::Rejected => COLOR_REJECTED,
    }
}

fn decision_icon(decision: Decision) -> &'static str {
    match decision {
        Decision::Approved => "✅",
        Decision::Rejected => "❌",
    }
}

/// Review request with the approve/reject decision surface.
pub fn review_request(request: &SubmissionRequest) -> CreateMessage {
    let embed = Embed::new("📥 New quest submission")
        .description(format!(
            "👤 Player: **{}**\n🙋 Submitted by: {}\n📂 Category: **{}**\n🎯 Quest: {}",
            request.player_name,
            request.submitter_id.mention(),
            request.category,
            request.quest_title
        ))
        .color(COLOR_PENDING);

    CreateMessage::embed(embed).with_components(vec![Component::action_row(vec![
        Component::button(
            button_style::SUCCESS,
            "✅ Approve",
            ComponentAction::Approve(request.id).to_string(),
        ),
        Component::button(
            button_style::DANGER,
            "❌ Reject",
            ComponentAction::Reject(request.id).to_string(),
        ),
    ])])
}

/// Terminal, non-interactive replacement for the review request.
pub fn closed_surface(request: &SubmissionRequest, decision: Decision, reviewer: UserId) -> CreateMessage {
    let verb = match decision {
        Decision::Approved => "was approved",
        Decision::Rejected => "was rejected",
    };
    CreateMessage::text(format!(
        "{} Quest of {} ({}) {} by {}",
        decision_icon(decision),
        request.player_name,
        request.quest_title,
        verb,
        reviewer.mention()
    ))
}

/// Outcome DM for the submitter.
pub fn outcome_dm(request: &SubmissionRequest, decision: Decision) -> CreateMessage {
    let verb = match decision {
        Decision::Approved => "has been approved",
        Decision::Rejected => "was rejected",
    };
    CreateMessage::embed(
        Embed::new("📬 Quest review result")
            .description(format!(
                "{} Your quest `{}` in `{}` {}",
                decision_icon(decision),
                request.quest_title,
                request.category,
                verb
            ))
            .color(decision_color(decision)),
    )
}

pub fn review_channel_notice(
    request: &SubmissionRequest,
    decision: Decision,
    reviewer: UserId,
) -> CreateMessage {
    CreateMessage::text(format!(
        "{} Quest of **{}**: `{}` {} by {}",
        decision_icon(decision),
        request.player_name,
        request.quest_title,
        decision.as_str(),
        reviewer.mention()
    ))
}

/// Ephemeral follow-up listing the steps that failed.
///
/// `recorded` is false when the ledger append itself failed.
pub fn reviewer_warnings(warnings: &[String], recorded: bool) -> CreateMessage {
    let lines: Vec<String> = warnings.iter().map(|w| format!("• {}", w)).collect();
    let headline = if recorded {
        "⚠️ The decision was recorded, but some steps failed:"
    } else {
        "⚠️ The decision was applied but NOT recorded in the ledger. Please add the row by hand. Failed steps:"
    };
    CreateMessage::text(format!("{}\n{}", headline, lines.join("\n"))).ephemeral()
}
