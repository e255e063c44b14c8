use anyhow::{Context, Result};
use tracing::info;

use crate::common::custom_id::CATEGORY_PREFIX;
use crate::domains::quests::actions::list_categories;
use crate::domains::quests::views;
use crate::kernel::{MessageRef, ServerDeps};

/// How many recent intake-channel messages are searched for an existing panel.
const PANEL_SCAN_LIMIT: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelOutcome {
    Posted(MessageRef),
    AlreadyPresent,
}

/// Post the category panel unless one of ours is already in the intake channel.
pub async fn ensure_intake_panel(deps: &ServerDeps) -> Result<PanelOutcome> {
    let channel = deps.settings.intake_channel;
    let bot_id = deps
        .messenger
        .bot_user_id()
        .await
        .context("Failed to resolve bot user")?
        .to_string();

    let recent = deps
        .messenger
        .recent_messages(channel, PANEL_SCAN_LIMIT)
        .await
        .context("Failed to read intake channel history")?;

    let present = recent.iter().any(|message| {
        message.author.as_ref().is_some_and(|a| a.id == bot_id)
            && message
                .custom_ids()
                .iter()
                .any(|id| id.starts_with(CATEGORY_PREFIX))
    });
    if present {
        info!(channel = %channel, "Intake panel already present");
        return Ok(PanelOutcome::AlreadyPresent);
    }

    let posted = deps
        .messenger
        .post(channel, views::intake_panel(list_categories(deps)))
        .await
        .context("Failed to post intake panel")?;
    info!(channel = %channel, message_id = %posted.message_id, "Posted intake panel");
    Ok(PanelOutcome::Posted(posted))
}
