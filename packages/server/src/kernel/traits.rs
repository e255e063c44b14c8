// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (intake validation, tier resolution, the decision workflow)
// lives in domain functions that take these traits through ServerDeps.
//
// Naming convention: Base* for trait names (e.g., BaseSheetStore, BaseMessenger)

use anyhow::Result;
use async_trait::async_trait;
use discord::models::{CreateMessage, Message};

use crate::common::{ChannelId, MessageId, RoleId, UserId};

// =============================================================================
// Sheet Store Trait (Infrastructure - row-oriented read/append store)
// =============================================================================

#[async_trait]
pub trait BaseSheetStore: Send + Sync {
    /// Worksheet titles in the store's enumeration (tab) order.
    async fn worksheet_titles(&self) -> Result<Vec<String>>;

    /// All rows of a worksheet, header row included.
    async fn rows(&self, worksheet: &str) -> Result<Vec<Vec<String>>>;

    /// Append one row at the end of a worksheet.
    async fn append_row(&self, worksheet: &str, row: Vec<String>) -> Result<()>;

    /// Values of the first column, header included, up to the last non-empty cell.
    async fn first_column(&self, worksheet: &str) -> Result<Vec<String>> {
        let mut values: Vec<String> = self
            .rows(worksheet)
            .await?
            .into_iter()
            .map(|row| row.into_iter().next().unwrap_or_default())
            .collect();
        while values.last().is_some_and(|v| v.is_empty()) {
            values.pop();
        }
        Ok(values)
    }
}

// =============================================================================
// Guild Service Trait (Infrastructure - member role mutations)
// =============================================================================

#[async_trait]
pub trait BaseGuildService: Send + Sync {
    /// Roles the user currently holds, or `None` if they are not a guild member.
    async fn member_roles(&self, user: UserId) -> Result<Option<Vec<RoleId>>>;

    async fn add_role(&self, user: UserId, role: RoleId) -> Result<()>;

    async fn remove_role(&self, user: UserId, role: RoleId) -> Result<()>;
}

// =============================================================================
// Messenger Trait (Infrastructure - outgoing chat traffic)
// =============================================================================

/// Address of a posted message (e.g. a decision surface).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
}

#[async_trait]
pub trait BaseMessenger: Send + Sync {
    /// The bot's own user id.
    async fn bot_user_id(&self) -> Result<UserId>;

    async fn post(&self, channel: ChannelId, message: CreateMessage) -> Result<MessageRef>;

    async fn edit(&self, target: MessageRef, message: CreateMessage) -> Result<()>;

    async fn direct_message(&self, user: UserId, message: CreateMessage) -> Result<()>;

    /// Most recent messages in a channel, newest first.
    async fn recent_messages(&self, channel: ChannelId, limit: u8) -> Result<Vec<Message>>;

    /// Follow-up to an interaction that was already acknowledged.
    async fn followup(&self, interaction_token: &str, message: CreateMessage) -> Result<()>;
}
