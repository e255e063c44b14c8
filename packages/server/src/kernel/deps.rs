//! Server dependencies for domain actions (using traits for testability)
//!
//! This module provides the central dependency container used by every
//! domain action. It is built once at startup and passed explicitly; there
//! are no ambient globals. All external services use trait abstractions to
//! enable testing.

use anyhow::{Context, Result};
use async_trait::async_trait;
use discord::models::{CreateMessage, Message};
use discord::DiscordClient;
use sheets_client::SheetsClient;
use std::sync::Arc;

use crate::common::{ApplicationId, ChannelId, GuildId, MessageId, RoleId, UserId};
use crate::config::QuestSettings;
use crate::domains::review::PendingSubmissions;
use crate::domains::roles::RoleTierTable;
use crate::kernel::{BaseGuildService, BaseMessenger, BaseSheetStore, KeyedLocks, MessageRef};

// =============================================================================
// SheetsClient Adapter (implements BaseSheetStore trait)
// =============================================================================

/// Wrapper around SheetsClient that implements BaseSheetStore trait
pub struct SheetsAdapter(pub Arc<SheetsClient>);

impl SheetsAdapter {
    pub fn new(client: Arc<SheetsClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseSheetStore for SheetsAdapter {
    async fn worksheet_titles(&self) -> Result<Vec<String>> {
        self.0
            .worksheet_titles()
            .await
            .context("Failed to list worksheets")
    }

    async fn rows(&self, worksheet: &str) -> Result<Vec<Vec<String>>> {
        self.0
            .rows(worksheet)
            .await
            .with_context(|| format!("Failed to read worksheet `{}`", worksheet))
    }

    async fn append_row(&self, worksheet: &str, row: Vec<String>) -> Result<()> {
        self.0
            .append_row(worksheet, row)
            .await
            .with_context(|| format!("Failed to append to worksheet `{}`", worksheet))
    }
}

// =============================================================================
// DiscordClient Adapter (implements BaseGuildService + BaseMessenger)
// =============================================================================

/// Wrapper around DiscordClient bound to one guild and application
pub struct DiscordAdapter {
    client: Arc<DiscordClient>,
    guild_id: GuildId,
    application_id: ApplicationId,
}

impl DiscordAdapter {
    pub fn new(client: Arc<DiscordClient>, guild_id: GuildId, application_id: ApplicationId) -> Self {
        Self {
            client,
            guild_id,
            application_id,
        }
    }
}

fn message_ref(message: &Message) -> Result<MessageRef> {
    Ok(MessageRef {
        channel_id: ChannelId::parse(&message.channel_id)
            .context("Discord returned a non-numeric channel id")?,
        message_id: MessageId::parse(&message.id)
            .context("Discord returned a non-numeric message id")?,
    })
}

#[async_trait]
impl BaseGuildService for DiscordAdapter {
    async fn member_roles(&self, user: UserId) -> Result<Option<Vec<RoleId>>> {
        match self.client.guild_member(self.guild_id.get(), user.get()).await {
            Ok(member) => Ok(Some(
                member
                    .roles
                    .iter()
                    .filter_map(|r| RoleId::parse(r).ok())
                    .collect(),
            )),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(anyhow::anyhow!("{}", e)),
        }
    }

    async fn add_role(&self, user: UserId, role: RoleId) -> Result<()> {
        self.client
            .add_member_role(self.guild_id.get(), user.get(), role.get())
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    async fn remove_role(&self, user: UserId, role: RoleId) -> Result<()> {
        self.client
            .remove_member_role(self.guild_id.get(), user.get(), role.get())
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

#[async_trait]
impl BaseMessenger for DiscordAdapter {
    async fn bot_user_id(&self) -> Result<UserId> {
        let user = self
            .client
            .current_user()
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;
        UserId::parse(&user.id).context("Discord returned a non-numeric user id")
    }

    async fn post(&self, channel: ChannelId, message: CreateMessage) -> Result<MessageRef> {
        let posted = self
            .client
            .create_message(channel.get(), &message)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;
        message_ref(&posted)
    }

    async fn edit(&self, target: MessageRef, message: CreateMessage) -> Result<()> {
        self.client
            .edit_message(target.channel_id.get(), target.message_id.get(), &message)
            .await
            .map(|_| ())
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    async fn direct_message(&self, user: UserId, message: CreateMessage) -> Result<()> {
        self.client
            .send_direct_message(user.get(), &message)
            .await
            .map(|_| ())
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    async fn recent_messages(&self, channel: ChannelId, limit: u8) -> Result<Vec<Message>> {
        self.client
            .channel_messages(channel.get(), limit)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    async fn followup(&self, interaction_token: &str, message: CreateMessage) -> Result<()> {
        self.client
            .create_followup(self.application_id.get(), interaction_token, &message)
            .await
            .map(|_| ())
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to domain actions (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    /// Catalog, role lookup and ledger worksheets
    pub sheets: Arc<dyn BaseSheetStore>,
    pub guild: Arc<dyn BaseGuildService>,
    pub messenger: Arc<dyn BaseMessenger>,
    pub settings: Arc<QuestSettings>,
    /// Declarative role-tier tracks (loaded once at startup)
    pub tracks: Arc<RoleTierTable>,
    /// Submissions awaiting a decision, keyed by submission id
    pub pending: PendingSubmissions,
    /// Serializes role mutations per member
    pub member_locks: KeyedLocks<UserId>,
}

impl ServerDeps {
    pub fn new(
        sheets: Arc<dyn BaseSheetStore>,
        guild: Arc<dyn BaseGuildService>,
        messenger: Arc<dyn BaseMessenger>,
        settings: QuestSettings,
        tracks: RoleTierTable,
    ) -> Self {
        Self {
            sheets,
            guild,
            messenger,
            settings: Arc::new(settings),
            tracks: Arc::new(tracks),
            pending: PendingSubmissions::new(),
            member_locks: KeyedLocks::new(),
        }
    }
}
