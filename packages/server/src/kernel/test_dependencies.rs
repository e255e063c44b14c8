// TestDependencies - mock implementations for testing
//
// Provides in-memory sheet, guild and messenger services that can be injected
// into ServerDeps for tests. Every mock records its calls and supports failure
// injection so the best-effort paths of the review workflow can be exercised.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use discord::models::{CreateMessage, Message, User};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use super::{BaseGuildService, BaseMessenger, BaseSheetStore, MessageRef, ServerDeps};
use crate::common::{ChannelId, MessageId, RoleId, UserId};
use crate::config::QuestSettings;
use crate::domains::roles::RoleTierTable;

// =============================================================================
// Mock Sheet Store
// =============================================================================

fn owned_rows(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect()
}

/// Ordered, in-memory worksheets.
pub struct MockSheetStore {
    worksheets: Arc<Mutex<Vec<(String, Vec<Vec<String>>)>>>,
    append_calls: Arc<Mutex<Vec<(String, Vec<String>)>>>,
    read_calls: Arc<Mutex<Vec<String>>>,
    append_failure: Arc<Mutex<Option<String>>>,
    read_failure: Arc<Mutex<Option<String>>>,
}

impl MockSheetStore {
    pub fn new() -> Self {
        Self {
            worksheets: Arc::new(Mutex::new(Vec::new())),
            append_calls: Arc::new(Mutex::new(Vec::new())),
            read_calls: Arc::new(Mutex::new(Vec::new())),
            append_failure: Arc::new(Mutex::new(None)),
            read_failure: Arc::new(Mutex::new(None)),
        }
    }

    /// Add a worksheet with raw rows (header included). Tab order = call order.
    pub fn with_worksheet(self, title: &str, rows: &[&[&str]]) -> Self {
        self.worksheets
            .lock()
            .unwrap()
            .push((title.to_string(), owned_rows(rows)));
        self
    }

    /// Add a catalog worksheet: header `Quest` followed by the titles.
    pub fn with_catalog(self, category: &str, titles: &[&str]) -> Self {
        let mut rows = vec![vec!["Quest".to_string()]];
        rows.extend(titles.iter().map(|t| vec![t.to_string()]));
        self.worksheets
            .lock()
            .unwrap()
            .push((category.to_string(), rows));
        self
    }

    /// Add a role lookup sheet: header followed by `(quest key, role id)` rows.
    pub fn with_role_sheet(self, title: &str, mappings: &[(&str, &str)]) -> Self {
        let mut rows = vec![vec!["Quest".to_string(), "RoleId".to_string()]];
        rows.extend(
            mappings
                .iter()
                .map(|(key, role)| vec![key.to_string(), role.to_string()]),
        );
        self.worksheets
            .lock()
            .unwrap()
            .push((title.to_string(), rows));
        self
    }

    /// Every append fails with `message`.
    pub fn failing_appends(self, message: &str) -> Self {
        *self.append_failure.lock().unwrap() = Some(message.to_string());
        self
    }

    /// Every read fails with `message`.
    pub fn failing_reads(self, message: &str) -> Self {
        *self.read_failure.lock().unwrap() = Some(message.to_string());
        self
    }

    /// All append attempts, successful or not, in call order
    pub fn append_calls(&self) -> Vec<(String, Vec<String>)> {
        self.append_calls.lock().unwrap().clone()
    }

    /// Rows currently stored in a worksheet, header included
    pub fn rows_of(&self, title: &str) -> Vec<Vec<String>> {
        self.worksheets
            .lock()
            .unwrap()
            .iter()
            .find(|(t, _)| t == title)
            .map(|(_, rows)| rows.clone())
            .unwrap_or_default()
    }

    /// Worksheets whose rows were read, in call order
    pub fn read_calls(&self) -> Vec<String> {
        self.read_calls.lock().unwrap().clone()
    }
}

impl Default for MockSheetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseSheetStore for MockSheetStore {
    async fn worksheet_titles(&self) -> Result<Vec<String>> {
        if let Some(message) = self.read_failure.lock().unwrap().clone() {
            return Err(anyhow!(message));
        }
        Ok(self
            .worksheets
            .lock()
            .unwrap()
            .iter()
            .map(|(title, _)| title.clone())
            .collect())
    }

    async fn rows(&self, worksheet: &str) -> Result<Vec<Vec<String>>> {
        self.read_calls.lock().unwrap().push(worksheet.to_string());
        if let Some(message) = self.read_failure.lock().unwrap().clone() {
            return Err(anyhow!(message));
        }
        self.worksheets
            .lock()
            .unwrap()
            .iter()
            .find(|(title, _)| title == worksheet)
            .map(|(_, rows)| rows.clone())
            .ok_or_else(|| anyhow!("Unable to parse range: {}", worksheet))
    }

    async fn append_row(&self, worksheet: &str, row: Vec<String>) -> Result<()> {
        self.append_calls
            .lock()
            .unwrap()
            .push((worksheet.to_string(), row.clone()));
        if let Some(message) = self.append_failure.lock().unwrap().clone() {
            return Err(anyhow!(message));
        }

        let mut worksheets = self.worksheets.lock().unwrap();
        match worksheets.iter_mut().find(|(title, _)| title == worksheet) {
            Some((_, rows)) => rows.push(row),
            None => worksheets.push((worksheet.to_string(), vec![row])),
        }
        Ok(())
    }
}

// =============================================================================
// Mock Guild
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuildCall {
    AddRole(UserId, RoleId),
    RemoveRole(UserId, RoleId),
}

pub struct MockGuild {
    members: Arc<Mutex<HashMap<UserId, Vec<RoleId>>>>,
    calls: Arc<Mutex<Vec<GuildCall>>>,
    failing_roles: Arc<Mutex<HashSet<RoleId>>>,
}

impl MockGuild {
    pub fn new() -> Self {
        Self {
            members: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            failing_roles: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn with_member(self, user: UserId, roles: &[u64]) -> Self {
        self.members
            .lock()
            .unwrap()
            .insert(user, roles.iter().copied().map(RoleId::new).collect());
        self
    }

    /// Adding or removing this role fails.
    pub fn failing_role(self, role: u64) -> Self {
        self.failing_roles.lock().unwrap().insert(RoleId::new(role));
        self
    }

    /// Roles the member holds now, sorted
    pub fn roles_of(&self, user: UserId) -> Vec<RoleId> {
        let mut roles = self
            .members
            .lock()
            .unwrap()
            .get(&user)
            .cloned()
            .unwrap_or_default();
        roles.sort();
        roles
    }

    pub fn calls(&self) -> Vec<GuildCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn removed(&self) -> Vec<RoleId> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                GuildCall::RemoveRole(_, role) => Some(role),
                GuildCall::AddRole(..) => None,
            })
            .collect()
    }

    fn check(&self, role: RoleId) -> Result<()> {
        if self.failing_roles.lock().unwrap().contains(&role) {
            return Err(anyhow!("Missing Permissions for role {}", role));
        }
        Ok(())
    }
}

impl Default for MockGuild {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseGuildService for MockGuild {
    async fn member_roles(&self, user: UserId) -> Result<Option<Vec<RoleId>>> {
        Ok(self.members.lock().unwrap().get(&user).cloned())
    }

    async fn add_role(&self, user: UserId, role: RoleId) -> Result<()> {
        self.calls.lock().unwrap().push(GuildCall::AddRole(user, role));
        self.check(role)?;

        let mut members = self.members.lock().unwrap();
        let roles = members
            .get_mut(&user)
            .ok_or_else(|| anyhow!("Unknown Member {}", user))?;
        if !roles.contains(&role) {
            roles.push(role);
        }
        Ok(())
    }

    async fn remove_role(&self, user: UserId, role: RoleId) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(GuildCall::RemoveRole(user, role));
        self.check(role)?;

        let mut members = self.members.lock().unwrap();
        let roles = members
            .get_mut(&user)
            .ok_or_else(|| anyhow!("Unknown Member {}", user))?;
        roles.retain(|r| *r != role);
        Ok(())
    }
}

// =============================================================================
// Mock Messenger
// =============================================================================

/// A message posted to a channel (by the bot or seeded by a test)
#[derive(Debug, Clone)]
pub struct PostedMessage {
    pub target: MessageRef,
    pub author: UserId,
    pub body: CreateMessage,
}

pub struct MockMessenger {
    bot_id: UserId,
    next_id: Arc<Mutex<u64>>,
    history: Arc<Mutex<Vec<PostedMessage>>>,
    edits: Arc<Mutex<Vec<(MessageRef, CreateMessage)>>>,
    direct_messages: Arc<Mutex<Vec<(UserId, CreateMessage)>>>,
    followups: Arc<Mutex<Vec<(String, CreateMessage)>>>,
    closed_dms: Arc<Mutex<HashSet<UserId>>>,
    failing_channels: Arc<Mutex<HashSet<ChannelId>>>,
    failing_edits: Arc<Mutex<bool>>,
}

impl MockMessenger {
    pub const BOT_ID: u64 = 9000;

    pub fn new() -> Self {
        Self {
            bot_id: UserId::new(Self::BOT_ID),
            next_id: Arc::new(Mutex::new(1)),
            history: Arc::new(Mutex::new(Vec::new())),
            edits: Arc::new(Mutex::new(Vec::new())),
            direct_messages: Arc::new(Mutex::new(Vec::new())),
            followups: Arc::new(Mutex::new(Vec::new())),
            closed_dms: Arc::new(Mutex::new(HashSet::new())),
            failing_channels: Arc::new(Mutex::new(HashSet::new())),
            failing_edits: Arc::new(Mutex::new(false)),
        }
    }

    /// Seed channel history with a message from `author`.
    pub fn with_history(self, channel: ChannelId, author: UserId, body: CreateMessage) -> Self {
        let target = MessageRef {
            channel_id: channel,
            message_id: self.mint_id(),
        };
        self.history.lock().unwrap().push(PostedMessage {
            target,
            author,
            body,
        });
        self
    }

    /// DMs to this user fail (DMs closed).
    pub fn with_closed_dms(self, user: UserId) -> Self {
        self.closed_dms.lock().unwrap().insert(user);
        self
    }

    /// Posts to this channel fail.
    pub fn failing_channel(self, channel: ChannelId) -> Self {
        self.failing_channels.lock().unwrap().insert(channel);
        self
    }

    pub fn failing_edits(self) -> Self {
        *self.failing_edits.lock().unwrap() = true;
        self
    }

    pub fn bot_id(&self) -> UserId {
        self.bot_id
    }

    /// Messages the bot posted to a channel, oldest first
    pub fn posts_to(&self, channel: ChannelId) -> Vec<CreateMessage> {
        self.history
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.target.channel_id == channel && m.author == self.bot_id)
            .map(|m| m.body.clone())
            .collect()
    }

    pub fn edits(&self) -> Vec<(MessageRef, CreateMessage)> {
        self.edits.lock().unwrap().clone()
    }

    pub fn direct_messages(&self) -> Vec<(UserId, CreateMessage)> {
        self.direct_messages.lock().unwrap().clone()
    }

    pub fn followups(&self) -> Vec<(String, CreateMessage)> {
        self.followups.lock().unwrap().clone()
    }

    fn mint_id(&self) -> MessageId {
        let mut next = self.next_id.lock().unwrap();
        let id = MessageId::new(*next);
        *next += 1;
        id
    }
}

impl Default for MockMessenger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseMessenger for MockMessenger {
    async fn bot_user_id(&self) -> Result<UserId> {
        Ok(self.bot_id)
    }

    async fn post(&self, channel: ChannelId, message: CreateMessage) -> Result<MessageRef> {
        if self.failing_channels.lock().unwrap().contains(&channel) {
            return Err(anyhow!("Missing Access to channel {}", channel));
        }
        let target = MessageRef {
            channel_id: channel,
            message_id: self.mint_id(),
        };
        self.history.lock().unwrap().push(PostedMessage {
            target,
            author: self.bot_id,
            body: message,
        });
        Ok(target)
    }

    async fn edit(&self, target: MessageRef, message: CreateMessage) -> Result<()> {
        if *self.failing_edits.lock().unwrap() {
            return Err(anyhow!("Unknown Message {}", target.message_id));
        }
        self.edits.lock().unwrap().push((target, message));
        Ok(())
    }

    async fn direct_message(&self, user: UserId, message: CreateMessage) -> Result<()> {
        if self.closed_dms.lock().unwrap().contains(&user) {
            return Err(anyhow!("Cannot send messages to this user"));
        }
        self.direct_messages.lock().unwrap().push((user, message));
        Ok(())
    }

    async fn recent_messages(&self, channel: ChannelId, limit: u8) -> Result<Vec<Message>> {
        Ok(self
            .history
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|m| m.target.channel_id == channel)
            .take(limit as usize)
            .map(|m| Message {
                id: m.target.message_id.to_string(),
                channel_id: channel.to_string(),
                author: Some(User {
                    id: m.author.to_string(),
                    username: String::new(),
                    bot: m.author == self.bot_id,
                }),
                content: m.body.content.clone().unwrap_or_default(),
                components: m.body.components.clone(),
            })
            .collect())
    }

    async fn followup(&self, interaction_token: &str, message: CreateMessage) -> Result<()> {
        self.followups
            .lock()
            .unwrap()
            .push((interaction_token.to_string(), message));
        Ok(())
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

pub const TEST_INTAKE_CHANNEL: u64 = 100;
pub const TEST_REVIEW_CHANNEL: u64 = 200;
pub const TEST_LEDGER_SHEET: &str = "Ledger";

pub fn test_settings() -> QuestSettings {
    QuestSettings {
        categories: vec![
            "BeginnerQuests".to_string(),
            "ProcessQuests".to_string(),
            "LaborQuests_Lv1".to_string(),
            "LaborQuests_Lv2".to_string(),
            "LaborQuests_Lv3".to_string(),
        ],
        intake_channel: ChannelId::new(TEST_INTAKE_CHANNEL),
        review_channel: ChannelId::new(TEST_REVIEW_CHANNEL),
        ledger_worksheet: TEST_LEDGER_SHEET.to_string(),
        role_sheet_prefix: "Role_".to_string(),
    }
}

#[derive(Clone)]
pub struct TestDependencies {
    pub sheets: Arc<MockSheetStore>,
    pub guild: Arc<MockGuild>,
    pub messenger: Arc<MockMessenger>,
    pub settings: QuestSettings,
    pub tracks: RoleTierTable,
}

impl TestDependencies {
    /// Empty stores, default settings and the built-in track table.
    pub fn new() -> Self {
        Self {
            sheets: Arc::new(MockSheetStore::new()),
            guild: Arc::new(MockGuild::new()),
            messenger: Arc::new(MockMessenger::new()),
            settings: test_settings(),
            tracks: RoleTierTable::builtin().unwrap(),
        }
    }

    pub fn mock_sheets(mut self, sheets: MockSheetStore) -> Self {
        self.sheets = Arc::new(sheets);
        self
    }

    pub fn mock_guild(mut self, guild: MockGuild) -> Self {
        self.guild = Arc::new(guild);
        self
    }

    pub fn mock_messenger(mut self, messenger: MockMessenger) -> Self {
        self.messenger = Arc::new(messenger);
        self
    }

    pub fn settings(mut self, settings: QuestSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn tracks(mut self, tracks: RoleTierTable) -> Self {
        self.tracks = tracks;
        self
    }

    /// Build ServerDeps sharing these mocks (inspect them afterwards through `self`)
    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.sheets.clone(),
            self.guild.clone(),
            self.messenger.clone(),
            self.settings.clone(),
            self.tracks.clone(),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
