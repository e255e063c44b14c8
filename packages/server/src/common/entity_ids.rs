//! Typed ID definitions for all domain entities.
//!
//! Chat-platform entities use snowflake-backed [`Id`]s; submissions are
//! minted locally and use a UUID v7.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use uuid::Uuid;

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for guild members / users.
pub struct User;

/// Marker type for guild roles.
pub struct Role;

/// Marker type for text channels (including DM channels).
pub struct Channel;

/// Marker type for channel messages.
pub struct Message;

/// Marker type for the guild (server) the bot manages.
pub struct Guild;

/// Marker type for the bot application.
pub struct Application;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

pub type UserId = Id<User>;

pub type RoleId = Id<Role>;

pub type ChannelId = Id<Channel>;

pub type MessageId = Id<Message>;

pub type GuildId = Id<Guild>;

pub type ApplicationId = Id<Application>;

// ============================================================================
// Submission ids
// ============================================================================

/// Identifier of a pending quest submission. Time-ordered (UUID v7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for SubmissionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
