//! Minimal Discord REST client.
//!
//! Covers the handful of endpoints a review bot needs: channel messages,
//! direct messages, member role edits and interaction follow-ups. The wire
//! models for inbound interactions and outbound components live in
//! [`models`].
//!
//! # Example
//!
//! ```rust,ignore
//! use discord::{models::CreateMessage, DiscordClient};
//!
//! let client = DiscordClient::new("bot-token".into());
//! client
//!     .create_message(1374778866903814214, &CreateMessage::text("hello"))
//!     .await?;
//! ```

pub mod error;
pub mod models;

pub use error::{DiscordError, Result};

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::models::{Channel, CreateMessage, GuildMember, Message, User};

const BASE_URL: &str = "https://discord.com/api/v10";

const USER_AGENT: &str = concat!(
    "DiscordBot (https://github.com/discord/discord-api-docs, ",
    env!("CARGO_PKG_VERSION"),
    ")"
);

#[derive(Debug, Clone)]
pub struct DiscordClient {
    client: reqwest::Client,
    token: String,
}

impl DiscordClient {
    pub fn new(token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", BASE_URL, path))
            .header("Authorization", format!("Bot {}", self.token))
            .header("User-Agent", USER_AGENT)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let resp = request.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DiscordError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(resp.json().await?)
    }

    async fn send_empty(&self, request: RequestBuilder) -> Result<()> {
        let resp = request.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DiscordError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(())
    }

    /// The bot's own user.
    pub async fn current_user(&self) -> Result<User> {
        self.send(self.request(Method::GET, "/users/@me")).await
    }

    /// Post a message to a channel.
    pub async fn create_message(&self, channel_id: u64, message: &CreateMessage) -> Result<Message> {
        let path = format!("/channels/{}/messages", channel_id);
        self.send(self.request(Method::POST, &path).json(message)).await
    }

    /// Edit a message previously posted by the bot.
    pub async fn edit_message(
        &self,
        channel_id: u64,
        message_id: u64,
        message: &CreateMessage,
    ) -> Result<Message> {
        let path = format!("/channels/{}/messages/{}", channel_id, message_id);
        self.send(self.request(Method::PATCH, &path).json(message)).await
    }

    /// Most recent messages in a channel, newest first (`limit` is capped at 100).
    pub async fn channel_messages(&self, channel_id: u64, limit: u8) -> Result<Vec<Message>> {
        let path = format!("/channels/{}/messages?limit={}", channel_id, limit.min(100));
        self.send(self.request(Method::GET, &path)).await
    }

    /// Open (or reuse) the DM channel with a user.
    pub async fn create_dm(&self, user_id: u64) -> Result<Channel> {
        let body = json!({ "recipient_id": user_id.to_string() });
        self.send(self.request(Method::POST, "/users/@me/channels").json(&body))
            .await
    }

    /// Send a direct message. Fails with 403 when the user disabled DMs.
    pub async fn send_direct_message(&self, user_id: u64, message: &CreateMessage) -> Result<Message> {
        let channel = self.create_dm(user_id).await?;
        let channel_id: u64 = channel.id.parse().map_err(|_| DiscordError::Api {
            status: 500,
            message: format!("DM channel id is not a snowflake: {}", channel.id),
        })?;
        self.create_message(channel_id, message).await
    }

    pub async fn guild_member(&self, guild_id: u64, user_id: u64) -> Result<GuildMember> {
        let path = format!("/guilds/{}/members/{}", guild_id, user_id);
        self.send(self.request(Method::GET, &path)).await
    }

    pub async fn add_member_role(&self, guild_id: u64, user_id: u64, role_id: u64) -> Result<()> {
        let path = format!("/guilds/{}/members/{}/roles/{}", guild_id, user_id, role_id);
        tracing::debug!(guild_id, user_id, role_id, "Adding member role");
        self.send_empty(self.request(Method::PUT, &path)).await
    }

    pub async fn remove_member_role(&self, guild_id: u64, user_id: u64, role_id: u64) -> Result<()> {
        let path = format!("/guilds/{}/members/{}/roles/{}", guild_id, user_id, role_id);
        tracing::debug!(guild_id, user_id, role_id, "Removing member role");
        self.send_empty(self.request(Method::DELETE, &path)).await
    }

    /// Follow-up message for an interaction that was already acknowledged.
    pub async fn create_followup(
        &self,
        application_id: u64,
        interaction_token: &str,
        message: &CreateMessage,
    ) -> Result<Message> {
        let path = format!("/webhooks/{}/{}", application_id, interaction_token);
        self.send(self.request(Method::POST, &path).json(message)).await
    }
}
