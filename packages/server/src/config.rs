use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

use crate::common::{ApplicationId, ChannelId, GuildId};

const DEFAULT_CATEGORIES: &str =
    "BeginnerQuests,ProcessQuests,LaborQuests_Lv1,LaborQuests_Lv2,LaborQuests_Lv3,MOONLOCK Lv.1";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub discord_token: String,
    pub discord_application_id: ApplicationId,
    /// Hex-encoded Ed25519 key used to verify interaction signatures
    pub discord_public_key: String,
    pub guild_id: GuildId,
    pub intake_channel_id: ChannelId,
    pub review_channel_id: ChannelId,
    pub google_sheet_id: String,
    /// Worksheet receiving decision records
    pub ledger_sheet_name: String,
    pub google_client_email: String,
    pub google_private_key: String,
    pub google_token_uri: String,
    pub categories: Vec<String>,
    pub role_sheet_prefix: String,
    pub role_tracks_path: Option<PathBuf>,
}

/// Workflow settings shared with every domain action through `ServerDeps`.
#[derive(Debug, Clone)]
pub struct QuestSettings {
    /// Fixed, ordered quest categories (one catalog worksheet each)
    pub categories: Vec<String>,
    pub intake_channel: ChannelId,
    pub review_channel: ChannelId,
    pub ledger_worksheet: String,
    /// Worksheets whose title starts with this prefix are role lookup sheets
    pub role_sheet_prefix: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            discord_token: env::var("DISCORD_TOKEN").context("DISCORD_TOKEN must be set")?,
            discord_application_id: snowflake_var("DISCORD_APPLICATION_ID")?,
            discord_public_key: env::var("DISCORD_PUBLIC_KEY")
                .context("DISCORD_PUBLIC_KEY must be set")?,
            guild_id: snowflake_var("DISCORD_GUILD_ID")?,
            intake_channel_id: snowflake_var("INTAKE_CHANNEL_ID")?,
            review_channel_id: snowflake_var("REVIEW_CHANNEL_ID")?,
            google_sheet_id: env::var("GOOGLE_SHEET_ID").context("GOOGLE_SHEET_ID must be set")?,
            ledger_sheet_name: env::var("GOOGLE_SHEET_NAME")
                .context("GOOGLE_SHEET_NAME must be set")?,
            google_client_email: env::var("GOOGLE_CLIENT_EMAIL")
                .context("GOOGLE_CLIENT_EMAIL must be set")?,
            // Keys pasted into .env files carry literal "\n" sequences
            google_private_key: env::var("GOOGLE_PRIVATE_KEY")
                .context("GOOGLE_PRIVATE_KEY must be set")?
                .replace("\\n", "\n"),
            google_token_uri: env::var("GOOGLE_TOKEN_URI")
                .unwrap_or_else(|_| sheets_client::default_token_uri()),
            categories: parse_list(
                &env::var("QUEST_CATEGORIES").unwrap_or_else(|_| DEFAULT_CATEGORIES.to_string()),
            ),
            role_sheet_prefix: env::var("ROLE_SHEET_PREFIX").unwrap_or_else(|_| "Role_".to_string()),
            role_tracks_path: env::var("ROLE_TRACKS_PATH").ok().map(PathBuf::from),
        })
    }

    pub fn quest_settings(&self) -> QuestSettings {
        QuestSettings {
            categories: self.categories.clone(),
            intake_channel: self.intake_channel_id,
            review_channel: self.review_channel_id,
            ledger_worksheet: self.ledger_sheet_name.clone(),
            role_sheet_prefix: self.role_sheet_prefix.clone(),
        }
    }
}

fn snowflake_var<T>(name: &str) -> Result<crate::common::Id<T>> {
    env::var(name)
        .with_context(|| format!("{} must be set", name))?
        .parse()
        .with_context(|| format!("{} must be a numeric Discord id", name))
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_keeps_order_and_drops_blanks() {
        assert_eq!(
            parse_list(" BeginnerQuests, ,ProcessQuests,MOONLOCK Lv.1 "),
            vec!["BeginnerQuests", "ProcessQuests", "MOONLOCK Lv.1"]
        );
    }

    #[test]
    fn test_default_categories_cover_every_labor_tier() {
        let categories = parse_list(DEFAULT_CATEGORIES);
        assert_eq!(categories.len(), 6);
        for tier in ["LaborQuests_Lv1", "LaborQuests_Lv2", "LaborQuests_Lv3"] {
            assert!(categories.iter().any(|c| c == tier), "missing {}", tier);
        }
        assert_eq!(categories[5], "MOONLOCK Lv.1");
    }
}
