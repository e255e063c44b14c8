//! Error types for the Discord client.

use thiserror::Error;

/// Result type for Discord client operations.
pub type Result<T> = std::result::Result<T, DiscordError>;

/// Discord client errors.
#[derive(Debug, Error)]
pub enum DiscordError {
    /// Network error (connection failed, body could not be decoded)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// API error (non-2xx response)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl DiscordError {
    /// True when Discord answered 404 (unknown member, channel or message).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}
