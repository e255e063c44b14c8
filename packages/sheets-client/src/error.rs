//! Error types for the Sheets client.

use thiserror::Error;

/// Result type for Sheets client operations.
pub type Result<T> = std::result::Result<T, SheetsError>;

#[derive(Debug, Error)]
pub enum SheetsError {
    /// Service account credentials could not be used to sign a token
    #[error("Credential error: {0}")]
    Credentials(#[from] jsonwebtoken::errors::Error),

    /// Network error (connection failed, body could not be decoded)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// API error (non-2xx response from the token or Sheets endpoint)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}
