//! Pure Google Sheets REST client.
//!
//! Treats a spreadsheet as a set of named worksheets holding rows of strings.
//! Supports listing worksheet titles in tab order, reading rows, and
//! appending a row. Authenticates as a service account via the OAuth2
//! JWT-bearer grant and caches the access token until shortly before expiry.
//!
//! # Example
//!
//! ```rust,ignore
//! use sheets_client::{ServiceAccount, SheetsClient};
//!
//! let client = SheetsClient::new(spreadsheet_id, account);
//! for title in client.worksheet_titles().await? {
//!     let rows = client.rows(&title).await?;
//!     println!("{title}: {} rows", rows.len());
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{Result, SheetsError};
pub use types::{default_token_uri, ServiceAccount, ValueRange};

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::de::DeserializeOwned;
use serde_json::json;
use tokio::sync::Mutex;

use types::{GrantClaims, Spreadsheet, TokenResponse};

const BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

const SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Refresh this long before the token actually expires.
const EXPIRY_MARGIN_SECS: i64 = 60;

struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

pub struct SheetsClient {
    client: reqwest::Client,
    spreadsheet_id: String,
    account: ServiceAccount,
    token: Mutex<Option<AccessToken>>,
}

impl SheetsClient {
    pub fn new(spreadsheet_id: String, account: ServiceAccount) -> Self {
        Self {
            client: reqwest::Client::new(),
            spreadsheet_id,
            account,
            token: Mutex::new(None),
        }
    }

    async fn access_token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > Utc::now() {
                return Ok(token.value.clone());
            }
        }

        let now = Utc::now();
        let claims = GrantClaims {
            iss: &self.account.client_email,
            scope: SCOPE,
            aud: &self.account.token_uri,
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };
        let key = EncodingKey::from_rsa_pem(self.account.private_key.as_bytes())?;
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &key)?;

        let resp = self
            .client
            .post(&self.account.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let token: TokenResponse = resp.json().await?;
        tracing::debug!(expires_in = token.expires_in, "Obtained Sheets access token");

        let value = token.access_token.clone();
        *cached = Some(AccessToken {
            value: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in - EXPIRY_MARGIN_SECS),
        });
        Ok(value)
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let token = self.access_token().await?;
        let resp = self.client.get(url).bearer_auth(token).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(resp.json().await?)
    }

    /// Worksheet titles in tab order.
    pub async fn worksheet_titles(&self) -> Result<Vec<String>> {
        let url = format!(
            "{}/{}?fields=sheets.properties.title",
            BASE_URL, self.spreadsheet_id
        );
        let spreadsheet: Spreadsheet = self.get(&url).await?;
        Ok(spreadsheet
            .sheets
            .into_iter()
            .map(|s| s.properties.title)
            .collect())
    }

    /// All rows of a worksheet, header included.
    pub async fn rows(&self, worksheet: &str) -> Result<Vec<Vec<String>>> {
        let url = format!(
            "{}/{}/values/{}?majorDimension=ROWS",
            BASE_URL,
            self.spreadsheet_id,
            urlencoding::encode(&quote_title(worksheet))
        );
        let range: ValueRange = self.get(&url).await?;
        Ok(range.values)
    }

    /// Append one row after the last non-empty row of a worksheet.
    pub async fn append_row(&self, worksheet: &str, row: Vec<String>) -> Result<()> {
        let url = append_url(&self.spreadsheet_id, worksheet);
        let token = self.access_token().await?;
        let resp = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&json!({ "values": [row] }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        tracing::debug!(worksheet, "Appended row");
        Ok(())
    }
}

/// A1 notation for a whole worksheet. Titles are always quoted so names with
/// spaces or dots ("MOONLOCK Lv.1") resolve.
fn quote_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// Values are stored as sent (`RAW`): ids keep every digit and text starting
/// with `=` stays text.
fn append_url(spreadsheet_id: &str, worksheet: &str) -> String {
    format!(
        "{}/{}/values/{}:append?valueInputOption=RAW&insertDataOption=INSERT_ROWS",
        BASE_URL,
        spreadsheet_id,
        urlencoding::encode(&quote_title(worksheet))
    )
}
