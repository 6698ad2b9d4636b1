//! Credential loading.
//!
//! The tool talks to the YouTube API with two distinct credentials: an API
//! key for reads and a pre-acquired OAuth2 bearer token for writes. Both
//! are resolved once at startup and handed to the client at construction
//! time; nothing else in the process reads the environment or the
//! filesystem for them.

use eyre::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding the credential file's API key.
pub const API_KEY_ENV: &str = "YT_API_KEY";

/// Environment variable overriding the credential file's bearer token.
pub const ACCESS_TOKEN_ENV: &str = "YT_ACCESS_TOKEN";

/// The two remote-call credentials, as stored in the credentials file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// API key sent as the `key` query parameter on read calls.
    pub api_key: String,
    /// OAuth2 bearer token sent in the `Authorization` header on write
    /// calls.
    ///
    /// Must carry the `https://www.googleapis.com/auth/youtube` scope for
    /// the destination playlist's owner. Acquiring and refreshing tokens
    /// is out of scope for this tool.
    pub access_token: String,
}

impl Credentials {
    /// Loads credentials from a JSON file, letting the environment
    /// override either field.
    ///
    /// The file may be absent entirely as long as both [`API_KEY_ENV`] and
    /// [`ACCESS_TOKEN_ENV`] are set.
    pub async fn load(path: &Path) -> eyre::Result<Self> {
        let mut api_key = None;
        let mut access_token = None;

        if tokio::fs::try_exists(path).await.unwrap_or(false) {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("read credentials file {}", path.display()))?;
            let stored: Credentials = serde_json::from_str(&raw)
                .with_context(|| format!("parse credentials file {}", path.display()))?;
            api_key = Some(stored.api_key);
            access_token = Some(stored.access_token);
        }

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            api_key = Some(key);
        }
        if let Ok(token) = std::env::var(ACCESS_TOKEN_ENV) {
            access_token = Some(token);
        }

        Ok(Credentials {
            api_key: api_key.ok_or_else(|| {
                eyre::eyre!("no API key in {} or ${API_KEY_ENV}", path.display())
            })?,
            access_token: access_token.ok_or_else(|| {
                eyre::eyre!("no access token in {} or ${ACCESS_TOKEN_ENV}", path.display())
            })?,
        })
    }
}
