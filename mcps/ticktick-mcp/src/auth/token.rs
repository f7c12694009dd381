//! Persisted OAuth credential bundle

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Tokens are treated as expired this long before `expires_at`
pub const EXPIRY_BUFFER_MS: i64 = 60_000;

/// OAuth tokens as stored in `tokens.json`
///
/// Always written whole; `expires_at` is milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl TokenSet {
    /// A token supplied from configuration, with no known expiry
    pub fn from_access_token(access_token: String, refresh_token: Option<String>) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: None,
            expires_at: None,
            scope: None,
        }
    }

    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        self.expires_at
            .is_some_and(|expires_at| now_ms > expires_at.saturating_sub(EXPIRY_BUFFER_MS))
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(now_ms())
    }
}

pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
