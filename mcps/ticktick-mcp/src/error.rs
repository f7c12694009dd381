//! Error types for TickTick operations

use mcp_common::{internal_error, IntoMcpError, McpError};
use thiserror::Error;

/// Where operators go to obtain an authorization code
pub const SETUP_URL: &str = "https://nikitatsym.github.io/ticktick-mcp/";

/// Errors that can occur while authenticating against or calling TickTick
#[derive(Error, Debug)]
pub enum TickTickError {
    /// No usable token through any resolution path
    #[error(
        "No authentication tokens found.\n\
         Visit {url} to set up authorization, then set TICKTICK_CLIENT_ID, \
         TICKTICK_CLIENT_SECRET and TICKTICK_AUTH_CODE (or TICKTICK_ACCESS_TOKEN).",
        url = SETUP_URL
    )]
    Unauthenticated,

    /// The OAuth token endpoint rejected an exchange or refresh
    #[error("Token {grant} failed ({status}): {body}")]
    TokenEndpoint {
        grant: &'static str,
        status: u16,
        body: String,
    },

    /// The REST API answered with status >= 400
    #[error("TickTick API error {status} {method} {path}: {body}")]
    Api {
        status: u16,
        method: String,
        path: String,
        body: String,
    },

    /// The request never produced a response
    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("unexpected response from TickTick: {0}")]
    InvalidResponse(String),

    #[error("token store error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for TickTick operations
pub type TickTickResult<T> = Result<T, TickTickError>;

impl IntoMcpError for TickTickError {
    fn into_mcp_error(self) -> McpError {
        internal_error(self.to_string())
    }
}

impl From<TickTickError> for McpError {
    fn from(e: TickTickError) -> Self {
        e.into_mcp_error()
    }
}
