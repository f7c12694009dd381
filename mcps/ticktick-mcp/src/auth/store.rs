//! On-disk token store (`~/.ticktick-mcp/tokens.json` by default)

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, warn};

use super::token::TokenSet;
use crate::error::TickTickResult;

const TOKEN_DIR: &str = ".ticktick-mcp";
const TOKEN_FILE: &str = "tokens.json";

/// Single-record JSON store for the current [`TokenSet`]
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.ticktick-mcp/tokens.json`, falling back to the working directory
    /// when no home directory is known
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(TOKEN_DIR)
            .join(TOKEN_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the store with `tokens`, creating the directory if needed
    pub async fn save(&self, tokens: &TokenSet) -> TickTickResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(tokens)?;
        fs::write(&self.path, json).await?;
        debug!(path = %self.path.display(), "tokens saved");
        Ok(())
    }

    /// Current tokens, or `None` when the file is missing or unreadable
    ///
    /// A corrupt file means "not logged in" and forces re-authentication.
    pub async fn load(&self) -> Option<TokenSet> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot read token file");
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(tokens) => Some(tokens),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unparsable token file");
                None
            }
        }
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}
