//! Start-up configuration
//!
//! Every option can be given as a flag or through its `TICKTICK_*`
//! environment variable; flags win.

use std::path::PathBuf;
use std::time::Duration;

use clap::{builder::BoolishValueParser, ArgAction, Parser};

use crate::auth::oauth::{DEFAULT_REDIRECT_URI, TOKEN_URL};
use crate::auth::{AuthSettings, ClientCredentials, TokenStore};
use crate::brief::DescOptions;
use crate::client::API_BASE;

#[derive(Debug, Clone, Parser)]
#[command(name = "ticktick-mcp")]
#[command(version, about = "MCP server for the TickTick Open API (stdio)")]
pub struct Config {
    /// OAuth application client id
    #[arg(long, env = "TICKTICK_CLIENT_ID", hide_env_values = true)]
    pub client_id: Option<String>,

    /// OAuth application client secret
    #[arg(long, env = "TICKTICK_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Use this access token as-is, skipping refresh and code exchange
    #[arg(long, env = "TICKTICK_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Refresh token stored alongside --access-token
    #[arg(long, env = "TICKTICK_REFRESH_TOKEN", hide_env_values = true)]
    pub refresh_token: Option<String>,

    /// One-time authorization code from the setup page
    #[arg(long, env = "TICKTICK_AUTH_CODE", hide_env_values = true)]
    pub auth_code: Option<String>,

    /// Include task descriptions in read tools by default
    #[arg(
        long,
        env = "TICKTICK_DESC",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub desc: bool,

    /// Show only the <brief> summary instead of full descriptions by default
    #[arg(
        long,
        env = "TICKTICK_DESC_COMPACT",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub desc_compact: bool,

    /// Token file (default: ~/.ticktick-mcp/tokens.json)
    #[arg(long, env = "TICKTICK_TOKEN_FILE")]
    pub token_file: Option<PathBuf>,

    /// REST API base URL
    #[arg(long, env = "TICKTICK_API_BASE", default_value = API_BASE)]
    pub api_base: String,

    /// OAuth token endpoint
    #[arg(long, env = "TICKTICK_TOKEN_URL", default_value = TOKEN_URL)]
    pub token_url: String,

    /// Redirect URI registered for the OAuth application
    #[arg(long, env = "TICKTICK_REDIRECT_URI", default_value = DEFAULT_REDIRECT_URI)]
    pub redirect_uri: String,

    /// Per-request HTTP timeout in seconds
    #[arg(long, env = "TICKTICK_HTTP_TIMEOUT_SECS", default_value_t = 30)]
    pub http_timeout_secs: u64,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn auth_settings(&self) -> AuthSettings {
        AuthSettings {
            credentials: ClientCredentials::from_parts(
                non_empty(&self.client_id),
                non_empty(&self.client_secret),
            ),
            access_token: non_empty(&self.access_token),
            refresh_token: non_empty(&self.refresh_token),
            auth_code: non_empty(&self.auth_code),
        }
    }

    pub fn desc_defaults(&self) -> DescOptions {
        DescOptions {
            desc: self.desc,
            desc_compact: self.desc_compact,
        }
    }

    pub fn token_store(&self) -> TokenStore {
        match &self.token_file {
            Some(path) => TokenStore::new(path.clone()),
            None => TokenStore::default(),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["ticktick-mcp"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_flag_defaults() {
        let config = parse(&[]);
        assert_eq!(config.api_base, API_BASE);
        assert_eq!(config.token_url, TOKEN_URL);
        assert_eq!(config.redirect_uri, DEFAULT_REDIRECT_URI);
        assert_eq!(config.http_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_boolish_desc_flags() {
        let config = parse(&["--desc", "false", "--desc-compact", "no"]);
        assert_eq!(
            config.desc_defaults(),
            DescOptions {
                desc: false,
                desc_compact: false
            }
        );

        let config = parse(&["--desc", "1", "--desc-compact", "off"]);
        assert!(config.desc);
        assert!(!config.desc_compact);
    }

    #[test]
    fn test_auth_settings_drop_blank_values() {
        let config = parse(&[
            "--client-id",
            "cid",
            "--client-secret",
            "secret",
            "--access-token",
            " ",
            "--auth-code",
            "code",
        ]);
        let settings = config.auth_settings();
        assert_eq!(settings.credentials.unwrap().client_id, "cid");
        assert!(settings.access_token.is_none());
        assert_eq!(settings.auth_code.as_deref(), Some("code"));
    }

    #[test]
    fn test_token_file_override() {
        let config = parse(&["--token-file", "/tmp/ticktick/tokens.json"]);
        assert_eq!(
            config.token_store().path(),
            std::path::Path::new("/tmp/ticktick/tokens.json")
        );
    }

    #[test]
    fn test_command_is_well_formed() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
