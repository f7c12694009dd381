//! MCP server implementation
//!
//! Wires configuration into the client and exposes the tool registry through
//! [`ToolServer`]. Handler implementations are in the handlers/ module.

use std::sync::Arc;

use mcp_common::{async_trait, CallToolResult, Tool, ToolResult, ToolServer};
use serde_json::Value;
use tracing::debug;

use crate::auth::{AuthManager, OAuthClient};
use crate::client::{ReqwestTransport, TickTickClient, Transport};
use crate::config::Config;
use crate::error::TickTickResult;
use crate::handlers::ToolContext;
use crate::registry::ToolRegistry;

const INSTRUCTIONS: &str = "Tools for the TickTick task manager. The Inbox is not part of \
    list_projects: use get_inbox / get_inbox_id for it. get_today lists open tasks due today \
    or overdue. Read tools return a <brief> summary instead of full descriptions unless \
    descCompact=false.";

/// The TickTick MCP Server
pub struct TickTickServer {
    ctx: ToolContext,
    registry: ToolRegistry,
}

impl TickTickServer {
    pub fn new(ctx: ToolContext) -> Self {
        Self {
            ctx,
            registry: ToolRegistry::new(),
        }
    }

    /// Build the production stack: reqwest transport, token store, OAuth client
    pub fn from_config(config: &Config) -> TickTickResult<Self> {
        let transport: Arc<dyn Transport> =
            Arc::new(ReqwestTransport::new(config.http_timeout())?);
        let oauth = OAuthClient::new(transport.clone(), &config.token_url, &config.redirect_uri);
        let auth = AuthManager::new(config.auth_settings(), config.token_store(), oauth);
        let client = TickTickClient::new(transport, auth, &config.api_base);

        Ok(Self::new(ToolContext::new(client, config.desc_defaults())))
    }
}

#[async_trait]
impl ToolServer for TickTickServer {
    fn server_name(&self) -> &str {
        "ticktick"
    }

    fn server_version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn instructions(&self) -> Option<&str> {
        Some(INSTRUCTIONS)
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.registry.tools()
    }

    async fn call_tool(&self, name: &str, params: Value) -> ToolResult<CallToolResult> {
        debug!(tool = name, "dispatching");
        self.registry.dispatch(&self.ctx, name, params).await
    }
}
