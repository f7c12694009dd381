//! TickTick MCP Server
//!
//! Exposes the TickTick Open API as MCP tools over stdio.
//!
//! # Configuration
//! Set `TICKTICK_CLIENT_ID` / `TICKTICK_CLIENT_SECRET` plus either
//! `TICKTICK_AUTH_CODE` (first run) or `TICKTICK_ACCESS_TOKEN`.
//! See `ticktick-mcp --help` for the rest.

use clap::Parser;
use ticktick_mcp::{Config, TickTickServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mcp_common::init_tracing("ticktick_mcp")?;

    let config = Config::parse();
    tracing::info!(
        api_base = %config.api_base,
        desc = config.desc,
        desc_compact = config.desc_compact,
        "Starting TickTick MCP Server"
    );

    let server = TickTickServer::from_config(&config)?;
    mcp_common::serve_stdio(&server).await?;

    tracing::info!("TickTick MCP Server exited");
    Ok(())
}
