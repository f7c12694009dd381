//! Server initialization utilities
//!
//! Tracing setup shared by every stdio MCP server. Stdout carries the
//! JSON-RPC stream, so all diagnostics go to stderr.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging for an MCP server
///
/// - Writes to stderr without ANSI colors
/// - `RUST_LOG` when set, otherwise `<crate_name>=info,mcp_common=info`
/// - `LOG_FORMAT=json` switches to one JSON object per log line
///
/// ```rust,ignore
/// mcp_common::init_tracing("ticktick_mcp")?;
/// ```
pub fn init_tracing(crate_name: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directives(crate_name))?,
    };

    let registry = tracing_subscriber::registry().with(filter);

    if json_logs_requested() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

fn json_logs_requested() -> bool {
    std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

fn default_directives(crate_name: &str) -> String {
    format!("{crate_name}=info,mcp_common=info")
}
