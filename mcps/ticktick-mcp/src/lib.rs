//! TickTick MCP Library
//!
//! MCP tools for the TickTick Open API: projects, tasks, the Inbox and a
//! "due today or overdue" view.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use clap::Parser;
//! use ticktick_mcp::{Config, TickTickServer};
//!
//! let server = TickTickServer::from_config(&Config::parse())?;
//! mcp_common::serve_stdio(&server).await?;
//! ```
//!
//! # Authentication
//! OAuth tokens are kept in `~/.ticktick-mcp/tokens.json` and refreshed when
//! they expire or the API answers 401. First-time setup exchanges a one-time
//! authorization code (`TICKTICK_AUTH_CODE`) for tokens.

pub mod auth;
pub mod brief;
pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod params;
pub mod registry;
pub mod server;
pub mod types;

// Re-export main server type
pub use server::TickTickServer;

pub use brief::{extract_brief, inject_brief, process_tasks, DescOptions, NO_BRIEF};
pub use client::TickTickClient;
pub use config::Config;
pub use error::{TickTickError, TickTickResult};
pub use registry::ToolRegistry;
