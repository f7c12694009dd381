//! MCP Common - Shared plumbing for stdio MCP servers
//!
//! - **Initialization**: [`init_tracing`] sends logs to stderr
//! - **Transport**: [`serve_stdio`] runs the line-delimited JSON-RPC loop
//! - **Servers**: [`ToolServer`] is the seam between the loop and a tool set
//! - **Results / Errors**: helpers for building `CallToolResult` values and
//!   converting domain errors to `McpError`
//! - **Schemas**: [`input_schema`] derives a tool's JSON input schema
//!
//! # Example
//!
//! ```rust,ignore
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     mcp_common::init_tracing("my_mcp")?;
//!     let server = MyServer::new();
//!     mcp_common::serve_stdio(&server).await
//! }
//! ```

pub mod error;
pub mod init;
pub mod protocol;
pub mod result;
pub mod schema;
pub mod server;
pub mod stdio;

// Re-export commonly used items at crate root
pub use error::{internal_error, invalid_params, IntoMcpError};
pub use init::init_tracing;
pub use result::{error_result, json_success, text_success};
pub use schema::input_schema;
pub use server::{ToolError, ToolResult, ToolServer};
pub use stdio::{serve, serve_stdio};

// Re-export rmcp types that are commonly needed
pub use rmcp::{
    model::{CallToolResult, Content, JsonObject, Tool},
    ErrorData as McpError,
};

// Re-export async_trait for implementing ToolServer
pub use async_trait::async_trait;
