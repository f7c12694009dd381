//! Error handling utilities for MCP tool handlers
//!
//! Handlers return `Result<CallToolResult, McpError>`; domain errors convert
//! through [`IntoMcpError`] so `?` works at the handler boundary.

use rmcp::ErrorData as McpError;

/// Conversion of a domain error into an MCP error
///
/// ```rust,ignore
/// impl IntoMcpError for TickTickError {
///     fn into_mcp_error(self) -> McpError {
///         internal_error(self.to_string())
///     }
/// }
/// ```
pub trait IntoMcpError {
    fn into_mcp_error(self) -> McpError;
}

pub fn internal_error(message: impl Into<String>) -> McpError {
    McpError::internal_error(message.into(), None)
}

/// Use when a tool receives arguments it cannot work with
pub fn invalid_params(message: impl Into<String>) -> McpError {
    McpError::invalid_params(message.into(), None)
}
