//! Tool server trait driven by the stdio loop
//!
//! A [`ToolServer`] owns a fixed set of tools and executes them by name.
//! [`crate::stdio::serve`] drives any implementation over a line-delimited
//! JSON-RPC stream, and the same trait lets a host call tools in-process.
//!
//! ```rust,ignore
//! use mcp_common::ToolServer;
//!
//! let tools = server.list_tools();
//! let result = server.call_tool("get_inbox_id", serde_json::json!({})).await?;
//! ```

use async_trait::async_trait;
use rmcp::model::{CallToolResult, ErrorCode, Tool};
use rmcp::ErrorData as McpError;
use serde_json::Value;

/// Error type for tool dispatch
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// No tool registered under this name
    #[error("Unknown tool: {0}")]
    ToolNotFound(String),

    /// Arguments did not match the tool's input schema
    #[error("{0}")]
    InvalidParams(String),

    /// The tool ran and failed
    #[error("{0}")]
    ExecutionError(String),
}

impl From<McpError> for ToolError {
    fn from(err: McpError) -> Self {
        let message = err.message.to_string();
        if err.code == ErrorCode::INVALID_PARAMS {
            ToolError::InvalidParams(message)
        } else {
            ToolError::ExecutionError(message)
        }
    }
}

pub type ToolResult<T> = Result<T, ToolError>;

/// A set of named tools that can be listed and invoked
///
/// Implementations must be `Send + Sync`; the stdio loop only ever runs one
/// call at a time but in-process hosts may share the server across tasks.
#[async_trait]
pub trait ToolServer: Send + Sync {
    /// Name reported in `serverInfo`
    fn server_name(&self) -> &str;

    fn server_version(&self) -> &str {
        "0.0.0"
    }

    /// Free-text usage hints returned from `initialize`
    fn instructions(&self) -> Option<&str> {
        None
    }

    /// All tools, in a stable order
    fn list_tools(&self) -> Vec<Tool>;

    /// Execute `name` with a JSON object of arguments
    ///
    /// Returns [`ToolError::ToolNotFound`] for unregistered names. Failures
    /// inside the tool come back as `Err` as well; the caller decides how to
    /// surface them.
    async fn call_tool(&self, name: &str, params: Value) -> ToolResult<CallToolResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EmptyServer;

    #[async_trait]
    impl ToolServer for EmptyServer {
        fn server_name(&self) -> &str {
            "empty"
        }

        fn list_tools(&self) -> Vec<Tool> {
            vec![]
        }

        async fn call_tool(&self, name: &str, _params: Value) -> ToolResult<CallToolResult> {
            Err(ToolError::ToolNotFound(name.to_string()))
        }
    }

    #[test]
    fn test_defaults() {
        let server = EmptyServer;
        assert_eq!(server.server_name(), "empty");
        assert_eq!(server.server_version(), "0.0.0");
        assert!(server.instructions().is_none());
        assert!(server.list_tools().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_tool_message_names_tool() {
        let err = EmptyServer
            .call_tool("nope", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::ToolNotFound(_)));
        assert_eq!(err.to_string(), "Unknown tool: nope");
    }

    #[test]
    fn test_mcp_error_keeps_message() {
        let err: ToolError = McpError::internal_error("remote blew up", None).into();
        assert!(matches!(err, ToolError::ExecutionError(_)));
        assert_eq!(err.to_string(), "remote blew up");
    }

    #[test]
    fn test_invalid_params_keeps_its_kind() {
        let err: ToolError = McpError::invalid_params("missing field `taskId`", None).into();
        assert!(matches!(err, ToolError::InvalidParams(_)));
        assert_eq!(err.to_string(), "missing field `taskId`");
    }
}
