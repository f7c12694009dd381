//! Result helpers for MCP tool responses
//!
//! Every tool answers with a single text content item: either a plain
//! sentence or pretty-printed JSON.

use rmcp::{
    model::{CallToolResult, Content},
    ErrorData as McpError,
};
use serde::Serialize;

/// Successful response carrying pretty-printed JSON
///
/// ```rust,ignore
/// fn list_projects(&self) -> Result<CallToolResult, McpError> {
///     let projects = fetch().await?;
///     json_success(&projects)
/// }
/// ```
pub fn json_success<T: Serialize + ?Sized>(data: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Successful plain text response
pub fn text_success(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Error-flagged response (`isError: true`) with a human readable message
pub fn error_result(message: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(message.into())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Inbox {
        #[serde(rename = "inboxId")]
        inbox_id: String,
    }

    #[test]
    fn test_json_success_is_pretty() {
        let result = json_success(&Inbox {
            inbox_id: "inbox123".to_string(),
        })
        .unwrap();
        assert!(!result.is_error.unwrap_or(false));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["content"][0]["text"], "{\n  \"inboxId\": \"inbox123\"\n}");
    }

    #[test]
    fn test_text_success() {
        let result = text_success("Task 1 deleted.");
        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(result.content.len(), 1);
    }

    #[test]
    fn test_error_result_sets_flag() {
        let result = error_result("Unknown tool: x");
        assert_eq!(result.is_error, Some(true));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["isError"], json!(true));
        assert_eq!(value["content"][0]["text"], "Unknown tool: x");
    }
}
