//! Inbox and today-view handlers

use mcp_common::{json_success, CallToolResult, McpError};
use serde_json::json;

use super::ToolContext;
use crate::brief::{process_project_data, process_tasks};
use crate::params::TaskViewParams;

/// Inbox project with its tasks
pub async fn get_inbox(
    ctx: &ToolContext,
    params: TaskViewParams,
) -> Result<CallToolResult, McpError> {
    let data = ctx.client.get_inbox_with_data().await?;
    json_success(&process_project_data(data, ctx.view(params)))
}

pub async fn get_inbox_id(ctx: &ToolContext) -> Result<CallToolResult, McpError> {
    let inbox_id = ctx.client.get_inbox_id().await?;
    json_success(&json!({ "inboxId": inbox_id }))
}

/// Open tasks due today or overdue, across all projects
pub async fn get_today(
    ctx: &ToolContext,
    params: TaskViewParams,
) -> Result<CallToolResult, McpError> {
    let tasks = ctx.client.get_today().await?;
    json_success(&*process_tasks(&tasks, ctx.view(params)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brief::DescOptions;
    use crate::client::transport::testing::*;
    use crate::handlers::testing::{context, path_of, text_of};
    use reqwest::Method;
    use serde_json::Value;

    fn inbox_transport() -> std::sync::Arc<FakeTransport> {
        FakeTransport::new(|request| match (request.method.as_str(), path_of(&request.url)) {
            ("POST", "/task") => json(200, json!({"id": "probe", "projectId": "inbox7"})),
            ("DELETE", _) => empty(200),
            ("GET", "/project") => json(200, json!([])),
            ("GET", "/project/inbox7/data") => json(
                200,
                json!({
                    "project": {"id": "inbox7"},
                    "tasks": [{
                        "id": "t1",
                        "title": "Pay rent",
                        "content": "<brief>rent</brief> bank details...",
                        "dueDate": "2020-01-01T09:00:00.000+0000",
                        "status": 0
                    }]
                }),
            ),
            _ => text(404, "not found"),
        })
    }

    #[tokio::test]
    async fn test_get_inbox_id_shape() {
        let transport = inbox_transport();
        let (_dir, ctx) = context(transport, DescOptions::default());

        let result = get_inbox_id(&ctx).await.unwrap();
        let body: Value = serde_json::from_str(&text_of(&result)).unwrap();
        assert_eq!(body, json!({"inboxId": "inbox7"}));
    }

    #[tokio::test]
    async fn test_get_inbox_uses_default_compaction() {
        let transport = inbox_transport();
        let (_dir, ctx) = context(transport.clone(), DescOptions::default());

        let result = get_inbox(&ctx, TaskViewParams::default()).await.unwrap();
        let body: Value = serde_json::from_str(&text_of(&result)).unwrap();
        let task = &body["tasks"][0];
        assert_eq!(task["brief"], "rent");
        assert!(task.get("content").is_none());
        assert_eq!(body["project"]["id"], "inbox7");

        get_inbox(&ctx, TaskViewParams::default()).await.unwrap();
        assert_eq!(transport.count(Method::POST, "/task"), 1);
    }

    #[tokio::test]
    async fn test_get_today_respects_per_call_flags() {
        let transport = inbox_transport();
        let (_dir, ctx) = context(transport, DescOptions::default());

        let full = TaskViewParams {
            desc: Some(true),
            desc_compact: Some(false),
        };
        let result = get_today(&ctx, full).await.unwrap();
        let body: Value = serde_json::from_str(&text_of(&result)).unwrap();
        assert_eq!(body[0]["content"], "<brief>rent</brief> bank details...");
        assert!(body[0].get("brief").is_none());

        let none = TaskViewParams {
            desc: Some(false),
            desc_compact: None,
        };
        let result = get_today(&ctx, none).await.unwrap();
        let body: Value = serde_json::from_str(&text_of(&result)).unwrap();
        assert!(body[0].get("content").is_none());
        assert!(body[0].get("brief").is_none());
        assert_eq!(body[0]["title"], "Pay rent");
    }
}
