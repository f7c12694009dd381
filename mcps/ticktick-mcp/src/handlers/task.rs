//! Task handler implementations

use mcp_common::{invalid_params, json_success, text_success, CallToolResult, JsonObject, McpError};
use serde_json::Value;

use super::{check_priority, ToolContext};
use crate::brief::{inject_brief, process_task};
use crate::params::*;

pub async fn get_task(
    ctx: &ToolContext,
    params: GetTaskParams,
) -> Result<CallToolResult, McpError> {
    let task = ctx
        .client
        .get_task(&params.project_id, &params.task_id)
        .await?;
    json_success(&*process_task(&task, ctx.view(params.view)))
}

/// Create a task; a `brief` is written into `content`
pub async fn create_task(
    ctx: &ToolContext,
    params: CreateTaskParams,
) -> Result<CallToolResult, McpError> {
    let (mut payload, brief) = params.fields.into_payload();
    check_priority(payload.priority)?;

    payload.title = Some(params.title);
    payload.project_id = params.project_id;
    if let Some(brief) = brief {
        payload.content = Some(inject_brief(&brief, payload.content.as_deref()));
    }

    let task = ctx.client.create_task(&payload).await?;
    json_success(&task)
}

/// Update only the given fields
///
/// A `brief` without `content` is merged into the task's current content,
/// which costs one extra read.
pub async fn update_task(
    ctx: &ToolContext,
    params: UpdateTaskParams,
) -> Result<CallToolResult, McpError> {
    let (mut payload, brief) = params.fields.into_payload();
    check_priority(payload.priority)?;

    if let Some(brief) = brief {
        let content = match payload.content.take() {
            Some(content) => Some(content),
            None => {
                ctx.client
                    .get_task(&params.project_id, &params.task_id)
                    .await?
                    .content
            }
        };
        payload.content = Some(inject_brief(&brief, content.as_deref()));
    }

    payload.id = Some(params.task_id.clone());
    payload.project_id = Some(params.project_id);
    payload.title = params.title;

    let task = ctx.client.update_task(&params.task_id, &payload).await?;
    json_success(&task)
}

pub async fn complete_task(
    ctx: &ToolContext,
    params: TaskRefParams,
) -> Result<CallToolResult, McpError> {
    ctx.client
        .complete_task(&params.project_id, &params.task_id)
        .await?;
    Ok(text_success(format!(
        "Task {} marked as completed.",
        params.task_id
    )))
}

pub async fn delete_task(
    ctx: &ToolContext,
    params: TaskRefParams,
) -> Result<CallToolResult, McpError> {
    ctx.client
        .delete_task(&params.project_id, &params.task_id)
        .await?;
    Ok(text_success(format!("Task {} deleted.", params.task_id)))
}

/// Forward task objects as given, except that `brief` is folded into `content`
pub async fn batch_create_tasks(
    ctx: &ToolContext,
    params: BatchCreateTasksParams,
) -> Result<CallToolResult, McpError> {
    let tasks = params
        .tasks
        .into_iter()
        .map(fold_brief)
        .collect::<Result<Vec<_>, _>>()?;

    let result = ctx.client.batch_create_tasks(tasks).await?;
    json_success(&result)
}

fn fold_brief(mut task: JsonObject) -> Result<Value, McpError> {
    match task.remove("brief") {
        None | Some(Value::Null) => {}
        Some(Value::String(brief)) => {
            let content = inject_brief(&brief, task.get("content").and_then(Value::as_str));
            task.insert("content".to_string(), Value::String(content));
        }
        Some(_) => return Err(invalid_params("brief must be a string")),
    }
    Ok(Value::Object(task))
}
