//! Project handler implementations

use mcp_common::{json_success, text_success, CallToolResult, McpError};

use super::ToolContext;
use crate::brief::process_project_data;
use crate::params::*;

pub async fn list_projects(ctx: &ToolContext) -> Result<CallToolResult, McpError> {
    let projects = ctx.client.list_projects().await?;
    json_success(&projects)
}

pub async fn get_project(
    ctx: &ToolContext,
    params: ProjectIdParams,
) -> Result<CallToolResult, McpError> {
    let project = ctx.client.get_project(&params.project_id).await?;
    json_success(&project)
}

/// Project with tasks and columns, descriptions rendered per the view flags
pub async fn get_project_with_data(
    ctx: &ToolContext,
    params: ProjectDataParams,
) -> Result<CallToolResult, McpError> {
    let data = ctx.client.get_project_with_data(&params.project_id).await?;
    json_success(&process_project_data(data, ctx.view(params.view)))
}

pub async fn create_project(
    ctx: &ToolContext,
    params: CreateProjectParams,
) -> Result<CallToolResult, McpError> {
    let project = ctx.client.create_project(&params.into()).await?;
    json_success(&project)
}

pub async fn update_project(
    ctx: &ToolContext,
    params: UpdateProjectParams,
) -> Result<CallToolResult, McpError> {
    let (project_id, updates) = params.into_parts();
    let project = ctx.client.update_project(&project_id, &updates).await?;
    json_success(&project)
}

pub async fn delete_project(
    ctx: &ToolContext,
    params: ProjectIdParams,
) -> Result<CallToolResult, McpError> {
    ctx.client.delete_project(&params.project_id).await?;
    Ok(text_success(format!("Project {} deleted.", params.project_id)))
}
