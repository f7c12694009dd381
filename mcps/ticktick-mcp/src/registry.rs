//! Tool table: name, description, input schema and handler for every tool
//!
//! Built once at start-up and read-only afterwards.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use mcp_common::{input_schema, CallToolResult, McpError, Tool, ToolError, ToolResult};
use serde_json::Value;

use crate::handlers::{self, parse_params, ToolContext};
use crate::params::*;

pub type HandlerFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CallToolResult, McpError>> + Send + 'a>>;

/// Type-erased handler: raw JSON arguments in, tool result out
pub type Handler = for<'a> fn(&'a ToolContext, Value) -> HandlerFuture<'a>;

pub struct ToolDescriptor {
    pub tool: Tool,
    pub handler: Handler,
}

/// Adapts a typed handler to [`Handler`]
macro_rules! erase {
    ($wrapper:ident => $handler:path) => {
        fn $wrapper<'a>(ctx: &'a ToolContext, _args: Value) -> HandlerFuture<'a> {
            Box::pin($handler(ctx))
        }
    };
    ($wrapper:ident => $handler:path, $params:ty) => {
        fn $wrapper<'a>(ctx: &'a ToolContext, args: Value) -> HandlerFuture<'a> {
            Box::pin(async move {
                let params: $params = parse_params(args)?;
                $handler(ctx, params).await
            })
        }
    };
}

erase!(call_get_inbox => handlers::get_inbox, TaskViewParams);
erase!(call_get_inbox_id => handlers::get_inbox_id);
erase!(call_get_today => handlers::get_today, TaskViewParams);
erase!(call_list_projects => handlers::list_projects);
erase!(call_get_project => handlers::get_project, ProjectIdParams);
erase!(call_get_project_with_data => handlers::get_project_with_data, ProjectDataParams);
erase!(call_create_project => handlers::create_project, CreateProjectParams);
erase!(call_update_project => handlers::update_project, UpdateProjectParams);
erase!(call_delete_project => handlers::delete_project, ProjectIdParams);
erase!(call_get_task => handlers::get_task, GetTaskParams);
erase!(call_create_task => handlers::create_task, CreateTaskParams);
erase!(call_update_task => handlers::update_task, UpdateTaskParams);
erase!(call_complete_task => handlers::complete_task, TaskRefParams);
erase!(call_delete_task => handlers::delete_task, TaskRefParams);
erase!(call_batch_create_tasks => handlers::batch_create_tasks, BatchCreateTasksParams);

fn descriptor<P: schemars::JsonSchema>(
    name: &'static str,
    description: &'static str,
    handler: Handler,
) -> ToolDescriptor {
    ToolDescriptor {
        tool: Tool::new(name, description, input_schema::<P>()),
        handler,
    }
}

fn descriptors() -> Vec<ToolDescriptor> {
    vec![
        // ── Inbox ───────────────────────────────────────────
        descriptor::<TaskViewParams>(
            "get_inbox",
            "Get the Inbox project with all its tasks. The Inbox is a special built-in project in \
             TickTick that is NOT included in list_projects. Use this tool whenever you need to see \
             inbox tasks. Returns the inbox project data including all tasks.",
            call_get_inbox,
        ),
        descriptor::<EmptyParams>(
            "get_inbox_id",
            "Get the Inbox project ID. Useful when you need the inbox projectId for other operations \
             like complete_task, delete_task, or update_task on inbox tasks. The inbox ID has the \
             format \"inbox<userId>\" and is unique per user.",
            call_get_inbox_id,
        ),
        descriptor::<TaskViewParams>(
            "get_today",
            "Get all uncompleted tasks that are due today or overdue, across the Inbox and every \
             project, sorted by due date. \"Today\" ends at midnight UTC.",
            call_get_today,
        ),
        // ── Projects ────────────────────────────────────────
        descriptor::<EmptyParams>(
            "list_projects",
            "List all TickTick projects (task lists). IMPORTANT: This does NOT include the Inbox, \
             use get_inbox to access inbox tasks.",
            call_list_projects,
        ),
        descriptor::<ProjectIdParams>(
            "get_project",
            "Get a TickTick project by ID",
            call_get_project,
        ),
        descriptor::<ProjectDataParams>(
            "get_project_with_data",
            "Get a TickTick project with all its tasks and columns. For inbox tasks, use \
             get_inbox instead.",
            call_get_project_with_data,
        ),
        descriptor::<CreateProjectParams>(
            "create_project",
            "Create a new TickTick project (task list)",
            call_create_project,
        ),
        descriptor::<UpdateProjectParams>(
            "update_project",
            "Update an existing TickTick project",
            call_update_project,
        ),
        descriptor::<ProjectIdParams>(
            "delete_project",
            "Delete a TickTick project",
            call_delete_project,
        ),
        // ── Tasks ───────────────────────────────────────────
        descriptor::<GetTaskParams>(
            "get_task",
            "Get a specific task by project ID and task ID",
            call_get_task,
        ),
        descriptor::<CreateTaskParams>(
            "create_task",
            "Create a new task in TickTick. If projectId is omitted, the task goes to Inbox. Supports \
             title, content, dates, priority (0=none, 1=low, 3=medium, 5=high), tags, subtasks \
             (items), reminders, and recurrence (repeatFlag in iCal RRULE format). The response \
             includes the assigned projectId (useful for getting the inbox ID).",
            call_create_task,
        ),
        descriptor::<UpdateTaskParams>(
            "update_task",
            "Update an existing task. Provide only the fields you want to change.",
            call_update_task,
        ),
        descriptor::<TaskRefParams>(
            "complete_task",
            "Mark a task as completed",
            call_complete_task,
        ),
        descriptor::<TaskRefParams>(
            "delete_task",
            "Delete a task from TickTick",
            call_delete_task,
        ),
        descriptor::<BatchCreateTasksParams>(
            "batch_create_tasks",
            "Create multiple tasks at once. Each task object supports the same fields as \
             create_task.",
            call_batch_create_tasks,
        ),
    ]
}

/// Name-indexed tool table
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        let tools = descriptors();
        let index = tools
            .iter()
            .enumerate()
            .map(|(i, d)| (d.tool.name.to_string(), i))
            .collect();
        Self { tools, index }
    }

    /// Tool definitions in registration order
    pub fn tools(&self) -> Vec<Tool> {
        self.tools.iter().map(|d| d.tool.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    /// Run the named tool
    pub async fn dispatch(
        &self,
        ctx: &ToolContext,
        name: &str,
        args: Value,
    ) -> ToolResult<CallToolResult> {
        let descriptor = self
            .get(name)
            .ok_or_else(|| ToolError::ToolNotFound(name.to_string()))?;
        (descriptor.handler)(ctx, args).await.map_err(ToolError::from)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
