//! Parameter types for TickTick MCP tools
//!
//! Field names are camelCase on the wire to match the TickTick API.

use mcp_common::JsonObject;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::{ProjectKind, ProjectPayload, SubtaskItem, TaskPayload, ViewMode};

/// Empty parameters for tools that take no arguments
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct EmptyParams {}

/// Description rendering flags shared by task-returning tools
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskViewParams {
    #[schemars(description = "Include task description text (content/desc). Defaults to the server setting")]
    #[serde(default)]
    pub desc: Option<bool>,

    #[schemars(
        description = "Replace description text with the <brief>...</brief> summary only. Defaults to the server setting"
    )]
    #[serde(default)]
    pub desc_compact: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectIdParams {
    #[schemars(description = "Project ID")]
    pub project_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDataParams {
    #[schemars(description = "Project ID")]
    pub project_id: String,

    #[serde(flatten)]
    pub view: TaskViewParams,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectParams {
    #[schemars(description = "Project name")]
    pub name: String,

    #[schemars(description = "Project color as hex, e.g. '#F18181'")]
    #[serde(default)]
    pub color: Option<String>,

    #[schemars(description = "How the project is displayed")]
    #[serde(default)]
    pub view_mode: Option<ViewMode>,

    #[schemars(description = "Project kind")]
    #[serde(default)]
    pub kind: Option<ProjectKind>,
}

impl From<CreateProjectParams> for ProjectPayload {
    fn from(params: CreateProjectParams) -> Self {
        Self {
            name: Some(params.name),
            color: params.color,
            view_mode: params.view_mode,
            kind: params.kind,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectParams {
    #[schemars(description = "Project ID")]
    pub project_id: String,

    #[schemars(description = "New project name")]
    #[serde(default)]
    pub name: Option<String>,

    #[schemars(description = "Project color as hex, e.g. '#F18181'")]
    #[serde(default)]
    pub color: Option<String>,

    #[schemars(description = "How the project is displayed")]
    #[serde(default)]
    pub view_mode: Option<ViewMode>,

    #[schemars(description = "Project kind")]
    #[serde(default)]
    pub kind: Option<ProjectKind>,
}

impl UpdateProjectParams {
    /// Split into the target id and the fields to change
    pub fn into_parts(self) -> (String, ProjectPayload) {
        (
            self.project_id,
            ProjectPayload {
                name: self.name,
                color: self.color,
                view_mode: self.view_mode,
                kind: self.kind,
            },
        )
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetTaskParams {
    #[schemars(description = "Project ID the task belongs to")]
    pub project_id: String,

    #[schemars(description = "Task ID")]
    pub task_id: String,

    #[serde(flatten)]
    pub view: TaskViewParams,
}

/// Identifies one task
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskRefParams {
    #[schemars(description = "Project ID the task belongs to")]
    pub project_id: String,

    #[schemars(description = "Task ID")]
    pub task_id: String,
}

/// Optional task fields shared by create and update
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskFields {
    #[schemars(description = "Task body text (markdown)")]
    #[serde(default)]
    pub content: Option<String>,

    #[schemars(description = "Checklist description")]
    #[serde(default)]
    pub desc: Option<String>,

    #[schemars(
        description = "Short summary stored in content as <brief>...</brief>, replacing any existing brief"
    )]
    #[serde(default)]
    pub brief: Option<String>,

    #[schemars(description = "Start date, e.g. '2024-01-15T09:00:00+0000'")]
    #[serde(default)]
    pub start_date: Option<String>,

    #[schemars(description = "Due date, e.g. '2024-01-15T17:00:00+0000'")]
    #[serde(default)]
    pub due_date: Option<String>,

    #[schemars(description = "All-day task")]
    #[serde(default)]
    pub is_all_day: Option<bool>,

    #[schemars(description = "Priority: 0=none, 1=low, 3=medium, 5=high")]
    #[serde(default)]
    pub priority: Option<i32>,

    #[schemars(description = "Tag names")]
    #[serde(default)]
    pub tags: Option<Vec<String>>,

    #[schemars(description = "IANA time zone, e.g. 'Europe/Berlin'")]
    #[serde(default)]
    pub time_zone: Option<String>,

    #[schemars(description = "Reminder triggers, e.g. 'TRIGGER:-PT30M'")]
    #[serde(default)]
    pub reminders: Option<Vec<String>>,

    #[schemars(description = "Recurrence as an iCal RRULE, e.g. 'RRULE:FREQ=DAILY;INTERVAL=1'")]
    #[serde(default)]
    pub repeat_flag: Option<String>,

    #[schemars(description = "Subtasks (checklist items)")]
    #[serde(default)]
    pub items: Option<Vec<SubtaskItem>>,
}

impl TaskFields {
    /// Payload without the brief; callers merge it into `content`
    pub fn into_payload(self) -> (TaskPayload, Option<String>) {
        let payload = TaskPayload {
            content: self.content,
            desc: self.desc,
            start_date: self.start_date,
            due_date: self.due_date,
            is_all_day: self.is_all_day,
            priority: self.priority,
            tags: self.tags,
            time_zone: self.time_zone,
            reminders: self.reminders,
            repeat_flag: self.repeat_flag,
            items: self.items,
            ..Default::default()
        };
        (payload, self.brief)
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskParams {
    #[schemars(description = "Task title")]
    pub title: String,

    #[schemars(description = "Project ID. Omit to create the task in the Inbox")]
    #[serde(default)]
    pub project_id: Option<String>,

    #[serde(flatten)]
    pub fields: TaskFields,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskParams {
    #[schemars(description = "Task ID")]
    pub task_id: String,

    #[schemars(description = "Project ID the task belongs to")]
    pub project_id: String,

    #[schemars(description = "New task title")]
    #[serde(default)]
    pub title: Option<String>,

    #[serde(flatten)]
    pub fields: TaskFields,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct BatchCreateTasksParams {
    #[schemars(description = "Task objects; each supports the same fields as create_task")]
    pub tasks: Vec<JsonObject>,
}
