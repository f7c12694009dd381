//! TickTick wire types
//!
//! Only the fields this server reads are typed; everything else the API
//! returns is kept in `extra` and passed through untouched.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `status` value of a completed task
pub const STATUS_COMPLETED: i64 = 2;

/// Allowed `priority` values: none, low, medium, high
pub const PRIORITIES: [i32; 4] = [0, 1, 3, 5];

/// A task as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
    /// Compact summary, only ever set locally
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brief: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == Some(STATUS_COMPLETED)
    }
}

/// A project (task list)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `GET /project/{id}/data`: a project with its tasks and kanban columns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    List,
    Kanban,
    Timeline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProjectKind {
    Task,
    Note,
}

/// Checklist item inside a task
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskItem {
    #[schemars(description = "Subtask title")]
    pub title: String,
    #[schemars(description = "0=normal, 1=completed")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[schemars(description = "Subtask start date")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[schemars(description = "All-day subtask")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_all_day: Option<bool>,
    #[schemars(description = "Sort position")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
    #[schemars(description = "Time zone")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// Body for creating or updating a task; unset fields are left out
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_all_day: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminders: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_flag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<SubtaskItem>>,
}

/// Body for creating or updating a project; unset fields are left out
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_mode: Option<ViewMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ProjectKind>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_keeps_unknown_fields() {
        let raw = json!({
            "id": "t1",
            "projectId": "p1",
            "title": "Buy milk",
            "content": "notes",
            "dueDate": "2024-01-15T10:00:00.000+0000",
            "status": 0,
            "priority": 3,
            "tags": ["home"],
            "timeZone": "Europe/Berlin"
        });

        let task: Task = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(task.project_id.as_deref(), Some("p1"));
        assert_eq!(task.extra["priority"], 3);
        assert!(!task.is_completed());

        assert_eq!(serde_json::to_value(&task).unwrap(), raw);
    }

    #[test]
    fn test_completed_sentinel() {
        let task = Task {
            status: Some(STATUS_COMPLETED),
            ..Default::default()
        };
        assert!(task.is_completed());
    }

    #[test]
    fn test_payload_omits_unset_fields() {
        let payload = TaskPayload {
            title: Some("T".into()),
            is_all_day: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"title": "T", "isAllDay": false})
        );

        let project = ProjectPayload {
            name: Some("Work".into()),
            view_mode: Some(ViewMode::Kanban),
            kind: Some(ProjectKind::Note),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&project).unwrap(),
            json!({"name": "Work", "viewMode": "kanban", "kind": "NOTE"})
        );
    }

    #[test]
    fn test_project_data_defaults() {
        let data: ProjectData = serde_json::from_value(json!({"project": {"id": "p"}})).unwrap();
        assert!(data.tasks.is_empty());
        assert_eq!(data.project.unwrap().id, "p");
    }
}
