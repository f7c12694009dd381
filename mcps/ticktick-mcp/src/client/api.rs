//! TickTick Open API client
//!
//! One instance per process. It caches the resolved access token and the
//! discovered inbox id; every other call goes straight to the API.

use std::sync::Arc;

use chrono::Utc;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info, instrument, warn};

use super::today::select_due;
use super::transport::{Body, HttpRequest, HttpResponse, Transport};
use crate::auth::AuthManager;
use crate::error::{TickTickError, TickTickResult};
use crate::types::{Project, ProjectData, ProjectPayload, Task, TaskPayload};

pub const API_BASE: &str = "https://api.ticktick.com/open/v1";

/// Title of the throwaway task created to learn the inbox id
pub const INBOX_PROBE_TITLE: &str = "__ticktick_mcp_inbox_probe__";

pub struct TickTickClient {
    transport: Arc<dyn Transport>,
    auth: AuthManager,
    base_url: String,
    access_token: Mutex<Option<String>>,
    inbox_id: OnceCell<String>,
}

impl TickTickClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        auth: AuthManager,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            transport,
            auth,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: Mutex::new(None),
            inbox_id: OnceCell::new(),
        }
    }

    async fn token(&self) -> TickTickResult<String> {
        let mut cached = self.access_token.lock().await;
        if let Some(token) = cached.as_ref() {
            return Ok(token.clone());
        }
        let token = self.auth.get_access_token().await?;
        *cached = Some(token.clone());
        Ok(token)
    }

    async fn send(
        &self,
        method: &Method,
        path: &str,
        body: Option<&Value>,
        token: &str,
    ) -> TickTickResult<HttpResponse> {
        self.transport
            .send(HttpRequest {
                method: method.clone(),
                url: format!("{}{}", self.base_url, path),
                authorization: Some(format!("Bearer {token}")),
                body: body.cloned().map_or(Body::Empty, Body::Json),
            })
            .await
    }

    /// Refresh the stored token and replay the call once
    ///
    /// `None` means the original 401 stands.
    async fn retry_after_refresh(
        &self,
        method: &Method,
        path: &str,
        body: Option<&Value>,
    ) -> Option<HttpResponse> {
        let tokens = match self.auth.refresh_stored().await {
            Ok(Some(tokens)) => tokens,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "Refresh after 401 failed");
                return None;
            }
        };

        *self.access_token.lock().await = Some(tokens.access_token.clone());

        match self.send(method, path, body, &tokens.access_token).await {
            Ok(response) => Some(response),
            Err(e) => {
                warn!(error = %e, "Retry after refresh failed");
                None
            }
        }
    }

    /// Issue one authenticated API call
    ///
    /// Returns the parsed body when the response is JSON, `None` otherwise.
    #[instrument(level = "debug", skip(self, body))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> TickTickResult<Option<Value>> {
        let token = self.token().await?;
        let mut response = self.send(&method, path, body.as_ref(), &token).await?;

        if response.status == 401 {
            if let Some(retried) = self.retry_after_refresh(&method, path, body.as_ref()).await {
                response = retried;
            }
        }

        if response.status >= 400 {
            return Err(TickTickError::Api {
                status: response.status,
                method: method.to_string(),
                path: path.to_string(),
                body: response.body,
            });
        }

        if !response.is_json() || response.body.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&response.body)?))
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> TickTickResult<T> {
        match self.request(method, path, body).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Err(TickTickError::InvalidResponse(format!(
                "expected a JSON body from {path}"
            ))),
        }
    }

    // ── Inbox ───────────────────────────────────────────────

    /// The inbox project id, discovered on first use
    pub async fn get_inbox_id(&self) -> TickTickResult<String> {
        self.inbox_id
            .get_or_try_init(|| self.discover_inbox_id())
            .await
            .cloned()
    }

    /// Create a probe task, note where the API files it, then delete it
    async fn discover_inbox_id(&self) -> TickTickResult<String> {
        let probe = self
            .create_task(&TaskPayload {
                title: Some(INBOX_PROBE_TITLE.to_string()),
                ..Default::default()
            })
            .await?;

        let inbox_id = probe.project_id.filter(|id| !id.is_empty()).ok_or_else(|| {
            TickTickError::InvalidResponse("inbox probe task has no projectId".to_string())
        })?;

        if let Err(e) = self.delete_task(&inbox_id, &probe.id).await {
            warn!(error = %e, "Could not delete inbox probe task");
        }

        info!(%inbox_id, "Discovered inbox");
        Ok(inbox_id)
    }

    pub async fn get_inbox_with_data(&self) -> TickTickResult<ProjectData> {
        let inbox_id = self.get_inbox_id().await?;
        self.get_project_with_data(&inbox_id).await
    }

    // ── Projects ────────────────────────────────────────────

    pub async fn list_projects(&self) -> TickTickResult<Vec<Project>> {
        self.fetch(Method::GET, "/project", None).await
    }

    pub async fn get_project(&self, project_id: &str) -> TickTickResult<Project> {
        self.fetch(Method::GET, &format!("/project/{project_id}"), None)
            .await
    }

    pub async fn get_project_with_data(&self, project_id: &str) -> TickTickResult<ProjectData> {
        self.fetch(Method::GET, &format!("/project/{project_id}/data"), None)
            .await
    }

    pub async fn create_project(&self, project: &ProjectPayload) -> TickTickResult<Project> {
        self.fetch(Method::POST, "/project", Some(serde_json::to_value(project)?))
            .await
    }

    pub async fn update_project(
        &self,
        project_id: &str,
        updates: &ProjectPayload,
    ) -> TickTickResult<Project> {
        self.fetch(
            Method::POST,
            &format!("/project/{project_id}"),
            Some(serde_json::to_value(updates)?),
        )
        .await
    }

    pub async fn delete_project(&self, project_id: &str) -> TickTickResult<()> {
        self.request(Method::DELETE, &format!("/project/{project_id}"), None)
            .await?;
        Ok(())
    }

    // ── Tasks ───────────────────────────────────────────────

    pub async fn get_task(&self, project_id: &str, task_id: &str) -> TickTickResult<Task> {
        self.fetch(
            Method::GET,
            &format!("/project/{project_id}/task/{task_id}"),
            None,
        )
        .await
    }

    /// Without a `projectId` the API files the task in the inbox
    pub async fn create_task(&self, task: &TaskPayload) -> TickTickResult<Task> {
        self.fetch(Method::POST, "/task", Some(serde_json::to_value(task)?))
            .await
    }

    pub async fn update_task(&self, task_id: &str, updates: &TaskPayload) -> TickTickResult<Task> {
        self.fetch(
            Method::POST,
            &format!("/task/{task_id}"),
            Some(serde_json::to_value(updates)?),
        )
        .await
    }

    pub async fn complete_task(&self, project_id: &str, task_id: &str) -> TickTickResult<()> {
        self.request(
            Method::POST,
            &format!("/project/{project_id}/task/{task_id}/complete"),
            None,
        )
        .await?;
        Ok(())
    }

    pub async fn delete_task(&self, project_id: &str, task_id: &str) -> TickTickResult<()> {
        self.request(
            Method::DELETE,
            &format!("/project/{project_id}/task/{task_id}"),
            None,
        )
        .await?;
        Ok(())
    }

    /// Tasks are forwarded as given, wrapped in `{"add": [...]}`
    pub async fn batch_create_tasks(&self, tasks: Vec<Value>) -> TickTickResult<Value> {
        let result = self
            .request(Method::POST, "/batch/task", Some(json!({ "add": tasks })))
            .await?;
        Ok(result.unwrap_or(Value::Null))
    }

    // ── Today ───────────────────────────────────────────────

    /// Open tasks due by the end of today (UTC) across the inbox and every project
    ///
    /// A project whose data cannot be fetched is skipped.
    pub async fn get_today(&self) -> TickTickResult<Vec<Task>> {
        let inbox_id = self.get_inbox_id().await?;
        let project_ids: Vec<String> = std::iter::once(inbox_id)
            .chain(self.list_projects().await?.into_iter().map(|p| p.id))
            .collect();

        let mut batches = Vec::with_capacity(project_ids.len());
        for project_id in &project_ids {
            match self.get_project_with_data(project_id).await {
                Ok(data) => batches.push(data.tasks),
                Err(e) => warn!(%project_id, error = %e, "Skipping project in today view"),
            }
        }

        let due = select_due(batches, Utc::now());
        debug!(projects = project_ids.len(), tasks = due.len(), "Built today view");
        Ok(due)
    }
}
