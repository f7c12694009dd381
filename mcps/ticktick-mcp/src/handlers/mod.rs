//! Handler implementations for TickTick MCP tools
//!
//! Organized by domain: inbox (and the today view), project, task

mod inbox;
mod project;
mod task;

pub use inbox::*;
pub use project::*;
pub use task::*;

use mcp_common::{invalid_params, McpError};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::brief::DescOptions;
use crate::client::TickTickClient;
use crate::params::TaskViewParams;
use crate::types::PRIORITIES;

/// State shared by every handler, built once at start-up
pub struct ToolContext {
    pub client: TickTickClient,
    /// Description rendering when a call does not say otherwise
    pub defaults: DescOptions,
}

impl ToolContext {
    pub fn new(client: TickTickClient, defaults: DescOptions) -> Self {
        Self { client, defaults }
    }

    fn view(&self, params: TaskViewParams) -> DescOptions {
        self.defaults.resolve(params.desc, params.desc_compact)
    }
}

/// Deserialize tool arguments into a parameter struct
pub fn parse_params<T: DeserializeOwned>(args: Value) -> Result<T, McpError> {
    serde_json::from_value(args).map_err(|e| invalid_params(format!("invalid arguments: {e}")))
}

fn check_priority(priority: Option<i32>) -> Result<(), McpError> {
    match priority {
        Some(p) if !PRIORITIES.contains(&p) => Err(invalid_params(format!(
            "priority must be one of 0 (none), 1 (low), 3 (medium), 5 (high); got {p}"
        ))),
        _ => Ok(()),
    }
}
