//! `<brief>...</brief>` summaries embedded in task text
//!
//! A brief is a short summary stored inline in a task's `content` (or, for
//! checklist tasks, `desc`). Read tools can replace the full description with
//! just the brief to keep responses small, or drop description text entirely.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use crate::types::{ProjectData, Task};

/// Reported as the brief of a task that has none, in compact mode
pub const NO_BRIEF: &str = "(no brief)";

static BRIEF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<brief>(.*?)</brief>").expect("valid brief pattern"));

fn first_brief(text: &str) -> Option<String> {
    BRIEF_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// First brief in `content`, else the first in `desc`
pub fn extract_brief(task: &Task) -> Option<String> {
    task.content
        .as_deref()
        .and_then(first_brief)
        .or_else(|| task.desc.as_deref().and_then(first_brief))
}

/// Store `brief` in `content`
///
/// Every existing tag is replaced; without one the tag is prepended on its
/// own line. Empty or absent content yields just the tag.
pub fn inject_brief(brief: &str, content: Option<&str>) -> String {
    let tag = format!("<brief>{brief}</brief>");
    match content {
        None | Some("") => tag,
        Some(text) if BRIEF_RE.is_match(text) => {
            BRIEF_RE.replace_all(text, NoExpand(&tag)).into_owned()
        }
        Some(text) => format!("{tag}\n{text}"),
    }
}

/// How read tools render task descriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescOptions {
    /// Include description text at all
    pub desc: bool,
    /// Replace description text with the brief
    pub desc_compact: bool,
}

impl Default for DescOptions {
    fn default() -> Self {
        Self {
            desc: true,
            desc_compact: true,
        }
    }
}

impl DescOptions {
    /// Per-call overrides on top of these defaults
    pub fn resolve(self, desc: Option<bool>, desc_compact: Option<bool>) -> Self {
        Self {
            desc: desc.unwrap_or(self.desc),
            desc_compact: desc_compact.unwrap_or(self.desc_compact),
        }
    }

    /// Full description text passes through untouched
    pub fn is_passthrough(&self) -> bool {
        self.desc && !self.desc_compact
    }
}

/// Apply `options` to one task
pub fn process_task(task: &Task, options: DescOptions) -> Cow<'_, Task> {
    if options.is_passthrough() {
        return Cow::Borrowed(task);
    }

    let mut out = task.clone();
    if options.desc {
        out.brief = Some(extract_brief(task).unwrap_or_else(|| NO_BRIEF.to_string()));
    } else {
        out.brief = None;
    }
    out.content = None;
    out.desc = None;
    Cow::Owned(out)
}

/// Apply `options` to a list of tasks without touching the input
pub fn process_tasks(tasks: &[Task], options: DescOptions) -> Cow<'_, [Task]> {
    if options.is_passthrough() {
        return Cow::Borrowed(tasks);
    }
    Cow::Owned(
        tasks
            .iter()
            .map(|task| process_task(task, options).into_owned())
            .collect(),
    )
}

/// Apply `options` to the tasks of a project payload
pub fn process_project_data(mut data: ProjectData, options: DescOptions) -> ProjectData {
    if let Cow::Owned(tasks) = process_tasks(&data.tasks, options) {
        data.tasks = tasks;
    }
    data
}
