//! Read-only row projections handed to the controllers.
//!
//! Rows are snapshots: controllers keep them in cached lists and reload after
//! every write instead of editing them.

use chrono::{DateTime, Local, NaiveDate};

use super::status::{EntityRef, Id, Status};

/// Display metadata computed by the store alongside each row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TuiMeta {
    /// Sessions logged against the item (projects include their todos)
    pub session_count: usize,
    /// Projects of a track, todos of a project, takeaways of a session
    pub child_count: usize,
    /// Name of the owning track/project, when there is one
    pub parent_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackView {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub status: Status,
    pub archived: bool,
    pub meta: TuiMeta,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectView {
    pub id: Id,
    pub track_id: Id,
    pub name: String,
    pub description: String,
    pub status: Status,
    pub archived: bool,
    pub deadline: Option<NaiveDate>,
    pub importance: u8,
    pub urgency: u8,
    pub meta: TuiMeta,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TodoView {
    pub id: Id,
    pub project_id: Id,
    pub name: String,
    pub description: String,
    pub status: Status,
    pub archived: bool,
    pub deadline: Option<NaiveDate>,
    pub importance: u8,
    pub urgency: u8,
    pub current_stage: u32,
    pub total_stages: u32,
    pub meta: TuiMeta,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxTodoView {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub status: Status,
    pub archived: bool,
    pub deadline: Option<NaiveDate>,
    pub importance: u8,
    pub urgency: u8,
    pub meta: TuiMeta,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IdeaView {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub status: Status,
    pub archived: bool,
    pub importance: u8,
    pub meta: TuiMeta,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub id: Id,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub duration_secs: u64,
    pub todo_id: Option<Id>,
    pub project_id: Option<Id>,
    /// "project / todo" or "project"
    pub target_name: String,
    pub notes: Vec<String>,
    pub meta: TuiMeta,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TakeawayView {
    pub id: Id,
    pub session_id: Id,
    pub content: String,
    pub created: DateTime<Local>,
}

/// One archived item of any kind
#[derive(Debug, Clone, PartialEq)]
pub struct ArchivedView {
    pub entity: EntityRef,
    pub name: String,
    pub status: Status,
    pub parent_name: Option<String>,
}

/// One label/value line of the info inspector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRow {
    pub label: String,
    pub value: String,
}

impl InfoRow {
    pub fn new(label: &str, value: impl Into<String>) -> Self {
        InfoRow {
            label: label.to_string(),
            value: value.into(),
        }
    }
}
