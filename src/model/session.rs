use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::status::Id;

/// What a focus session was spent on. Exactly one of todo or project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum SessionTarget {
    Todo(Id),
    Project(Id),
}

/// A finished work session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: Id,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub duration_secs: u64,
    pub target: SessionTarget,
    /// Free-text entries describing what was done
    #[serde(default)]
    pub notes: Vec<String>,
}

impl Session {
    pub fn todo_id(&self) -> Option<Id> {
        match self.target {
            SessionTarget::Todo(id) => Some(id),
            SessionTarget::Project(_) => None,
        }
    }

    pub fn project_id(&self) -> Option<Id> {
        match self.target {
            SessionTarget::Project(id) => Some(id),
            SessionTarget::Todo(_) => None,
        }
    }
}

/// A lesson noted after a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Takeaway {
    pub id: Id,
    pub session_id: Id,
    pub content: String,
    pub created: DateTime<Local>,
}
