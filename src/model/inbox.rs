use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::record::{Record, record_basics};
use super::status::{EntityKind, Id, Status};

/// An untriaged todo captured in the box, not yet attached to a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxTodo {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub importance: u8,
    #[serde(default)]
    pub urgency: u8,
    pub created: DateTime<Local>,
}

/// An idea kept in the box; may later be promoted into a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub importance: u8,
    pub created: DateTime<Local>,
}

impl Record for BoxTodo {
    record_basics!(EntityKind::BoxTodo);

    fn set_deadline(&mut self, deadline: Option<NaiveDate>) -> bool {
        self.deadline = deadline;
        true
    }

    fn set_hints(&mut self, importance: u8, urgency: u8) -> bool {
        self.importance = importance;
        self.urgency = urgency;
        true
    }
}

impl Record for Idea {
    record_basics!(EntityKind::Idea);

    fn set_hints(&mut self, importance: u8, _urgency: u8) -> bool {
        self.importance = importance;
        true
    }
}
