use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::record::{Record, record_basics};
use super::status::{EntityKind, Id, Status};

/// A long-running area of work (top of the Track → Project → Todo tree)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub archived: bool,
    pub created: DateTime<Local>,
}

/// A bounded goal inside a track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Id,
    pub track_id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    /// 0 = unset, 1-3 = low to high
    #[serde(default)]
    pub importance: u8,
    #[serde(default)]
    pub urgency: u8,
    pub created: DateTime<Local>,
}

/// A concrete piece of work inside a project, optionally split into stages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: Id,
    pub project_id: Id,
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
    #[serde(default)]
    pub current_stage: u32,
    #[serde(default = "default_total_stages")]
    pub total_stages: u32,
    pub created: DateTime<Local>,
}

fn default_total_stages() -> u32 {
    1
}

impl Todo {
    /// Pin `current_stage` to the status: done means every stage is complete,
    /// anything else leaves at least one stage open.
    pub fn align_stages(&mut self) {
        self.total_stages = self.total_stages.max(1);
        if self.status == Status::Done {
            self.current_stage = self.total_stages;
        } else {
            self.current_stage = self.current_stage.min(self.total_stages - 1);
        }
    }
}

impl Record for Track {
    record_basics!(EntityKind::Track);
}

impl Record for Project {
    record_basics!(EntityKind::Project);

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

impl Record for Todo {
    record_basics!(EntityKind::Todo);

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

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(status: Status, current: u32, total: u32) -> Todo {
        Todo {
            id: 1,
            project_id: 1,
            name: "t".into(),
            description: String::new(),
            status,
            archived: false,
            deadline: None,
            importance: 0,
            urgency: 0,
            current_stage: current,
            total_stages: total,
            created: Local::now(),
        }
    }

    #[test]
    fn align_stages_done_completes_all() {
        let mut t = todo(Status::Done, 1, 4);
        t.align_stages();
        assert_eq!(t.current_stage, 4);
    }

    #[test]
    fn align_stages_open_leaves_one_stage() {
        let mut t = todo(Status::Active, 4, 4);
        t.align_stages();
        assert_eq!(t.current_stage, 3);
    }

    #[test]
    fn align_stages_repairs_zero_total() {
        let mut t = todo(Status::Sleeping, 0, 0);
        t.align_stages();
        assert_eq!(t.total_stages, 1);
        assert_eq!(t.current_stage, 0);
    }

    #[test]
    fn todo_deserialize_defaults() {
        let json = r#"{"id":3,"project_id":2,"name":"x","created":"2025-01-02T10:00:00+00:00"}"#;
        let t: Todo = serde_json::from_str(json).unwrap();
        assert_eq!(t.status, Status::Active);
        assert_eq!(t.total_stages, 1);
        assert_eq!(t.current_stage, 0);
        assert!(t.deadline.is_none());
    }
}
