//! The persistence collaborator: everything the controllers ask of storage.
//!
//! Controllers talk to storage only through [`Actions`]. Mutations are
//! expressed as [`Command`] values and always answer with an
//! [`ActionResult`]; failures are values, never panics.

pub mod queries;
pub mod store;

use chrono::{DateTime, Local, NaiveDate};

use crate::model::{
    ArchivedView, BoxTodoView, EntityRef, Id, IdeaView, InfoRow, ProjectView, SessionTarget,
    SessionView, Status, TakeawayView, TodoView, TrackView,
};

pub use store::{Store, StoreError};

/// Uniform outcome of a mutation.
///
/// `success` is `Some(true)` on success, `Some(false)` on failure and `None`
/// for a neutral no-op (nothing to do, not an error).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResult {
    pub success: Option<bool>,
    pub message: String,
    /// Id of the created entity, for creations
    pub data: Option<Id>,
}

impl ActionResult {
    pub fn ok(message: impl Into<String>) -> Self {
        ActionResult {
            success: Some(true),
            message: message.into(),
            data: None,
        }
    }

    pub fn created(id: Id, message: impl Into<String>) -> Self {
        ActionResult {
            success: Some(true),
            message: message.into(),
            data: Some(id),
        }
    }

    pub fn noop(message: impl Into<String>) -> Self {
        ActionResult {
            success: None,
            message: message.into(),
            data: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        ActionResult {
            success: Some(false),
            message: message.into(),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success == Some(true)
    }

    pub fn is_failure(&self) -> bool {
        self.success == Some(false)
    }
}

/// Fields for a new entity. Creation always starts in the default status;
/// a different initial status is a follow-up [`Command::SetStatus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewEntity {
    Track {
        name: String,
        description: String,
    },
    Project {
        track_id: Id,
        name: String,
        description: String,
        deadline: Option<NaiveDate>,
        importance: u8,
        urgency: u8,
    },
    Todo {
        project_id: Id,
        name: String,
        description: String,
        deadline: Option<NaiveDate>,
        importance: u8,
        urgency: u8,
        current_stage: u32,
        total_stages: u32,
    },
    BoxTodo {
        name: String,
        description: String,
        deadline: Option<NaiveDate>,
        importance: u8,
        urgency: u8,
    },
    Idea {
        name: String,
        description: String,
        importance: u8,
    },
}

/// A finished work run, ready to be logged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub duration_secs: u64,
    pub target: SessionTarget,
}

/// Every mutation the store understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create(NewEntity),
    Rename {
        target: EntityRef,
        name: String,
    },
    SetDescription {
        target: EntityRef,
        description: String,
    },
    SetDeadline {
        target: EntityRef,
        deadline: Option<NaiveDate>,
    },
    SetHints {
        target: EntityRef,
        importance: u8,
        urgency: u8,
    },
    SetStages {
        todo_id: Id,
        current: u32,
        total: u32,
    },
    AdvanceStage {
        todo_id: Id,
        delta: u32,
    },
    SetStatus {
        target: EntityRef,
        status: Status,
    },
    Archive(EntityRef),
    Unarchive(EntityRef),
    Delete(EntityRef),
    MoveTodo {
        todo_id: Id,
        project_id: Id,
    },
    MoveProject {
        project_id: Id,
        track_id: Id,
    },
    MoveBoxTodo {
        box_todo_id: Id,
        project_id: Id,
    },
    PromoteIdea {
        idea_id: Id,
        track_id: Id,
    },
    SaveSession(SessionRecord),
    AppendSessionNote {
        session_id: Id,
        text: String,
    },
    AddTakeaway {
        session_id: Id,
        content: String,
    },
}

impl Command {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::Create(_) => "create",
            Command::Rename { .. } => "rename",
            Command::SetDescription { .. } => "set_description",
            Command::SetDeadline { .. } => "set_deadline",
            Command::SetHints { .. } => "set_hints",
            Command::SetStages { .. } => "set_stages",
            Command::AdvanceStage { .. } => "advance_stage",
            Command::SetStatus { .. } => "set_status",
            Command::Archive(_) => "archive",
            Command::Unarchive(_) => "unarchive",
            Command::Delete(_) => "delete",
            Command::MoveTodo { .. } => "move_todo",
            Command::MoveProject { .. } => "move_project",
            Command::MoveBoxTodo { .. } => "move_box_todo",
            Command::PromoteIdea { .. } => "promote_idea",
            Command::SaveSession(_) => "save_session",
            Command::AppendSessionNote { .. } => "append_session_note",
            Command::AddTakeaway { .. } => "add_takeaway",
        }
    }
}

/// Storage as seen by the controllers.
///
/// Queries return unarchived rows in display order unless stated otherwise.
pub trait Actions {
    fn execute(&mut self, command: Command) -> ActionResult;

    fn tracks(&self) -> Vec<TrackView>;
    fn projects(&self, track_id: Id) -> Vec<ProjectView>;
    fn todos(&self, project_id: Id) -> Vec<TodoView>;
    fn box_todos(&self) -> Vec<BoxTodoView>;
    fn ideas(&self) -> Vec<IdeaView>;
    /// All sessions, newest first
    fn sessions(&self) -> Vec<SessionView>;
    fn takeaways(&self, session_id: Id) -> Vec<TakeawayView>;
    /// Every archived item of any kind
    fn archived(&self) -> Vec<ArchivedView>;
    fn todo(&self, id: Id) -> Option<TodoView>;
    fn project(&self, id: Id) -> Option<ProjectView>;
    /// Field inspector rows for any entity, archived or not
    fn info(&self, target: EntityRef) -> Option<Vec<InfoRow>>;
}
