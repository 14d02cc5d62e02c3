use std::path::{Path, PathBuf};

use chrono::Local;

use crate::io::data_io::{self, DataError};
use crate::model::{
    BoxTodo, Data, EntityKind, EntityRef, Id, Idea, Project, Record, Session, SessionTarget,
    Status, Takeaway, Todo, Track,
};

use super::{ActionResult, Actions, Command, NewEntity, SessionRecord, queries};

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(EntityRef),
    #[error("a {kind} cannot be {status}")]
    IllegalStatus { kind: EntityKind, status: Status },
    #[error("name cannot be empty")]
    EmptyName,
    #[error("entry cannot be empty")]
    EmptyEntry,
    #[error("hint {0} out of range (expected 0-3)")]
    HintOutOfRange(u8),
    #[error("invalid stages {current}/{total}: need 1 <= total and current <= total")]
    InvalidStages { current: u32, total: u32 },
    #[error("{0} is archived")]
    Archived(EntityRef),
    #[error("cannot {operation} a {kind}")]
    Unsupported {
        kind: EntityKind,
        operation: &'static str,
    },
    #[error("session must end after it starts")]
    EmptySession,
}

/// What a successful command did
enum Applied {
    Changed(String),
    Created(Id, String),
    Unchanged(String),
}

/// In-memory entity store, optionally backed by a JSON data file.
///
/// Every successful mutation bumps [`Store::revision`] and, when a path is
/// set, rewrites the data file atomically.
#[derive(Debug, Default)]
pub struct Store {
    data: Data,
    path: Option<PathBuf>,
    revision: u64,
}

impl Store {
    /// A store that never touches disk
    pub fn in_memory() -> Self {
        Store::default()
    }

    /// Open (or start) the data file at `path`
    pub fn open(path: &Path) -> Result<Self, DataError> {
        let data = data_io::load_data(path)?;
        Ok(Store {
            data,
            path: Some(path.to_path_buf()),
            revision: 0,
        })
    }

    pub fn data(&self) -> &Data {
        &self.data
    }

    /// Count of successful mutations since the store was opened
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn flush(&self) -> Result<(), DataError> {
        match &self.path {
            Some(path) => data_io::save_data(path, &self.data),
            None => Ok(()),
        }
    }

    fn apply(&mut self, command: Command) -> Result<Applied, StoreError> {
        match command {
            Command::Create(new) => self.create(new),
            Command::Rename { target, name } => {
                let name = required_name(&name)?;
                let record = self.record_mut(target, "rename")?;
                if record.name() == name {
                    return Ok(Applied::Unchanged("Name unchanged".into()));
                }
                record.set_name(name.clone());
                Ok(Applied::Changed(format!("Renamed to \"{}\"", name)))
            }
            Command::SetDescription {
                target,
                description,
            } => {
                self.record_mut(target, "describe")?
                    .set_description(description.trim().to_string());
                Ok(Applied::Changed("Description updated".into()))
            }
            Command::SetDeadline { target, deadline } => {
                if !self.record_mut(target, "set a deadline on")?.set_deadline(deadline) {
                    return Err(StoreError::Unsupported {
                        kind: target.kind,
                        operation: "set a deadline on",
                    });
                }
                Ok(Applied::Changed(match deadline {
                    Some(d) => format!("Deadline set to {}", d),
                    None => "Deadline cleared".into(),
                }))
            }
            Command::SetHints {
                target,
                importance,
                urgency,
            } => {
                check_hint(importance)?;
                check_hint(urgency)?;
                if !self
                    .record_mut(target, "set hints on")?
                    .set_hints(importance, urgency)
                {
                    return Err(StoreError::Unsupported {
                        kind: target.kind,
                        operation: "set hints on",
                    });
                }
                Ok(Applied::Changed("Hints updated".into()))
            }
            Command::SetStages {
                todo_id,
                current,
                total,
            } => {
                check_stages(current, total)?;
                let todo = self.todo_mut(todo_id)?;
                if todo.current_stage == current && todo.total_stages == total {
                    return Ok(Applied::Unchanged("Stages unchanged".into()));
                }
                todo.current_stage = current;
                todo.total_stages = total;
                Ok(Applied::Changed(format!("Stages set to {}/{}", current, total)))
            }
            Command::AdvanceStage { todo_id, delta } => self.advance_stage(todo_id, delta),
            Command::SetStatus { target, status } => self.set_status(target, status),
            Command::Archive(target) => self.set_archived(target, true),
            Command::Unarchive(target) => self.set_archived(target, false),
            Command::Delete(target) => self.delete(target),
            Command::MoveTodo {
                todo_id,
                project_id,
            } => {
                let project_name = self.live_project(project_id)?.name.clone();
                let todo = self.todo_mut(todo_id)?;
                if todo.project_id == project_id {
                    return Ok(Applied::Unchanged(format!(
                        "Already in \"{}\"",
                        project_name
                    )));
                }
                todo.project_id = project_id;
                Ok(Applied::Changed(format!("Moved to \"{}\"", project_name)))
            }
            Command::MoveProject {
                project_id,
                track_id,
            } => {
                let track_name = self.live_track(track_id)?.name.clone();
                let project = self
                    .data
                    .projects
                    .get_mut(&project_id)
                    .ok_or(StoreError::NotFound(EntityRef::new(
                        EntityKind::Project,
                        project_id,
                    )))?;
                if project.track_id == track_id {
                    return Ok(Applied::Unchanged(format!("Already in \"{}\"", track_name)));
                }
                project.track_id = track_id;
                Ok(Applied::Changed(format!("Moved to \"{}\"", track_name)))
            }
            Command::MoveBoxTodo {
                box_todo_id,
                project_id,
            } => self.move_box_todo(box_todo_id, project_id),
            Command::PromoteIdea { idea_id, track_id } => self.promote_idea(idea_id, track_id),
            Command::SaveSession(record) => self.save_session(record),
            Command::AppendSessionNote { session_id, text } => {
                let text = required_entry(&text)?;
                let session = self.data.sessions.get_mut(&session_id).ok_or(
                    StoreError::NotFound(EntityRef::new(EntityKind::Session, session_id)),
                )?;
                session.notes.push(text);
                Ok(Applied::Changed("Note added".into()))
            }
            Command::AddTakeaway {
                session_id,
                content,
            } => {
                let content = required_entry(&content)?;
                if !self.data.sessions.contains_key(&session_id) {
                    return Err(StoreError::NotFound(EntityRef::new(
                        EntityKind::Session,
                        session_id,
                    )));
                }
                let id = self.data.alloc_id();
                self.data.takeaways.insert(
                    id,
                    Takeaway {
                        id,
                        session_id,
                        content,
                        created: Local::now(),
                    },
                );
                Ok(Applied::Created(id, "Takeaway added".into()))
            }
        }
    }

    fn create(&mut self, new: NewEntity) -> Result<Applied, StoreError> {
        let now = Local::now();
        match new {
            NewEntity::Track { name, description } => {
                let name = required_name(&name)?;
                let id = self.data.alloc_id();
                let message = format!("Created track \"{}\"", name);
                self.data.tracks.insert(
                    id,
                    Track {
                        id,
                        name,
                        description: description.trim().to_string(),
                        status: Status::Active,
                        archived: false,
                        created: now,
                    },
                );
                Ok(Applied::Created(id, message))
            }
            NewEntity::Project {
                track_id,
                name,
                description,
                deadline,
                importance,
                urgency,
            } => {
                let name = required_name(&name)?;
                check_hint(importance)?;
                check_hint(urgency)?;
                self.live_track(track_id)?;
                let id = self.data.alloc_id();
                let message = format!("Created project \"{}\"", name);
                self.data.projects.insert(
                    id,
                    Project {
                        id,
                        track_id,
                        name,
                        description: description.trim().to_string(),
                        status: Status::Active,
                        archived: false,
                        deadline,
                        importance,
                        urgency,
                        created: now,
                    },
                );
                Ok(Applied::Created(id, message))
            }
            NewEntity::Todo {
                project_id,
                name,
                description,
                deadline,
                importance,
                urgency,
                current_stage,
                total_stages,
            } => {
                let name = required_name(&name)?;
                check_hint(importance)?;
                check_hint(urgency)?;
                check_stages(current_stage, total_stages)?;
                self.live_project(project_id)?;
                let id = self.data.alloc_id();
                let message = format!("Created todo \"{}\"", name);
                self.data.todos.insert(
                    id,
                    Todo {
                        id,
                        project_id,
                        name,
                        description: description.trim().to_string(),
                        status: Status::Active,
                        archived: false,
                        deadline,
                        importance,
                        urgency,
                        current_stage,
                        total_stages,
                        created: now,
                    },
                );
                Ok(Applied::Created(id, message))
            }
            NewEntity::BoxTodo {
                name,
                description,
                deadline,
                importance,
                urgency,
            } => {
                let name = required_name(&name)?;
                check_hint(importance)?;
                check_hint(urgency)?;
                let id = self.data.alloc_id();
                let message = format!("Added \"{}\" to the box", name);
                self.data.box_todos.insert(
                    id,
                    BoxTodo {
                        id,
                        name,
                        description: description.trim().to_string(),
                        status: Status::Active,
                        archived: false,
                        deadline,
                        importance,
                        urgency,
                        created: now,
                    },
                );
                Ok(Applied::Created(id, message))
            }
            NewEntity::Idea {
                name,
                description,
                importance,
            } => {
                let name = required_name(&name)?;
                check_hint(importance)?;
                let id = self.data.alloc_id();
                let message = format!("Noted idea \"{}\"", name);
                self.data.ideas.insert(
                    id,
                    Idea {
                        id,
                        name,
                        description: description.trim().to_string(),
                        status: Status::Active,
                        archived: false,
                        importance,
                        created: now,
                    },
                );
                Ok(Applied::Created(id, message))
            }
        }
    }

    fn set_status(&mut self, target: EntityRef, status: Status) -> Result<Applied, StoreError> {
        if !target.kind.allows(status) {
            return Err(StoreError::IllegalStatus {
                kind: target.kind,
                status,
            });
        }
        let record = self.record_mut(target, "change the status of")?;
        if record.status() == status {
            return Ok(Applied::Unchanged(format!("Already {}", status)));
        }
        record.set_status(status);
        let name = record.name().to_string();
        if target.kind == EntityKind::Todo
            && let Some(todo) = self.data.todos.get_mut(&target.id)
        {
            todo.align_stages();
        }
        Ok(Applied::Changed(format!("\"{}\" is now {}", name, status)))
    }

    fn set_archived(&mut self, target: EntityRef, archived: bool) -> Result<Applied, StoreError> {
        let operation = if archived { "archive" } else { "unarchive" };
        let record = self.record_mut(target, operation)?;
        if record.is_archived() == archived {
            return Ok(Applied::Unchanged(if archived {
                "Already archived".into()
            } else {
                "Not archived".into()
            }));
        }
        record.set_archived(archived);
        let verb = if archived { "Archived" } else { "Restored" };
        Ok(Applied::Changed(format!("{} \"{}\"", verb, record.name())))
    }

    fn advance_stage(&mut self, todo_id: Id, delta: u32) -> Result<Applied, StoreError> {
        if delta == 0 {
            return Ok(Applied::Unchanged("No stage progress".into()));
        }
        let todo = self.todo_mut(todo_id)?;
        let next = todo
            .current_stage
            .saturating_add(delta)
            .min(todo.total_stages);
        if next == todo.current_stage {
            return Ok(Applied::Unchanged("All stages already complete".into()));
        }
        todo.current_stage = next;
        if next == todo.total_stages {
            todo.status = Status::Done;
            return Ok(Applied::Changed(format!(
                "\"{}\" complete ({}/{})",
                todo.name, next, todo.total_stages
            )));
        }
        Ok(Applied::Changed(format!(
            "Stage {}/{}",
            next, todo.total_stages
        )))
    }

    fn delete(&mut self, target: EntityRef) -> Result<Applied, StoreError> {
        let not_found = StoreError::NotFound(target);
        let name = match target.kind {
            EntityKind::Track => {
                let track = self.data.tracks.shift_remove(&target.id).ok_or(not_found)?;
                let project_ids: Vec<Id> = self
                    .data
                    .projects
                    .values()
                    .filter(|p| p.track_id == target.id)
                    .map(|p| p.id)
                    .collect();
                for pid in project_ids {
                    self.remove_project(pid);
                }
                track.name
            }
            EntityKind::Project => self.remove_project(target.id).ok_or(not_found)?.name,
            EntityKind::Todo => self.data.todos.shift_remove(&target.id).ok_or(not_found)?.name,
            EntityKind::BoxTodo => {
                self.data
                    .box_todos
                    .shift_remove(&target.id)
                    .ok_or(not_found)?
                    .name
            }
            EntityKind::Idea => self.data.ideas.shift_remove(&target.id).ok_or(not_found)?.name,
            EntityKind::Session => {
                self.data.sessions.shift_remove(&target.id).ok_or(not_found)?;
                self.data
                    .takeaways
                    .retain(|_, t| t.session_id != target.id);
                return Ok(Applied::Changed("Deleted session".into()));
            }
            EntityKind::Takeaway => {
                self.data.takeaways.shift_remove(&target.id).ok_or(not_found)?;
                return Ok(Applied::Changed("Deleted takeaway".into()));
            }
        };
        Ok(Applied::Changed(format!("Deleted \"{}\"", name)))
    }

    /// Remove a project and its todos
    fn remove_project(&mut self, project_id: Id) -> Option<Project> {
        let project = self.data.projects.shift_remove(&project_id)?;
        self.data.todos.retain(|_, t| t.project_id != project_id);
        Some(project)
    }

    fn move_box_todo(&mut self, box_todo_id: Id, project_id: Id) -> Result<Applied, StoreError> {
        let project_name = self.live_project(project_id)?.name.clone();
        let item = self
            .data
            .box_todos
            .shift_remove(&box_todo_id)
            .ok_or(StoreError::NotFound(EntityRef::new(
                EntityKind::BoxTodo,
                box_todo_id,
            )))?;
        let id = self.data.alloc_id();
        let mut todo = Todo {
            id,
            project_id,
            name: item.name,
            description: item.description,
            status: item.status,
            archived: false,
            deadline: item.deadline,
            importance: item.importance,
            urgency: item.urgency,
            current_stage: 0,
            total_stages: 1,
            created: item.created,
        };
        todo.align_stages();
        let message = format!("Moved \"{}\" to \"{}\"", todo.name, project_name);
        self.data.todos.insert(id, todo);
        Ok(Applied::Created(id, message))
    }

    fn promote_idea(&mut self, idea_id: Id, track_id: Id) -> Result<Applied, StoreError> {
        let track_name = self.live_track(track_id)?.name.clone();
        let idea = self
            .data
            .ideas
            .shift_remove(&idea_id)
            .ok_or(StoreError::NotFound(EntityRef::new(EntityKind::Idea, idea_id)))?;
        let id = self.data.alloc_id();
        // Deprecated has no project counterpart; a promoted idea starts over.
        let status = if EntityKind::Project.allows(idea.status) {
            idea.status
        } else {
            Status::Active
        };
        let message = format!("Promoted \"{}\" into \"{}\"", idea.name, track_name);
        self.data.projects.insert(
            id,
            Project {
                id,
                track_id,
                name: idea.name,
                description: idea.description,
                status,
                archived: false,
                deadline: None,
                importance: idea.importance,
                urgency: 0,
                created: Local::now(),
            },
        );
        Ok(Applied::Created(id, message))
    }

    fn save_session(&mut self, record: SessionRecord) -> Result<Applied, StoreError> {
        if record.end <= record.start || record.duration_secs == 0 {
            return Err(StoreError::EmptySession);
        }
        match record.target {
            SessionTarget::Todo(id) => {
                self.todo_mut(id)?;
            }
            SessionTarget::Project(id) => {
                if !self.data.projects.contains_key(&id) {
                    return Err(StoreError::NotFound(EntityRef::new(EntityKind::Project, id)));
                }
            }
        }
        let id = self.data.alloc_id();
        self.data.sessions.insert(
            id,
            Session {
                id,
                start: record.start,
                end: record.end,
                duration_secs: record.duration_secs,
                target: record.target,
                notes: Vec::new(),
            },
        );
        Ok(Applied::Created(
            id,
            format!(
                "Logged {} session",
                queries::format_duration(record.duration_secs)
            ),
        ))
    }

    fn record_mut(
        &mut self,
        target: EntityRef,
        operation: &'static str,
    ) -> Result<&mut dyn Record, StoreError> {
        let data = &mut self.data;
        let record: Option<&mut dyn Record> = match target.kind {
            EntityKind::Track => data.tracks.get_mut(&target.id).map(|r| r as &mut dyn Record),
            EntityKind::Project => data
                .projects
                .get_mut(&target.id)
                .map(|r| r as &mut dyn Record),
            EntityKind::Todo => data.todos.get_mut(&target.id).map(|r| r as &mut dyn Record),
            EntityKind::BoxTodo => data
                .box_todos
                .get_mut(&target.id)
                .map(|r| r as &mut dyn Record),
            EntityKind::Idea => data.ideas.get_mut(&target.id).map(|r| r as &mut dyn Record),
            EntityKind::Session | EntityKind::Takeaway => {
                return Err(StoreError::Unsupported {
                    kind: target.kind,
                    operation,
                });
            }
        };
        record.ok_or(StoreError::NotFound(target))
    }

    fn todo_mut(&mut self, id: Id) -> Result<&mut Todo, StoreError> {
        self.data
            .todos
            .get_mut(&id)
            .ok_or(StoreError::NotFound(EntityRef::new(EntityKind::Todo, id)))
    }

    /// An existing, unarchived track (a valid destination)
    fn live_track(&self, id: Id) -> Result<&Track, StoreError> {
        let target = EntityRef::new(EntityKind::Track, id);
        let track = self.data.tracks.get(&id).ok_or(StoreError::NotFound(target))?;
        if track.archived {
            return Err(StoreError::Archived(target));
        }
        Ok(track)
    }

    /// An existing, unarchived project (a valid destination)
    fn live_project(&self, id: Id) -> Result<&Project, StoreError> {
        let target = EntityRef::new(EntityKind::Project, id);
        let project = self
            .data
            .projects
            .get(&id)
            .ok_or(StoreError::NotFound(target))?;
        if project.archived {
            return Err(StoreError::Archived(target));
        }
        Ok(project)
    }
}

fn required_name(name: &str) -> Result<String, StoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::EmptyName);
    }
    Ok(name.to_string())
}

fn required_entry(text: &str) -> Result<String, StoreError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(StoreError::EmptyEntry);
    }
    Ok(text.to_string())
}

fn check_hint(value: u8) -> Result<(), StoreError> {
    if value > 3 {
        return Err(StoreError::HintOutOfRange(value));
    }
    Ok(())
}

fn check_stages(current: u32, total: u32) -> Result<(), StoreError> {
    if total == 0 || current > total {
        return Err(StoreError::InvalidStages { current, total });
    }
    Ok(())
}

impl Actions for Store {
    fn execute(&mut self, command: Command) -> ActionResult {
        let name = command.name();
        // a write that cannot reach disk is undone, so memory never runs ahead of the file
        let before = self.path.is_some().then(|| self.data.clone());
        let applied = match self.apply(command) {
            Ok(applied) => applied,
            Err(e) => {
                tracing::warn!(command = name, error = %e, "command rejected");
                return ActionResult::fail(e.to_string());
            }
        };
        let result = match applied {
            Applied::Unchanged(message) => {
                tracing::debug!(command = name, "no-op");
                return ActionResult::noop(message);
            }
            Applied::Changed(message) => ActionResult::ok(message),
            Applied::Created(id, message) => ActionResult::created(id, message),
        };
        if let Err(e) = self.flush() {
            tracing::warn!(command = name, error = %e, "could not write data file, rolled back");
            if let Some(before) = before {
                self.data = before;
            }
            return ActionResult::fail(format!("not saved: {}", e));
        }
        self.revision += 1;
        tracing::debug!(command = name, revision = self.revision, "applied");
        result
    }

    fn tracks(&self) -> Vec<crate::model::TrackView> {
        queries::tracks(&self.data)
    }

    fn projects(&self, track_id: Id) -> Vec<crate::model::ProjectView> {
        queries::projects(&self.data, track_id)
    }

    fn todos(&self, project_id: Id) -> Vec<crate::model::TodoView> {
        queries::todos(&self.data, project_id)
    }

    fn box_todos(&self) -> Vec<crate::model::BoxTodoView> {
        queries::box_todos(&self.data)
    }

    fn ideas(&self) -> Vec<crate::model::IdeaView> {
        queries::ideas(&self.data)
    }

    fn sessions(&self) -> Vec<crate::model::SessionView> {
        queries::sessions(&self.data)
    }

    fn takeaways(&self, session_id: Id) -> Vec<crate::model::TakeawayView> {
        queries::takeaways(&self.data, session_id)
    }

    fn archived(&self) -> Vec<crate::model::ArchivedView> {
        queries::archived(&self.data)
    }

    fn todo(&self, id: Id) -> Option<crate::model::TodoView> {
        queries::todo(&self.data, id)
    }

    fn project(&self, id: Id) -> Option<crate::model::ProjectView> {
        queries::project(&self.data, id)
    }

    fn info(&self, target: EntityRef) -> Option<Vec<crate::model::InfoRow>> {
        queries::info(&self.data, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn track(store: &mut Store, name: &str) -> Id {
        store
            .execute(Command::Create(NewEntity::Track {
                name: name.into(),
                description: String::new(),
            }))
            .data
            .unwrap()
    }

    fn project(store: &mut Store, track_id: Id, name: &str) -> Id {
        store
            .execute(Command::Create(NewEntity::Project {
                track_id,
                name: name.into(),
                description: String::new(),
                deadline: None,
                importance: 0,
                urgency: 0,
            }))
            .data
            .unwrap()
    }

    fn todo(store: &mut Store, project_id: Id, name: &str, total: u32) -> Id {
        store
            .execute(Command::Create(NewEntity::Todo {
                project_id,
                name: name.into(),
                description: String::new(),
                deadline: None,
                importance: 0,
                urgency: 0,
                current_stage: 0,
                total_stages: total,
            }))
            .data
            .unwrap()
    }

    #[test]
    fn create_rejects_blank_name_without_writing() {
        let mut store = Store::in_memory();
        let r = store.execute(Command::Create(NewEntity::Track {
            name: "   ".into(),
            description: String::new(),
        }));
        assert!(r.is_failure());
        assert_eq!(r.message, "name cannot be empty");
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn create_project_under_missing_track_is_not_found() {
        let mut store = Store::in_memory();
        let r = store.execute(Command::Create(NewEntity::Project {
            track_id: 99,
            name: "x".into(),
            description: String::new(),
            deadline: None,
            importance: 0,
            urgency: 0,
        }));
        assert!(r.is_failure());
        assert_eq!(r.message, "track #99 not found");
    }

    #[test]
    fn ids_are_never_reused() {
        let mut store = Store::in_memory();
        let a = track(&mut store, "A");
        store.execute(Command::Delete(EntityRef::new(EntityKind::Track, a)));
        let b = track(&mut store, "B");
        assert!(b > a);
    }

    #[test]
    fn illegal_status_is_rejected() {
        let mut store = Store::in_memory();
        let t = track(&mut store, "A");
        let r = store.execute(Command::SetStatus {
            target: EntityRef::new(EntityKind::Track, t),
            status: Status::Done,
        });
        assert!(r.is_failure());
        assert_eq!(r.message, "a track cannot be done");
    }

    #[test]
    fn same_status_is_a_noop() {
        let mut store = Store::in_memory();
        let t = track(&mut store, "A");
        let before = store.revision();
        let r = store.execute(Command::SetStatus {
            target: EntityRef::new(EntityKind::Track, t),
            status: Status::Active,
        });
        assert_eq!(r.success, None);
        assert_eq!(store.revision(), before);
    }

    #[test]
    fn done_status_completes_stages_and_reopen_leaves_one_open() {
        let mut store = Store::in_memory();
        let t = track(&mut store, "A");
        let p = project(&mut store, t, "P");
        let td = todo(&mut store, p, "T", 3);
        let target = EntityRef::new(EntityKind::Todo, td);

        store.execute(Command::SetStatus {
            target,
            status: Status::Done,
        });
        assert_eq!(store.data().todos[&td].current_stage, 3);

        store.execute(Command::SetStatus {
            target,
            status: Status::Active,
        });
        assert_eq!(store.data().todos[&td].current_stage, 2);
    }

    #[test]
    fn advance_stage_to_total_marks_done() {
        let mut store = Store::in_memory();
        let t = track(&mut store, "A");
        let p = project(&mut store, t, "P");
        let td = todo(&mut store, p, "T", 2);
        let r = store.execute(Command::AdvanceStage {
            todo_id: td,
            delta: 5,
        });
        assert!(r.is_success());
        let stored = &store.data().todos[&td];
        assert_eq!(stored.current_stage, 2);
        assert_eq!(stored.status, Status::Done);
    }

    #[test]
    fn set_stages_validates_counters() {
        let mut store = Store::in_memory();
        let t = track(&mut store, "A");
        let p = project(&mut store, t, "P");
        let td = todo(&mut store, p, "T", 2);
        let r = store.execute(Command::SetStages {
            todo_id: td,
            current: 3,
            total: 2,
        });
        assert!(r.is_failure());
        let r = store.execute(Command::SetStages {
            todo_id: td,
            current: 0,
            total: 0,
        });
        assert!(r.is_failure());
    }

    #[test]
    fn deleting_track_cascades_to_projects_and_todos() {
        let mut store = Store::in_memory();
        let t = track(&mut store, "A");
        let p = project(&mut store, t, "P");
        todo(&mut store, p, "T", 1);
        let other = track(&mut store, "B");
        let kept = project(&mut store, other, "Q");

        store.execute(Command::Delete(EntityRef::new(EntityKind::Track, t)));
        assert!(store.data().projects.get(&p).is_none());
        assert!(store.data().todos.is_empty());
        assert!(store.data().projects.get(&kept).is_some());
    }

    #[test]
    fn move_box_todo_creates_structure_todo() {
        let mut store = Store::in_memory();
        let t = track(&mut store, "A");
        let p = project(&mut store, t, "P");
        let b = store
            .execute(Command::Create(NewEntity::BoxTodo {
                name: "Call bank".into(),
                description: "about fees".into(),
                deadline: None,
                importance: 2,
                urgency: 1,
            }))
            .data
            .unwrap();

        let r = store.execute(Command::MoveBoxTodo {
            box_todo_id: b,
            project_id: p,
        });
        assert!(r.is_success());
        let new_id = r.data.unwrap();
        assert!(store.data().box_todos.is_empty());
        let moved = &store.data().todos[&new_id];
        assert_eq!(moved.name, "Call bank");
        assert_eq!(moved.project_id, p);
        assert_eq!(moved.importance, 2);
    }

    #[test]
    fn promote_idea_requires_live_track() {
        let mut store = Store::in_memory();
        let t = track(&mut store, "A");
        store.execute(Command::Archive(EntityRef::new(EntityKind::Track, t)));
        let idea = store
            .execute(Command::Create(NewEntity::Idea {
                name: "Garden".into(),
                description: String::new(),
                importance: 1,
            }))
            .data
            .unwrap();
        let r = store.execute(Command::PromoteIdea {
            idea_id: idea,
            track_id: t,
        });
        assert!(r.is_failure());
        assert_eq!(r.message, format!("track #{} is archived", t));
        assert_eq!(store.data().ideas.len(), 1);
    }

    #[test]
    fn session_requires_positive_duration() {
        let mut store = Store::in_memory();
        let t = track(&mut store, "A");
        let p = project(&mut store, t, "P");
        let start = Local::now();
        let r = store.execute(Command::SaveSession(SessionRecord {
            start,
            end: start,
            duration_secs: 0,
            target: SessionTarget::Project(p),
        }));
        assert!(r.is_failure());

        let r = store.execute(Command::SaveSession(SessionRecord {
            start,
            end: start + Duration::minutes(25),
            duration_secs: 1500,
            target: SessionTarget::Project(p),
        }));
        assert!(r.is_success());
        assert_eq!(r.message, "Logged 25m session");
    }

    #[test]
    fn failed_write_rolls_back_the_creation() {
        let dir = TempDir::new().unwrap();
        let mut store = Store::open(&dir.path().join("sub").join(data_io::DATA_FILE)).unwrap();
        // a plain file where the data directory should be
        std::fs::write(dir.path().join("sub"), "").unwrap();

        let r = store.execute(Command::Create(NewEntity::Track {
            name: "Work".into(),
            description: String::new(),
        }));
        assert!(r.is_failure());
        assert_eq!(r.data, None);
        assert!(r.message.starts_with("not saved"));
        assert!(store.data().tracks.is_empty());
        assert_eq!(store.revision(), 0);
        assert!(store.tracks().is_empty());
    }

    #[test]
    fn deleting_session_removes_takeaways() {
        let mut store = Store::in_memory();
        let t = track(&mut store, "A");
        let p = project(&mut store, t, "P");
        let start = Local::now();
        let s = store
            .execute(Command::SaveSession(SessionRecord {
                start,
                end: start + Duration::minutes(5),
                duration_secs: 300,
                target: SessionTarget::Project(p),
            }))
            .data
            .unwrap();
        store.execute(Command::AddTakeaway {
            session_id: s,
            content: "smaller steps".into(),
        });
        assert_eq!(store.data().takeaways.len(), 1);
        store.execute(Command::Delete(EntityRef::new(EntityKind::Session, s)));
        assert!(store.data().takeaways.is_empty());
    }

    #[test]
    fn file_backed_store_persists_each_mutation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        {
            let mut store = Store::open(&path).unwrap();
            track(&mut store, "Health");
        }
        let reopened = Store::open(&path).unwrap();
        assert_eq!(reopened.tracks().len(), 1);
        assert_eq!(reopened.tracks()[0].name, "Health");
    }
}
