use crate::model::{
    EntityKind, EntityRef, FlipKey, Id, ProjectView, Status, TodoView, TrackView, toggle_status,
};
use crate::ops::{ActionResult, Actions, Command};

use super::message::MessageHolder;

/// Depth of the focus pointer in the Track → Project → Todo tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StructureLevel {
    /// Track list only
    #[default]
    Tracks,
    /// Tracks with the highlighted track's projects beside them; tracks focused
    TracksWithProjectsT,
    /// Same layout, projects focused
    TracksWithProjectsP,
    /// Todos of the current project
    Todos,
}

/// Saved cursor position, used to come back after a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructurePosition {
    pub level: StructureLevel,
    pub track_idx: Option<usize>,
    pub project_idx: Option<usize>,
    pub todo_idx: Option<usize>,
}

/// Clamp a cursor into `[0, len)`, or None when the list is empty
pub fn clamp_index(idx: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(idx.unwrap_or(0).min(len - 1))
    }
}

/// Hierarchical cursor over tracks, projects and todos.
///
/// Lists are snapshots from the store. Every mutation goes through
/// [`StructureState::execute`], which reloads and re-derives the current ids
/// from the selected indices.
#[derive(Debug, Default)]
pub struct StructureState {
    pub level: StructureLevel,
    pub tracks: Vec<TrackView>,
    pub projects: Vec<ProjectView>,
    pub todos: Vec<TodoView>,
    pub selected_track_idx: Option<usize>,
    pub selected_project_idx: Option<usize>,
    pub selected_todo_idx: Option<usize>,
    pub current_track_id: Option<Id>,
    pub current_project_id: Option<Id>,
    pub current_todo_id: Option<Id>,
    /// Todos level entered without a todo cursor (transfer destination pick)
    pub no_cursor: bool,
}

impl StructureState {
    pub fn reload(&mut self, actions: &dyn Actions) {
        self.tracks = actions.tracks();
        self.selected_track_idx = clamp_index(self.selected_track_idx, self.tracks.len());
        self.current_track_id = self.selected_track_idx.map(|i| self.tracks[i].id);

        self.projects = match self.current_track_id {
            Some(id) => actions.projects(id),
            None => Vec::new(),
        };
        self.selected_project_idx = clamp_index(self.selected_project_idx, self.projects.len());
        self.current_project_id = self.selected_project_idx.map(|i| self.projects[i].id);

        self.todos = match self.current_project_id {
            Some(id) => actions.todos(id),
            None => Vec::new(),
        };
        self.selected_todo_idx = if self.no_cursor {
            None
        } else {
            clamp_index(self.selected_todo_idx, self.todos.len())
        };
        self.current_todo_id = self.selected_todo_idx.map(|i| self.todos[i].id);

        // A level whose list vanished falls back to the nearest live ancestor
        if self.level == StructureLevel::Todos && self.current_project_id.is_none() {
            self.level = StructureLevel::TracksWithProjectsP;
            self.no_cursor = false;
        }
        if self.level == StructureLevel::TracksWithProjectsP && self.current_track_id.is_none() {
            self.level = StructureLevel::TracksWithProjectsT;
        }
    }

    /// Move the live cursor of the current level by `delta`, resetting the
    /// cursors below it.
    pub fn move_cursor(&mut self, actions: &dyn Actions, delta: isize) {
        match self.level {
            StructureLevel::Tracks | StructureLevel::TracksWithProjectsT => {
                let next = step(self.selected_track_idx, delta, self.tracks.len());
                if next != self.selected_track_idx {
                    self.selected_track_idx = next;
                    self.selected_project_idx = None;
                    self.selected_todo_idx = None;
                }
            }
            StructureLevel::TracksWithProjectsP => {
                let next = step(self.selected_project_idx, delta, self.projects.len());
                if next != self.selected_project_idx {
                    self.selected_project_idx = next;
                    self.selected_todo_idx = None;
                }
            }
            StructureLevel::Todos => {
                if self.no_cursor {
                    return;
                }
                self.selected_todo_idx = step(self.selected_todo_idx, delta, self.todos.len());
            }
        }
        self.reload(actions);
    }

    /// Descend one level. Returns false (with a message) when there is
    /// nothing to descend into.
    pub fn select_current(&mut self, messages: &mut MessageHolder) -> bool {
        match self.level {
            StructureLevel::Tracks => {
                self.level = StructureLevel::TracksWithProjectsT;
                true
            }
            StructureLevel::TracksWithProjectsT => {
                if self.current_track_id.is_none() {
                    messages.failure("No track selected");
                    return false;
                }
                self.level = StructureLevel::TracksWithProjectsP;
                true
            }
            StructureLevel::TracksWithProjectsP => {
                if self.current_project_id.is_none() {
                    messages.failure("No project selected");
                    return false;
                }
                self.level = StructureLevel::Todos;
                true
            }
            StructureLevel::Todos => false,
        }
    }

    /// Ascend one level; false at the top.
    pub fn go_back(&mut self) -> bool {
        self.level = match self.level {
            StructureLevel::Tracks => return false,
            StructureLevel::TracksWithProjectsT => StructureLevel::Tracks,
            StructureLevel::TracksWithProjectsP => StructureLevel::TracksWithProjectsT,
            StructureLevel::Todos => {
                self.no_cursor = false;
                StructureLevel::TracksWithProjectsP
            }
        };
        true
    }

    /// The item under the live cursor
    pub fn focused_item(&self) -> Option<EntityRef> {
        match self.level {
            StructureLevel::Tracks | StructureLevel::TracksWithProjectsT => self
                .current_track_id
                .map(|id| EntityRef::new(EntityKind::Track, id)),
            StructureLevel::TracksWithProjectsP => self
                .current_project_id
                .map(|id| EntityRef::new(EntityKind::Project, id)),
            StructureLevel::Todos => self
                .current_todo_id
                .map(|id| EntityRef::new(EntityKind::Todo, id)),
        }
    }

    pub fn focused_name(&self) -> Option<&str> {
        match self.level {
            StructureLevel::Tracks | StructureLevel::TracksWithProjectsT => {
                self.selected_track_idx.map(|i| self.tracks[i].name.as_str())
            }
            StructureLevel::TracksWithProjectsP => {
                self.selected_project_idx.map(|i| self.projects[i].name.as_str())
            }
            StructureLevel::Todos => self.selected_todo_idx.map(|i| self.todos[i].name.as_str()),
        }
    }

    fn focused_status(&self) -> Option<Status> {
        match self.level {
            StructureLevel::Tracks | StructureLevel::TracksWithProjectsT => {
                self.selected_track_idx.map(|i| self.tracks[i].status)
            }
            StructureLevel::TracksWithProjectsP => {
                self.selected_project_idx.map(|i| self.projects[i].status)
            }
            StructureLevel::Todos => self.selected_todo_idx.map(|i| self.todos[i].status),
        }
    }

    pub fn current_project(&self) -> Option<&ProjectView> {
        self.selected_project_idx.map(|i| &self.projects[i])
    }

    pub fn current_todo(&self) -> Option<&TodoView> {
        self.selected_todo_idx.map(|i| &self.todos[i])
    }

    /// Run a command, surface its result and reload.
    pub fn execute(
        &mut self,
        actions: &mut dyn Actions,
        messages: &mut MessageHolder,
        command: Command,
    ) -> ActionResult {
        let result = actions.execute(command);
        messages.from_result(&result);
        self.reload(actions);
        result
    }

    pub fn delete_item(
        &mut self,
        actions: &mut dyn Actions,
        messages: &mut MessageHolder,
        target: EntityRef,
    ) -> ActionResult {
        self.execute(actions, messages, Command::Delete(target))
    }

    pub fn archive_item(
        &mut self,
        actions: &mut dyn Actions,
        messages: &mut MessageHolder,
        target: EntityRef,
    ) -> ActionResult {
        self.execute(actions, messages, Command::Archive(target))
    }

    /// Flip the focused item's status towards the key's target, or back to
    /// active.
    pub fn toggle_current(
        &mut self,
        actions: &mut dyn Actions,
        messages: &mut MessageHolder,
        key: FlipKey,
    ) -> Option<ActionResult> {
        let (Some(target), Some(current)) = (self.focused_item(), self.focused_status()) else {
            messages.failure("Nothing selected");
            return None;
        };
        let Some(flip) = target.kind.flip_target(key) else {
            messages.failure(format!("Cannot {} a {}", key.verb(), target.kind));
            return None;
        };
        let status = toggle_status(current, flip);
        Some(self.execute(actions, messages, Command::SetStatus { target, status }))
    }

    /// Point the cursor at a freshly created item, if it is visible.
    pub fn select_created(&mut self, actions: &dyn Actions, created: EntityRef) {
        self.reload(actions);
        match created.kind {
            EntityKind::Track => {
                if let Some(i) = self.tracks.iter().position(|t| t.id == created.id) {
                    self.selected_track_idx = Some(i);
                    self.selected_project_idx = None;
                    self.selected_todo_idx = None;
                }
            }
            EntityKind::Project => {
                if let Some(i) = self.projects.iter().position(|p| p.id == created.id) {
                    self.selected_project_idx = Some(i);
                    self.selected_todo_idx = None;
                }
            }
            EntityKind::Todo => {
                if let Some(i) = self.todos.iter().position(|t| t.id == created.id) {
                    self.selected_todo_idx = Some(i);
                }
            }
            _ => return,
        }
        self.reload(actions);
    }

    /// Canonical entry for picking a transfer destination: tracks focused,
    /// first track highlighted.
    pub fn enter_pick_mode(&mut self, actions: &dyn Actions) {
        self.level = StructureLevel::TracksWithProjectsT;
        self.no_cursor = false;
        self.selected_track_idx = None;
        self.selected_project_idx = None;
        self.selected_todo_idx = None;
        self.reload(actions);
    }

    /// Descend from projects into the todo list with no todo selected
    pub fn descend_no_cursor(&mut self, actions: &dyn Actions) -> bool {
        if self.level != StructureLevel::TracksWithProjectsP || self.current_project_id.is_none()
        {
            return false;
        }
        self.level = StructureLevel::Todos;
        self.no_cursor = true;
        self.reload(actions);
        true
    }

    /// Undo [`StructureState::descend_no_cursor`]
    pub fn leave_no_cursor(&mut self, actions: &dyn Actions) {
        if self.no_cursor {
            self.no_cursor = false;
            self.level = StructureLevel::TracksWithProjectsP;
            self.reload(actions);
        }
    }

    /// Project a todo would move into: only resolvable once projects are focused
    pub fn destination_project_id(&self) -> Option<Id> {
        match self.level {
            StructureLevel::TracksWithProjectsP | StructureLevel::Todos => self.current_project_id,
            _ => None,
        }
    }

    /// Track a project would move into (or an idea be promoted under)
    pub fn destination_track_id(&self) -> Option<Id> {
        self.current_track_id
    }

    pub fn destination_project_name(&self) -> Option<&str> {
        self.destination_project_id()
            .and_then(|_| self.current_project())
            .map(|p| p.name.as_str())
    }

    pub fn destination_track_name(&self) -> Option<&str> {
        self.selected_track_idx.map(|i| self.tracks[i].name.as_str())
    }

    pub fn position(&self) -> StructurePosition {
        StructurePosition {
            level: self.level,
            track_idx: self.selected_track_idx,
            project_idx: self.selected_project_idx,
            todo_idx: self.selected_todo_idx,
        }
    }

    pub fn restore(&mut self, actions: &dyn Actions, position: StructurePosition) {
        self.level = position.level;
        self.no_cursor = false;
        self.selected_track_idx = position.track_idx;
        self.selected_project_idx = position.project_idx;
        self.selected_todo_idx = position.todo_idx;
        self.reload(actions);
    }
}

fn step(idx: Option<usize>, delta: isize, len: usize) -> Option<usize> {
    let idx = idx?;
    let max = len.checked_sub(1)?;
    Some(idx.saturating_add_signed(delta).min(max))
}
