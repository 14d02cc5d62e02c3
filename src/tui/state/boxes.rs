use crate::model::{BoxTodoView, EntityKind, EntityRef, FlipKey, IdeaView, Status, toggle_status};
use crate::ops::{ActionResult, Actions, Command};

use super::message::MessageHolder;
use super::structure::clamp_index;

/// The two inbox lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoxList {
    #[default]
    Todos,
    Ideas,
}

impl BoxList {
    pub fn label(self) -> &'static str {
        match self {
            BoxList::Todos => "todos",
            BoxList::Ideas => "ideas",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "todos" => Some(BoxList::Todos),
            "ideas" => Some(BoxList::Ideas),
            _ => None,
        }
    }
}

/// Cursor controller over the inbox: untriaged todos and ideas.
#[derive(Debug, Default)]
pub struct BoxState {
    pub list: BoxList,
    pub todos: Vec<BoxTodoView>,
    pub ideas: Vec<IdeaView>,
    pub todo_idx: Option<usize>,
    pub idea_idx: Option<usize>,
}

impl BoxState {
    pub fn reload(&mut self, actions: &dyn Actions) {
        self.todos = actions.box_todos();
        self.ideas = actions.ideas();
        self.todo_idx = clamp_index(self.todo_idx, self.todos.len());
        self.idea_idx = clamp_index(self.idea_idx, self.ideas.len());
    }

    pub fn switch_list(&mut self, list: BoxList) {
        self.list = list;
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let (idx, len) = match self.list {
            BoxList::Todos => (&mut self.todo_idx, self.todos.len()),
            BoxList::Ideas => (&mut self.idea_idx, self.ideas.len()),
        };
        if let Some(i) = *idx {
            *idx = Some(i.saturating_add_signed(delta).min(len.saturating_sub(1)));
        }
    }

    pub fn len(&self) -> usize {
        self.todos.len() + self.ideas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn focused_item(&self) -> Option<EntityRef> {
        match self.list {
            BoxList::Todos => self
                .todo_idx
                .map(|i| EntityRef::new(EntityKind::BoxTodo, self.todos[i].id)),
            BoxList::Ideas => self
                .idea_idx
                .map(|i| EntityRef::new(EntityKind::Idea, self.ideas[i].id)),
        }
    }

    pub fn focused_name(&self) -> Option<&str> {
        match self.list {
            BoxList::Todos => self.todo_idx.map(|i| self.todos[i].name.as_str()),
            BoxList::Ideas => self.idea_idx.map(|i| self.ideas[i].name.as_str()),
        }
    }

    pub fn current_todo(&self) -> Option<&BoxTodoView> {
        self.todo_idx.map(|i| &self.todos[i])
    }

    pub fn current_idea(&self) -> Option<&IdeaView> {
        self.idea_idx.map(|i| &self.ideas[i])
    }

    fn focused_status(&self) -> Option<Status> {
        match self.list {
            BoxList::Todos => self.current_todo().map(|t| t.status),
            BoxList::Ideas => self.current_idea().map(|i| i.status),
        }
    }

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

    /// Put the cursor on a newly created box item
    pub fn select_created(&mut self, actions: &dyn Actions, created: EntityRef) {
        self.reload(actions);
        match created.kind {
            EntityKind::BoxTodo => {
                self.list = BoxList::Todos;
                if let Some(i) = self.todos.iter().position(|t| t.id == created.id) {
                    self.todo_idx = Some(i);
                }
            }
            EntityKind::Idea => {
                self.list = BoxList::Ideas;
                if let Some(i) = self.ideas.iter().position(|t| t.id == created.id) {
                    self.idea_idx = Some(i);
                }
            }
            _ => {}
        }
    }
}
