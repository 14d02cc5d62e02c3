use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::inbox::{BoxTodo, Idea};
use super::session::{Session, Takeaway};
use super::status::Id;
use super::track::{Project, Todo, Track};

/// Everything stint persists, as written to `data.json`.
///
/// Maps keep insertion order, which is also the display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Data {
    #[serde(default = "first_id")]
    pub next_id: Id,
    #[serde(default)]
    pub tracks: IndexMap<Id, Track>,
    #[serde(default)]
    pub projects: IndexMap<Id, Project>,
    #[serde(default)]
    pub todos: IndexMap<Id, Todo>,
    #[serde(default)]
    pub box_todos: IndexMap<Id, BoxTodo>,
    #[serde(default)]
    pub ideas: IndexMap<Id, Idea>,
    #[serde(default)]
    pub sessions: IndexMap<Id, Session>,
    #[serde(default)]
    pub takeaways: IndexMap<Id, Takeaway>,
}

fn first_id() -> Id {
    1
}

impl Default for Data {
    fn default() -> Self {
        Data {
            next_id: first_id(),
            tracks: IndexMap::new(),
            projects: IndexMap::new(),
            todos: IndexMap::new(),
            box_todos: IndexMap::new(),
            ideas: IndexMap::new(),
            sessions: IndexMap::new(),
            takeaways: IndexMap::new(),
        }
    }
}

impl Data {
    /// Hand out the next id. Ids are never reused, even after deletes.
    pub fn alloc_id(&mut self) -> Id {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Number of sessions logged directly against a todo
    pub fn todo_session_count(&self, todo_id: Id) -> usize {
        self.sessions
            .values()
            .filter(|s| s.todo_id() == Some(todo_id))
            .count()
    }

    /// Number of sessions logged against a project or any of its todos
    pub fn project_session_count(&self, project_id: Id) -> usize {
        self.sessions
            .values()
            .filter(|s| match (s.project_id(), s.todo_id()) {
                (Some(pid), _) => pid == project_id,
                (None, Some(tid)) => self
                    .todos
                    .get(&tid)
                    .is_some_and(|t| t.project_id == project_id),
                (None, None) => false,
            })
            .count()
    }
}
