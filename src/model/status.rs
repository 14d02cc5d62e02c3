use serde::{Deserialize, Serialize};

/// Entity identifier, allocated by the store
pub type Id = u64;

/// Lifecycle status shared by every kind of work item.
///
/// Which statuses are legal depends on the entity kind; see
/// [`EntityKind::statuses`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Active,
    Sleeping,
    Done,
    Cancelled,
    Finished,
    Deprecated,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Sleeping => "sleeping",
            Status::Done => "done",
            Status::Cancelled => "cancelled",
            Status::Finished => "finished",
            Status::Deprecated => "deprecated",
        }
    }

    pub fn parse_status(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Status::Active),
            "sleeping" => Some(Status::Sleeping),
            "done" => Some(Status::Done),
            "cancelled" => Some(Status::Cancelled),
            "finished" => Some(Status::Finished),
            "deprecated" => Some(Status::Deprecated),
            _ => None,
        }
    }

    /// Short marker used in list rows
    pub fn marker(self) -> &'static str {
        match self {
            Status::Active => " ",
            Status::Sleeping => "z",
            Status::Done => "x",
            Status::Cancelled => "-",
            Status::Finished => "x",
            Status::Deprecated => "~",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The kinds of stored entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Track,
    Project,
    Todo,
    BoxTodo,
    Idea,
    Session,
    Takeaway,
}

/// The three status toggle keys. Each maps to a per-kind flip target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipKey {
    Sleep,
    Cancel,
    Complete,
}

impl FlipKey {
    pub fn verb(self) -> &'static str {
        match self {
            FlipKey::Sleep => "sleep",
            FlipKey::Cancel => "cancel",
            FlipKey::Complete => "complete",
        }
    }
}

impl EntityKind {
    /// Legal statuses, in the order the status chip cycles through them.
    pub fn statuses(self) -> &'static [Status] {
        match self {
            EntityKind::Track => &[Status::Active, Status::Sleeping],
            EntityKind::Project => &[
                Status::Active,
                Status::Sleeping,
                Status::Finished,
                Status::Cancelled,
            ],
            EntityKind::Todo | EntityKind::BoxTodo => &[
                Status::Active,
                Status::Sleeping,
                Status::Done,
                Status::Cancelled,
            ],
            EntityKind::Idea => &[Status::Active, Status::Sleeping, Status::Deprecated],
            EntityKind::Session | EntityKind::Takeaway => &[],
        }
    }

    pub fn allows(self, status: Status) -> bool {
        self.statuses().contains(&status)
    }

    /// The status a toggle key flips this kind towards, if the kind has one.
    pub fn flip_target(self, key: FlipKey) -> Option<Status> {
        let target = match (self, key) {
            (_, FlipKey::Sleep) => Status::Sleeping,
            (EntityKind::Idea, FlipKey::Cancel) => Status::Deprecated,
            (_, FlipKey::Cancel) => Status::Cancelled,
            (EntityKind::Project, FlipKey::Complete) => Status::Finished,
            (_, FlipKey::Complete) => Status::Done,
        };
        self.allows(target).then_some(target)
    }

    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Track => "track",
            EntityKind::Project => "project",
            EntityKind::Todo => "todo",
            EntityKind::BoxTodo => "box todo",
            EntityKind::Idea => "idea",
            EntityKind::Session => "session",
            EntityKind::Takeaway => "takeaway",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A typed pointer to a stored entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: Id,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: Id) -> Self {
        EntityRef { kind, id }
    }
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} #{}", self.kind, self.id)
    }
}

/// Two-state flip relative to `Active`: an active item moves to `target`,
/// anything else resets to `Active`.
pub fn toggle_status(current: Status, target: Status) -> Status {
    if current == Status::Active {
        target
    } else {
        Status::Active
    }
}
