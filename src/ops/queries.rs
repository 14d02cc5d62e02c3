//! Row and inspector projections over [`Data`].

use crate::model::{
    ArchivedView, BoxTodo, BoxTodoView, Data, EntityKind, EntityRef, Id, Idea, IdeaView, InfoRow,
    Project, ProjectView, Session, SessionTarget, SessionView, TakeawayView, Todo, TodoView,
    Track, TrackView, TuiMeta,
};

pub fn tracks(data: &Data) -> Vec<TrackView> {
    data.tracks
        .values()
        .filter(|t| !t.archived)
        .map(|t| track_view(data, t))
        .collect()
}

pub fn projects(data: &Data, track_id: Id) -> Vec<ProjectView> {
    data.projects
        .values()
        .filter(|p| p.track_id == track_id && !p.archived)
        .map(|p| project_view(data, p))
        .collect()
}

pub fn todos(data: &Data, project_id: Id) -> Vec<TodoView> {
    data.todos
        .values()
        .filter(|t| t.project_id == project_id && !t.archived)
        .map(|t| todo_view(data, t))
        .collect()
}

pub fn box_todos(data: &Data) -> Vec<BoxTodoView> {
    data.box_todos
        .values()
        .filter(|b| !b.archived)
        .map(box_todo_view)
        .collect()
}

pub fn ideas(data: &Data) -> Vec<IdeaView> {
    data.ideas
        .values()
        .filter(|i| !i.archived)
        .map(idea_view)
        .collect()
}

/// Newest first; ties keep the later-logged session on top
pub fn sessions(data: &Data) -> Vec<SessionView> {
    let mut rows: Vec<SessionView> = data
        .sessions
        .values()
        .rev()
        .map(|s| session_view(data, s))
        .collect();
    rows.sort_by(|a, b| b.start.cmp(&a.start));
    rows
}

pub fn takeaways(data: &Data, session_id: Id) -> Vec<TakeawayView> {
    data.takeaways
        .values()
        .filter(|t| t.session_id == session_id)
        .map(|t| TakeawayView {
            id: t.id,
            session_id: t.session_id,
            content: t.content.clone(),
            created: t.created,
        })
        .collect()
}

/// Archived items grouped by kind: tracks, projects, todos, box todos, ideas
pub fn archived(data: &Data) -> Vec<ArchivedView> {
    let mut rows = Vec::new();
    for t in data.tracks.values().filter(|t| t.archived) {
        rows.push(ArchivedView {
            entity: EntityRef::new(EntityKind::Track, t.id),
            name: t.name.clone(),
            status: t.status,
            parent_name: None,
        });
    }
    for p in data.projects.values().filter(|p| p.archived) {
        rows.push(ArchivedView {
            entity: EntityRef::new(EntityKind::Project, p.id),
            name: p.name.clone(),
            status: p.status,
            parent_name: track_name(data, p.track_id),
        });
    }
    for t in data.todos.values().filter(|t| t.archived) {
        rows.push(ArchivedView {
            entity: EntityRef::new(EntityKind::Todo, t.id),
            name: t.name.clone(),
            status: t.status,
            parent_name: project_name(data, t.project_id),
        });
    }
    for b in data.box_todos.values().filter(|b| b.archived) {
        rows.push(ArchivedView {
            entity: EntityRef::new(EntityKind::BoxTodo, b.id),
            name: b.name.clone(),
            status: b.status,
            parent_name: Some("box".into()),
        });
    }
    for i in data.ideas.values().filter(|i| i.archived) {
        rows.push(ArchivedView {
            entity: EntityRef::new(EntityKind::Idea, i.id),
            name: i.name.clone(),
            status: i.status,
            parent_name: Some("ideas".into()),
        });
    }
    rows
}

pub fn todo(data: &Data, id: Id) -> Option<TodoView> {
    data.todos.get(&id).map(|t| todo_view(data, t))
}

pub fn project(data: &Data, id: Id) -> Option<ProjectView> {
    data.projects.get(&id).map(|p| project_view(data, p))
}

/// Inspector rows for any entity
pub fn info(data: &Data, target: EntityRef) -> Option<Vec<InfoRow>> {
    let id = target.id;
    let rows = match target.kind {
        EntityKind::Track => {
            let t = data.tracks.get(&id)?;
            let v = track_view(data, t);
            let mut rows = header(target, &t.name, &t.description);
            rows.push(InfoRow::new("Status", t.status.label()));
            rows.push(InfoRow::new("Projects", v.meta.child_count.to_string()));
            rows.push(archived_row(t.archived));
            rows.push(InfoRow::new("Created", t.created.format("%Y-%m-%d %H:%M").to_string()));
            rows
        }
        EntityKind::Project => {
            let p = data.projects.get(&id)?;
            let v = project_view(data, p);
            let mut rows = header(target, &p.name, &p.description);
            rows.push(InfoRow::new("Track", v.meta.parent_name.unwrap_or_default()));
            rows.push(InfoRow::new("Status", p.status.label()));
            rows.push(deadline_row(p.deadline));
            rows.push(InfoRow::new("Importance", hint_label(p.importance)));
            rows.push(InfoRow::new("Urgency", hint_label(p.urgency)));
            rows.push(InfoRow::new("Todos", v.meta.child_count.to_string()));
            rows.push(InfoRow::new("Sessions", v.meta.session_count.to_string()));
            rows.push(InfoRow::new("Focused", format_duration(project_seconds(data, id))));
            rows.push(archived_row(p.archived));
            rows.push(InfoRow::new("Created", p.created.format("%Y-%m-%d %H:%M").to_string()));
            rows
        }
        EntityKind::Todo => {
            let t = data.todos.get(&id)?;
            let v = todo_view(data, t);
            let mut rows = header(target, &t.name, &t.description);
            rows.push(InfoRow::new("Project", v.meta.parent_name.unwrap_or_default()));
            rows.push(InfoRow::new("Status", t.status.label()));
            rows.push(InfoRow::new(
                "Stages",
                format!("{}/{}", t.current_stage, t.total_stages),
            ));
            rows.push(deadline_row(t.deadline));
            rows.push(InfoRow::new("Importance", hint_label(t.importance)));
            rows.push(InfoRow::new("Urgency", hint_label(t.urgency)));
            rows.push(InfoRow::new("Sessions", v.meta.session_count.to_string()));
            rows.push(InfoRow::new("Focused", format_duration(todo_seconds(data, id))));
            rows.push(archived_row(t.archived));
            rows.push(InfoRow::new("Created", t.created.format("%Y-%m-%d %H:%M").to_string()));
            rows
        }
        EntityKind::BoxTodo => {
            let b = data.box_todos.get(&id)?;
            let mut rows = header(target, &b.name, &b.description);
            rows.push(InfoRow::new("Status", b.status.label()));
            rows.push(deadline_row(b.deadline));
            rows.push(InfoRow::new("Importance", hint_label(b.importance)));
            rows.push(InfoRow::new("Urgency", hint_label(b.urgency)));
            rows.push(archived_row(b.archived));
            rows.push(InfoRow::new("Created", b.created.format("%Y-%m-%d %H:%M").to_string()));
            rows
        }
        EntityKind::Idea => {
            let i = data.ideas.get(&id)?;
            let mut rows = header(target, &i.name, &i.description);
            rows.push(InfoRow::new("Status", i.status.label()));
            rows.push(InfoRow::new("Importance", hint_label(i.importance)));
            rows.push(archived_row(i.archived));
            rows.push(InfoRow::new("Created", i.created.format("%Y-%m-%d %H:%M").to_string()));
            rows
        }
        EntityKind::Session => {
            let s = data.sessions.get(&id)?;
            let v = session_view(data, s);
            let mut rows = vec![
                InfoRow::new("Kind", EntityKind::Session.label()),
                InfoRow::new("On", v.target_name),
                InfoRow::new("Start", s.start.format("%Y-%m-%d %H:%M").to_string()),
                InfoRow::new("End", s.end.format("%Y-%m-%d %H:%M").to_string()),
                InfoRow::new("Duration", format_duration(s.duration_secs)),
                InfoRow::new("Takeaways", v.meta.child_count.to_string()),
            ];
            for note in &s.notes {
                rows.push(InfoRow::new("Note", note.clone()));
            }
            rows
        }
        EntityKind::Takeaway => {
            let t = data.takeaways.get(&id)?;
            vec![
                InfoRow::new("Kind", EntityKind::Takeaway.label()),
                InfoRow::new("Session", format!("#{}", t.session_id)),
                InfoRow::new("Content", t.content.clone()),
                InfoRow::new("Created", t.created.format("%Y-%m-%d %H:%M").to_string()),
            ]
        }
    };
    Some(rows)
}

/// "1h 05m", "25m", "40s"
pub fn format_duration(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    if hours > 0 {
        format!("{}h {:02}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        format!("{}s", secs)
    }
}

pub fn hint_label(value: u8) -> &'static str {
    match value {
        0 => "-",
        1 => "low",
        2 => "medium",
        _ => "high",
    }
}

fn header(target: EntityRef, name: &str, description: &str) -> Vec<InfoRow> {
    let mut rows = vec![
        InfoRow::new("Kind", target.kind.label()),
        InfoRow::new("Name", name),
    ];
    if !description.is_empty() {
        rows.push(InfoRow::new("Description", description));
    }
    rows
}

fn deadline_row(deadline: Option<chrono::NaiveDate>) -> InfoRow {
    InfoRow::new(
        "Deadline",
        deadline.map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string()),
    )
}

fn archived_row(archived: bool) -> InfoRow {
    InfoRow::new("Archived", if archived { "yes" } else { "no" })
}

fn track_name(data: &Data, track_id: Id) -> Option<String> {
    data.tracks.get(&track_id).map(|t| t.name.clone())
}

fn project_name(data: &Data, project_id: Id) -> Option<String> {
    data.projects.get(&project_id).map(|p| p.name.clone())
}

fn todo_seconds(data: &Data, todo_id: Id) -> u64 {
    data.sessions
        .values()
        .filter(|s| s.todo_id() == Some(todo_id))
        .map(|s| s.duration_secs)
        .sum()
}

fn project_seconds(data: &Data, project_id: Id) -> u64 {
    data.sessions
        .values()
        .filter(|s| match s.target {
            SessionTarget::Project(pid) => pid == project_id,
            SessionTarget::Todo(tid) => data
                .todos
                .get(&tid)
                .is_some_and(|t| t.project_id == project_id),
        })
        .map(|s| s.duration_secs)
        .sum()
}

fn track_view(data: &Data, t: &Track) -> TrackView {
    TrackView {
        id: t.id,
        name: t.name.clone(),
        description: t.description.clone(),
        status: t.status,
        archived: t.archived,
        meta: TuiMeta {
            session_count: 0,
            child_count: data
                .projects
                .values()
                .filter(|p| p.track_id == t.id && !p.archived)
                .count(),
            parent_name: None,
        },
    }
}

fn project_view(data: &Data, p: &Project) -> ProjectView {
    ProjectView {
        id: p.id,
        track_id: p.track_id,
        name: p.name.clone(),
        description: p.description.clone(),
        status: p.status,
        archived: p.archived,
        deadline: p.deadline,
        importance: p.importance,
        urgency: p.urgency,
        meta: TuiMeta {
            session_count: data.project_session_count(p.id),
            child_count: data
                .todos
                .values()
                .filter(|t| t.project_id == p.id && !t.archived)
                .count(),
            parent_name: track_name(data, p.track_id),
        },
    }
}

fn todo_view(data: &Data, t: &Todo) -> TodoView {
    TodoView {
        id: t.id,
        project_id: t.project_id,
        name: t.name.clone(),
        description: t.description.clone(),
        status: t.status,
        archived: t.archived,
        deadline: t.deadline,
        importance: t.importance,
        urgency: t.urgency,
        current_stage: t.current_stage,
        total_stages: t.total_stages,
        meta: TuiMeta {
            session_count: data.todo_session_count(t.id),
            child_count: 0,
            parent_name: project_name(data, t.project_id),
        },
    }
}

fn box_todo_view(b: &BoxTodo) -> BoxTodoView {
    BoxTodoView {
        id: b.id,
        name: b.name.clone(),
        description: b.description.clone(),
        status: b.status,
        archived: b.archived,
        deadline: b.deadline,
        importance: b.importance,
        urgency: b.urgency,
        meta: TuiMeta::default(),
    }
}

fn idea_view(i: &Idea) -> IdeaView {
    IdeaView {
        id: i.id,
        name: i.name.clone(),
        description: i.description.clone(),
        status: i.status,
        archived: i.archived,
        importance: i.importance,
        meta: TuiMeta::default(),
    }
}

fn session_view(data: &Data, s: &Session) -> SessionView {
    let target_name = match s.target {
        SessionTarget::Todo(tid) => match data.todos.get(&tid) {
            Some(todo) => match project_name(data, todo.project_id) {
                Some(p) => format!("{} / {}", p, todo.name),
                None => todo.name.clone(),
            },
            None => "(deleted todo)".to_string(),
        },
        SessionTarget::Project(pid) => {
            project_name(data, pid).unwrap_or_else(|| "(deleted project)".to_string())
        }
    };
    let project_id = match s.target {
        SessionTarget::Project(pid) => Some(pid),
        SessionTarget::Todo(tid) => data.todos.get(&tid).map(|t| t.project_id),
    };
    SessionView {
        id: s.id,
        start: s.start,
        end: s.end,
        duration_secs: s.duration_secs,
        todo_id: s.todo_id(),
        project_id,
        target_name,
        notes: s.notes.clone(),
        meta: TuiMeta {
            session_count: 0,
            child_count: data
                .takeaways
                .values()
                .filter(|t| t.session_id == s.id)
                .count(),
            parent_name: None,
        },
    }
}
