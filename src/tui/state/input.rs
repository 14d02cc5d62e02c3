//! Form sessions: ADD/EDIT data entry for every entity kind.
//!
//! Which fields a form shows, and in what order, comes from one table,
//! [`FIELD_MEMBERSHIP`]. Text fields are edited through a grapheme-aware
//! buffer; chip fields only through step commands.

use chrono::NaiveDate;

use crate::model::{EntityKind, EntityRef, Id, Status, TodoView};
use crate::ops::{ActionResult, Actions, Command, NewEntity};
use crate::util::unicode;

/// The entity or flow a form session edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormType {
    Track,
    Project,
    StructureTodo,
    BoxTodo,
    BoxIdea,
    NowStageUpdate,
    SessionDescription,
    Takeaway,
}

impl FormType {
    pub fn title(self) -> &'static str {
        match self {
            FormType::Track => "Track",
            FormType::Project => "Project",
            FormType::StructureTodo => "Todo",
            FormType::BoxTodo => "Box todo",
            FormType::BoxIdea => "Idea",
            FormType::NowStageUpdate => "Stage progress",
            FormType::SessionDescription => "What did you do?",
            FormType::Takeaway => "Takeaway",
        }
    }

    /// Stored kind behind an entity form
    pub fn entity_kind(self) -> Option<EntityKind> {
        match self {
            FormType::Track => Some(EntityKind::Track),
            FormType::Project => Some(EntityKind::Project),
            FormType::StructureTodo => Some(EntityKind::Todo),
            FormType::BoxTodo => Some(EntityKind::BoxTodo),
            FormType::BoxIdea => Some(EntityKind::Idea),
            FormType::NowStageUpdate | FormType::SessionDescription | FormType::Takeaway => None,
        }
    }

    /// Repeating capture loops end on an empty entry
    pub fn is_entry_loop(self) -> bool {
        matches!(self, FormType::SessionDescription | FormType::Takeaway)
    }
}

/// One input field of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Content,
    Deadline,
    Importance,
    Urgency,
    TotalStages,
    CurrentStage,
    Status,
    StageDelta,
}

/// Commit-diff unit: fields in one group are written by one command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGroup {
    Title,
    Content,
    Deadline,
    Hints,
    Stages,
    Status,
    Progress,
}

const ENTITY_FORMS: &[FormType] = &[
    FormType::Track,
    FormType::Project,
    FormType::StructureTodo,
    FormType::BoxTodo,
    FormType::BoxIdea,
];

const DEADLINE_FORMS: &[FormType] = &[FormType::Project, FormType::StructureTodo, FormType::BoxTodo];

/// Every field with the forms it belongs to, in display order
pub const FIELD_MEMBERSHIP: &[(FormField, &[FormType])] = &[
    (FormField::Name, ENTITY_FORMS),
    (
        FormField::Content,
        &[
            FormType::Track,
            FormType::Project,
            FormType::StructureTodo,
            FormType::BoxTodo,
            FormType::BoxIdea,
            FormType::SessionDescription,
            FormType::Takeaway,
        ],
    ),
    (FormField::Deadline, DEADLINE_FORMS),
    (
        FormField::Importance,
        &[
            FormType::Project,
            FormType::StructureTodo,
            FormType::BoxTodo,
            FormType::BoxIdea,
        ],
    ),
    (FormField::Urgency, DEADLINE_FORMS),
    (FormField::TotalStages, &[FormType::StructureTodo]),
    (FormField::CurrentStage, &[FormType::StructureTodo]),
    (FormField::Status, ENTITY_FORMS),
    (FormField::StageDelta, &[FormType::NowStageUpdate]),
];

/// Ordered active fields of a form
pub fn fields_for(form: FormType) -> Vec<FormField> {
    FIELD_MEMBERSHIP
        .iter()
        .filter(|(_, forms)| forms.contains(&form))
        .map(|(field, _)| *field)
        .collect()
}

impl FormField {
    pub fn is_text(self) -> bool {
        matches!(
            self,
            FormField::Name | FormField::Content | FormField::Deadline
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Content => "Notes",
            FormField::Deadline => "Deadline",
            FormField::Importance => "Importance",
            FormField::Urgency => "Urgency",
            FormField::TotalStages => "Stages",
            FormField::CurrentStage => "Done",
            FormField::Status => "Status",
            FormField::StageDelta => "Stages done",
        }
    }

    pub fn group(self) -> FieldGroup {
        match self {
            FormField::Name => FieldGroup::Title,
            FormField::Content => FieldGroup::Content,
            FormField::Deadline => FieldGroup::Deadline,
            FormField::Importance | FormField::Urgency => FieldGroup::Hints,
            FormField::TotalStages | FormField::CurrentStage => FieldGroup::Stages,
            FormField::Status => FieldGroup::Status,
            FormField::StageDelta => FieldGroup::Progress,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    Add,
    Edit,
}

/// Parent ids a form needs to build its command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormContext {
    pub track_id: Option<Id>,
    pub project_id: Option<Id>,
    pub session_id: Option<Id>,
}

/// Live field values of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    pub name: String,
    pub content: String,
    pub deadline: String,
    pub status: Status,
    pub importance: u8,
    pub urgency: u8,
    pub current_stage: u32,
    pub total_stages: u32,
    pub stage_delta: u32,
}

impl Default for FormValues {
    fn default() -> Self {
        FormValues {
            name: String::new(),
            content: String::new(),
            deadline: String::new(),
            status: Status::Active,
            importance: 0,
            urgency: 0,
            current_stage: 0,
            total_stages: 1,
            stage_delta: 0,
        }
    }
}

impl FormValues {
    fn text(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Content => &self.content,
            FormField::Deadline => &self.deadline,
            _ => "",
        }
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Name => Some(&mut self.name),
            FormField::Content => Some(&mut self.content),
            FormField::Deadline => Some(&mut self.deadline),
            _ => None,
        }
    }

    /// Display string for any field
    pub fn display(&self, field: FormField) -> String {
        match field {
            FormField::Name | FormField::Content | FormField::Deadline => {
                self.text(field).to_string()
            }
            FormField::Importance => hint_chip(self.importance),
            FormField::Urgency => hint_chip(self.urgency),
            FormField::TotalStages => self.total_stages.to_string(),
            FormField::CurrentStage => self.current_stage.to_string(),
            FormField::Status => self.status.label().to_string(),
            FormField::StageDelta => self.stage_delta.to_string(),
        }
    }

    fn group_differs(&self, other: &FormValues, group: FieldGroup) -> bool {
        match group {
            FieldGroup::Title => self.name.trim() != other.name.trim(),
            FieldGroup::Content => self.content.trim() != other.content.trim(),
            FieldGroup::Deadline => self.deadline.trim() != other.deadline.trim(),
            FieldGroup::Hints => (self.importance, self.urgency) != (other.importance, other.urgency),
            FieldGroup::Stages => {
                (self.current_stage, self.total_stages) != (other.current_stage, other.total_stages)
            }
            FieldGroup::Status => self.status != other.status,
            FieldGroup::Progress => self.stage_delta != other.stage_delta,
        }
    }

    fn copy_group(&mut self, from: &FormValues, group: FieldGroup) {
        match group {
            FieldGroup::Title => self.name = from.name.clone(),
            FieldGroup::Content => self.content = from.content.clone(),
            FieldGroup::Deadline => self.deadline = from.deadline.clone(),
            FieldGroup::Hints => {
                self.importance = from.importance;
                self.urgency = from.urgency;
            }
            FieldGroup::Stages => {
                self.current_stage = from.current_stage;
                self.total_stages = from.total_stages;
            }
            FieldGroup::Status => self.status = from.status,
            FieldGroup::Progress => self.stage_delta = from.stage_delta,
        }
    }

    /// Pin stage counters to the status: done means every stage is complete,
    /// anything else leaves at least one open.
    fn enforce_stages(&mut self) {
        self.total_stages = self.total_stages.max(1);
        if self.status == Status::Done {
            self.current_stage = self.total_stages;
        } else {
            self.current_stage = self.current_stage.min(self.total_stages - 1);
        }
    }
}

fn hint_chip(value: u8) -> String {
    match value {
        0 => "-".to_string(),
        n => "!".repeat(usize::from(n)),
    }
}

/// Empty means no deadline
pub fn parse_deadline(s: &str) -> Result<Option<NaiveDate>, String> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| format!("Deadline must be YYYY-MM-DD, got \"{}\"", s))
}

/// One ADD/EDIT interaction
#[derive(Debug, Clone)]
pub struct FormSession {
    pub form: FormType,
    pub purpose: Purpose,
    pub target_id: Option<Id>,
    pub context: FormContext,
    pub values: FormValues,
    /// Snapshot taken when an EDIT session starts
    original: Option<FormValues>,
    pub fields: Vec<FormField>,
    pub focus: usize,
    /// Byte offset into the focused text field
    pub cursor: usize,
    /// Largest stage delta a NowStageUpdate may request
    pub stage_limit: u32,
    /// Entries captured so far in a repeating loop
    pub entries: usize,
}

impl FormSession {
    fn new(form: FormType, purpose: Purpose, context: FormContext, values: FormValues) -> Self {
        let mut session = FormSession {
            form,
            purpose,
            target_id: None,
            context,
            values,
            original: None,
            fields: fields_for(form),
            focus: 0,
            cursor: 0,
            stage_limit: 0,
            entries: 0,
        };
        session.cursor_to_end();
        session
    }

    pub fn focused_field(&self) -> Option<FormField> {
        self.fields.get(self.focus).copied()
    }

    pub fn is_edit(&self) -> bool {
        self.purpose == Purpose::Edit
    }

    fn focused_text(&self) -> Option<&str> {
        let field = self.focused_field().filter(|f| f.is_text())?;
        Some(self.values.text(field))
    }

    fn cursor_to_end(&mut self) {
        self.cursor = self.focused_text().map_or(0, str::len);
    }

    fn edit_text(&mut self, f: impl FnOnce(&mut String, &mut usize)) -> bool {
        let Some(field) = self.focused_field().filter(|f| f.is_text()) else {
            return false;
        };
        let mut cursor = self.cursor;
        if let Some(text) = self.values.text_mut(field) {
            f(text, &mut cursor);
        }
        self.cursor = cursor;
        true
    }

    fn entity_ref(&self) -> Option<EntityRef> {
        Some(EntityRef::new(self.form.entity_kind()?, self.target_id?))
    }

    fn status_options(&self) -> &'static [Status] {
        match self.form.entity_kind() {
            Some(kind) => kind.statuses(),
            None => &[],
        }
    }
}

/// What a submit did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submit {
    Created { target: EntityRef, message: String },
    Updated(String),
    /// EDIT with nothing changed; no writes issued
    NoChanges,
    /// Empty ADD; dropped without a message
    Cancelled,
    /// Rejected locally before any write; the session stays open
    Invalid(String),
    /// The store refused; the session stays open
    Failed(String),
    StageUpdated(ActionResult),
    EntryAdded(String),
    /// Empty entry closed a capture loop
    LoopEnded,
}

/// The form engine. At most one session at a time.
#[derive(Debug, Default)]
pub struct InputState {
    session: Option<FormSession>,
}

impl InputState {
    pub fn session(&self) -> Option<&FormSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn start_add(&mut self, form: FormType, context: FormContext) {
        self.session = Some(FormSession::new(
            form,
            Purpose::Add,
            context,
            FormValues::default(),
        ));
    }

    pub fn start_edit(
        &mut self,
        form: FormType,
        target_id: Id,
        context: FormContext,
        mut values: FormValues,
    ) {
        if form == FormType::StructureTodo {
            values.enforce_stages();
        }
        let mut session = FormSession::new(form, Purpose::Edit, context, values.clone());
        session.target_id = Some(target_id);
        session.original = Some(values);
        self.session = Some(session);
    }

    /// Ask how many stages a finished session completed
    pub fn start_stage_update(&mut self, todo: &TodoView) {
        let mut session = FormSession::new(
            FormType::NowStageUpdate,
            Purpose::Add,
            FormContext {
                project_id: Some(todo.project_id),
                ..Default::default()
            },
            FormValues {
                name: todo.name.clone(),
                current_stage: todo.current_stage,
                total_stages: todo.total_stages,
                ..Default::default()
            },
        );
        session.target_id = Some(todo.id);
        session.stage_limit = todo.total_stages.saturating_sub(todo.current_stage);
        session.values.stage_delta = session.stage_limit.min(1);
        self.session = Some(session);
    }

    /// Begin a SessionDescription or Takeaway capture loop
    pub fn start_entry_loop(&mut self, form: FormType, session_id: Id) {
        self.start_add(
            form,
            FormContext {
                session_id: Some(session_id),
                ..Default::default()
            },
        );
    }

    /// Drop the session, returning it so the caller can chain
    pub fn cancel(&mut self) -> Option<FormSession> {
        self.session.take()
    }

    pub fn focus_next(&mut self) {
        if let Some(s) = &mut self.session
            && !s.fields.is_empty()
        {
            s.focus = (s.focus + 1) % s.fields.len();
            s.cursor_to_end();
        }
    }

    pub fn focus_prev(&mut self) {
        if let Some(s) = &mut self.session
            && !s.fields.is_empty()
        {
            s.focus = (s.focus + s.fields.len() - 1) % s.fields.len();
            s.cursor_to_end();
        }
    }

    pub fn focused_is_text(&self) -> bool {
        self.session
            .as_ref()
            .and_then(FormSession::focused_field)
            .is_some_and(FormField::is_text)
    }

    pub fn insert_char(&mut self, c: char) -> bool {
        let Some(s) = &mut self.session else {
            return false;
        };
        s.edit_text(|text, cursor| {
            text.insert(*cursor, c);
            *cursor += c.len_utf8();
        })
    }

    pub fn backspace(&mut self) -> bool {
        let Some(s) = &mut self.session else {
            return false;
        };
        s.edit_text(|text, cursor| {
            if let Some(prev) = unicode::prev_grapheme_boundary(text, *cursor) {
                text.replace_range(prev..*cursor, "");
                *cursor = prev;
            }
        })
    }

    pub fn delete_forward(&mut self) -> bool {
        let Some(s) = &mut self.session else {
            return false;
        };
        s.edit_text(|text, cursor| {
            if let Some(next) = unicode::next_grapheme_boundary(text, *cursor) {
                text.replace_range(*cursor..next, "");
            }
        })
    }

    /// Delete the word left of the cursor
    pub fn delete_word_back(&mut self) -> bool {
        let Some(s) = &mut self.session else {
            return false;
        };
        s.edit_text(|text, cursor| {
            let start = unicode::word_boundary_left(text, *cursor);
            text.replace_range(start..*cursor, "");
            *cursor = start;
        })
    }

    /// Delete everything left of the cursor
    pub fn clear_to_start(&mut self) -> bool {
        let Some(s) = &mut self.session else {
            return false;
        };
        s.edit_text(|text, cursor| {
            text.replace_range(..*cursor, "");
            *cursor = 0;
        })
    }

    pub fn cursor_left(&mut self) -> bool {
        let Some(s) = &mut self.session else {
            return false;
        };
        s.edit_text(|text, cursor| {
            if let Some(prev) = unicode::prev_grapheme_boundary(text, *cursor) {
                *cursor = prev;
            }
        })
    }

    pub fn cursor_right(&mut self) -> bool {
        let Some(s) = &mut self.session else {
            return false;
        };
        s.edit_text(|text, cursor| {
            if let Some(next) = unicode::next_grapheme_boundary(text, *cursor) {
                *cursor = next;
            }
        })
    }

    pub fn cursor_home(&mut self) -> bool {
        let Some(s) = &mut self.session else {
            return false;
        };
        s.edit_text(|_, cursor| *cursor = 0)
    }

    pub fn cursor_end(&mut self) -> bool {
        let Some(s) = &mut self.session else {
            return false;
        };
        s.edit_text(|text, cursor| *cursor = text.len())
    }

    /// Step the focused chip up or down. Text fields ignore it.
    pub fn step(&mut self, delta: i32) -> bool {
        let Some(s) = &mut self.session else {
            return false;
        };
        let Some(field) = s.focused_field() else {
            return false;
        };
        let options = s.status_options();
        let v = &mut s.values;
        match field {
            FormField::Importance => v.importance = step_u8(v.importance, delta, 3),
            FormField::Urgency => v.urgency = step_u8(v.urgency, delta, 3),
            FormField::TotalStages => v.total_stages = step_u32(v.total_stages, delta, 1, 99),
            FormField::CurrentStage => {
                v.current_stage = step_u32(v.current_stage, delta, 0, v.total_stages)
            }
            FormField::StageDelta => {
                v.stage_delta = step_u32(v.stage_delta, delta, 0, s.stage_limit)
            }
            FormField::Status => v.status = cycle_status(options, v.status, delta),
            FormField::Name | FormField::Content | FormField::Deadline => return false,
        }
        if s.form == FormType::StructureTodo {
            s.values.enforce_stages();
        }
        true
    }

    /// Space: cycles a status chip, types a space in text, no-op elsewhere.
    pub fn cycle(&mut self) -> bool {
        match self.session.as_ref().and_then(FormSession::focused_field) {
            Some(FormField::Status) => self.step(1),
            Some(f) if f.is_text() => self.insert_char(' '),
            _ => false,
        }
    }

    /// Commit the session against the store.
    pub fn submit(&mut self, actions: &mut dyn Actions) -> Submit {
        let Some(session) = self.session.as_mut() else {
            return Submit::Cancelled;
        };
        let outcome = match (session.form, session.purpose) {
            (FormType::NowStageUpdate, _) => submit_stage_update(session, actions),
            (form, _) if form.is_entry_loop() => submit_entry(session, actions),
            (_, Purpose::Add) => submit_add(session, actions),
            (_, Purpose::Edit) => submit_edit(session, actions),
        };
        let keep_open = matches!(
            outcome,
            Submit::Invalid(_) | Submit::Failed(_) | Submit::EntryAdded(_)
        );
        if !keep_open {
            self.session = None;
        }
        outcome
    }
}

fn step_u8(value: u8, delta: i32, max: u8) -> u8 {
    (i32::from(value) + delta).clamp(0, i32::from(max)) as u8
}

fn step_u32(value: u32, delta: i32, min: u32, max: u32) -> u32 {
    (i64::from(value) + i64::from(delta)).clamp(i64::from(min), i64::from(max.max(min))) as u32
}

fn cycle_status(options: &[Status], current: Status, delta: i32) -> Status {
    if options.is_empty() {
        return current;
    }
    let len = options.len() as i32;
    let idx = options.iter().position(|s| *s == current).unwrap_or(0) as i32;
    options[(idx + delta).rem_euclid(len) as usize]
}

fn submit_add(session: &mut FormSession, actions: &mut dyn Actions) -> Submit {
    let v = &session.values;
    let name = v.name.trim().to_string();
    let content = v.content.trim().to_string();
    if name.is_empty() && content.is_empty() {
        return Submit::Cancelled;
    }
    if name.is_empty() {
        return Submit::Invalid("Name is required".into());
    }
    let deadline = match parse_deadline(&v.deadline) {
        Ok(d) => d,
        Err(msg) => return Submit::Invalid(msg),
    };
    let new = match session.form {
        FormType::Track => NewEntity::Track {
            name,
            description: content,
        },
        FormType::Project => {
            let Some(track_id) = session.context.track_id else {
                return Submit::Invalid("No track selected".into());
            };
            NewEntity::Project {
                track_id,
                name,
                description: content,
                deadline,
                importance: v.importance,
                urgency: v.urgency,
            }
        }
        FormType::StructureTodo => {
            let Some(project_id) = session.context.project_id else {
                return Submit::Invalid("No project selected".into());
            };
            NewEntity::Todo {
                project_id,
                name,
                description: content,
                deadline,
                importance: v.importance,
                urgency: v.urgency,
                current_stage: v.current_stage.min(v.total_stages),
                total_stages: v.total_stages,
            }
        }
        FormType::BoxTodo => NewEntity::BoxTodo {
            name,
            description: content,
            deadline,
            importance: v.importance,
            urgency: v.urgency,
        },
        FormType::BoxIdea => NewEntity::Idea {
            name,
            description: content,
            importance: v.importance,
        },
        FormType::NowStageUpdate | FormType::SessionDescription | FormType::Takeaway => {
            return Submit::Cancelled;
        }
    };
    let status = v.status;
    let created = actions.execute(Command::Create(new));
    if created.is_failure() {
        return Submit::Failed(created.message);
    }
    let (Some(id), Some(kind)) = (created.data, session.form.entity_kind()) else {
        return Submit::Failed("Store did not return an id".into());
    };
    let target = EntityRef::new(kind, id);
    let mut message = created.message;
    if status != Status::Active {
        let follow_up = actions.execute(Command::SetStatus { target, status });
        if follow_up.is_failure() {
            message = format!("{}, but: {}", message, follow_up.message);
        }
    }
    Submit::Created { target, message }
}

fn submit_edit(session: &mut FormSession, actions: &mut dyn Actions) -> Submit {
    let Some(target) = session.entity_ref() else {
        return Submit::Failed("Nothing to edit".into());
    };
    let Some(original) = session.original.clone() else {
        return Submit::Failed("Nothing to edit".into());
    };
    let live = session.values.clone();

    if live.name.trim().is_empty() {
        return Submit::Invalid("Name is required".into());
    }
    let deadline = match parse_deadline(&live.deadline) {
        Ok(d) => d,
        Err(msg) => return Submit::Invalid(msg),
    };

    let groups = [
        FieldGroup::Title,
        FieldGroup::Content,
        FieldGroup::Deadline,
        FieldGroup::Hints,
        FieldGroup::Stages,
        FieldGroup::Status,
    ];
    let present: Vec<FieldGroup> = session.fields.iter().map(|f| f.group()).collect();
    let mut written = 0;
    let mut last_message = String::new();
    for group in groups {
        if !present.contains(&group) || !live.group_differs(&original, group) {
            continue;
        }
        let command = match group {
            FieldGroup::Title => Command::Rename {
                target,
                name: live.name.clone(),
            },
            FieldGroup::Content => Command::SetDescription {
                target,
                description: live.content.clone(),
            },
            FieldGroup::Deadline => Command::SetDeadline { target, deadline },
            FieldGroup::Hints => Command::SetHints {
                target,
                importance: live.importance,
                urgency: live.urgency,
            },
            FieldGroup::Stages => Command::SetStages {
                todo_id: target.id,
                current: live.current_stage,
                total: live.total_stages,
            },
            FieldGroup::Status => Command::SetStatus {
                target,
                status: live.status,
            },
            FieldGroup::Progress => continue,
        };
        let result = actions.execute(command);
        if result.is_failure() {
            return Submit::Failed(result.message);
        }
        if let Some(snapshot) = session.original.as_mut() {
            snapshot.copy_group(&live, group);
        }
        written += 1;
        last_message = result.message;
    }
    match written {
        0 => Submit::NoChanges,
        1 => Submit::Updated(last_message),
        _ => Submit::Updated(format!("Updated \"{}\"", live.name.trim())),
    }
}

fn submit_stage_update(session: &mut FormSession, actions: &mut dyn Actions) -> Submit {
    let Some(todo_id) = session.target_id else {
        return Submit::StageUpdated(ActionResult::fail("No todo to update"));
    };
    // Re-read: the todo may have changed since the form opened
    let Some(todo) = actions.todo(todo_id) else {
        return Submit::StageUpdated(ActionResult::fail(format!("todo #{} not found", todo_id)));
    };
    let room = todo.total_stages.saturating_sub(todo.current_stage);
    let delta = session.values.stage_delta.min(room);
    if delta == 0 {
        return Submit::StageUpdated(ActionResult::noop("No stage progress"));
    }
    Submit::StageUpdated(actions.execute(Command::AdvanceStage { todo_id, delta }))
}

fn submit_entry(session: &mut FormSession, actions: &mut dyn Actions) -> Submit {
    let text = session.values.content.trim().to_string();
    if text.is_empty() {
        return Submit::LoopEnded;
    }
    let Some(session_id) = session.context.session_id else {
        return Submit::Failed("No session selected".into());
    };
    let command = match session.form {
        FormType::SessionDescription => Command::AppendSessionNote {
            session_id,
            text,
        },
        _ => Command::AddTakeaway {
            session_id,
            content: text,
        },
    };
    let result = actions.execute(command);
    if result.is_failure() {
        return Submit::Failed(result.message);
    }
    session.values.content.clear();
    session.cursor = 0;
    session.entries += 1;
    Submit::EntryAdded(result.message)
}
