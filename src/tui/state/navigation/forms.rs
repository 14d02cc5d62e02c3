use crate::model::{EntityRef, Id};
use crate::tui::state::input::{FormContext, FormSession, FormType, FormValues, Submit};
use crate::tui::state::structure::StructureLevel;

use super::{NavigationController, UiMode, View};
use crate::tui::state::boxes::BoxList;

fn deadline_text(deadline: Option<chrono::NaiveDate>) -> String {
    deadline
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

impl NavigationController {
    fn start_input(&mut self) {
        self.messages.clear();
        self.start_input_keeping_message();
    }

    /// Enter Input mode without touching the message slot, for forms that
    /// follow a step whose outcome should stay visible
    pub(super) fn start_input_keeping_message(&mut self) {
        tracing::debug!(view = self.view.label(), "input");
        self.mode = UiMode::Input;
    }

    /// `n`: ADD form for the level or list under the cursor
    pub fn start_add(&mut self) {
        if self.blocked_by_transfer() {
            return;
        }
        let context = FormContext {
            track_id: self.structure.current_track_id,
            project_id: self.structure.current_project_id,
            session_id: None,
        };
        let form = match self.view {
            View::Structure => match self.structure.level {
                StructureLevel::Tracks | StructureLevel::TracksWithProjectsT => FormType::Track,
                StructureLevel::TracksWithProjectsP => FormType::Project,
                StructureLevel::Todos => FormType::StructureTodo,
            },
            View::Box => match self.boxes.list {
                BoxList::Todos => FormType::BoxTodo,
                BoxList::Ideas => FormType::BoxIdea,
            },
            View::Timeline => {
                let Some(session_id) = self.timeline.focused_session_id() else {
                    self.messages.failure("No session selected");
                    return;
                };
                self.input.start_entry_loop(FormType::Takeaway, session_id);
                self.start_input();
                return;
            }
            View::Now | View::Archive | View::Info => return,
        };
        self.input.start_add(form, context);
        self.start_input();
    }

    /// `e`: EDIT form prefilled from the focused row
    pub fn start_edit(&mut self) {
        if self.blocked_by_transfer() {
            return;
        }
        let Some((form, id, context, values)) = self.edit_snapshot() else {
            if matches!(self.view, View::Structure | View::Box) {
                self.messages.failure("Nothing selected");
            }
            return;
        };
        self.input.start_edit(form, id, context, values);
        self.start_input();
    }

    fn edit_snapshot(&self) -> Option<(FormType, Id, FormContext, FormValues)> {
        let s = &self.structure;
        let context = FormContext {
            track_id: s.current_track_id,
            project_id: s.current_project_id,
            session_id: None,
        };
        match self.view {
            View::Structure => match s.level {
                StructureLevel::Tracks | StructureLevel::TracksWithProjectsT => {
                    let t = &s.tracks[s.selected_track_idx?];
                    let values = FormValues {
                        name: t.name.clone(),
                        content: t.description.clone(),
                        status: t.status,
                        ..Default::default()
                    };
                    Some((FormType::Track, t.id, context, values))
                }
                StructureLevel::TracksWithProjectsP => {
                    let p = s.current_project()?;
                    let values = FormValues {
                        name: p.name.clone(),
                        content: p.description.clone(),
                        deadline: deadline_text(p.deadline),
                        status: p.status,
                        importance: p.importance,
                        urgency: p.urgency,
                        ..Default::default()
                    };
                    Some((FormType::Project, p.id, context, values))
                }
                StructureLevel::Todos => {
                    let t = s.current_todo()?;
                    let values = FormValues {
                        name: t.name.clone(),
                        content: t.description.clone(),
                        deadline: deadline_text(t.deadline),
                        status: t.status,
                        importance: t.importance,
                        urgency: t.urgency,
                        current_stage: t.current_stage,
                        total_stages: t.total_stages,
                        ..Default::default()
                    };
                    Some((FormType::StructureTodo, t.id, context, values))
                }
            },
            View::Box => match self.boxes.list {
                BoxList::Todos => {
                    let b = self.boxes.current_todo()?;
                    let values = FormValues {
                        name: b.name.clone(),
                        content: b.description.clone(),
                        deadline: deadline_text(b.deadline),
                        status: b.status,
                        importance: b.importance,
                        urgency: b.urgency,
                        ..Default::default()
                    };
                    Some((FormType::BoxTodo, b.id, FormContext::default(), values))
                }
                BoxList::Ideas => {
                    let i = self.boxes.current_idea()?;
                    let values = FormValues {
                        name: i.name.clone(),
                        content: i.description.clone(),
                        status: i.status,
                        importance: i.importance,
                        ..Default::default()
                    };
                    Some((FormType::BoxIdea, i.id, FormContext::default(), values))
                }
            },
            _ => None,
        }
    }

    /// Esc in a form. Sub-forms of the finish flow chain forward instead
    /// of aborting.
    pub fn cancel_input(&mut self) {
        let closed = self.input.cancel();
        self.mode = UiMode::Normal;
        self.messages.clear();
        if let Some(session) = closed {
            self.chain_after(&session);
        }
        self.reload_all();
    }

    /// Enter in a form
    pub fn confirm_input(&mut self) {
        let Some(form) = self.input.session().cloned() else {
            self.mode = UiMode::Normal;
            return;
        };
        let outcome = self.input.submit(self.actions.as_mut());
        match outcome {
            Submit::Created { target, message } => {
                self.mode = UiMode::Normal;
                self.messages.success(message);
                self.reload_all();
                self.select_created(target);
            }
            Submit::Updated(message) => {
                self.mode = UiMode::Normal;
                self.messages.success(message);
                self.reload_all();
            }
            Submit::NoChanges => {
                self.mode = UiMode::Normal;
                self.messages.success("No changes");
            }
            Submit::Cancelled => {
                self.mode = UiMode::Normal;
                self.messages.clear();
            }
            Submit::Invalid(message) => self.messages.failure(message),
            Submit::Failed(message) => {
                self.messages.failure(message);
                self.reload_all();
            }
            Submit::StageUpdated(result) => {
                self.mode = UiMode::Normal;
                self.messages.from_result(&result);
                self.chain_after(&form);
                self.reload_all();
            }
            Submit::EntryAdded(message) => self.messages.success(message),
            Submit::LoopEnded => {
                self.mode = UiMode::Normal;
                self.chain_after(&form);
                self.reload_all();
            }
        }
    }

    fn select_created(&mut self, target: EntityRef) {
        let actions = self.actions.as_ref();
        match self.view {
            View::Structure => self.structure.select_created(actions, target),
            View::Box => self.boxes.select_created(actions, target),
            _ => {}
        }
    }

    /// Finish flow: stage update -> description loop -> takeaway loop -> done
    fn chain_after(&mut self, closed: &FormSession) {
        let Some(session_id) = self.now.finishing_session_id() else {
            return;
        };
        match closed.form {
            FormType::NowStageUpdate => {
                self.input
                    .start_entry_loop(FormType::SessionDescription, session_id);
                self.start_input_keeping_message();
            }
            FormType::SessionDescription if closed.context.session_id == Some(session_id) => {
                self.input.start_entry_loop(FormType::Takeaway, session_id);
                self.start_input_keeping_message();
            }
            FormType::Takeaway if closed.context.session_id == Some(session_id) => {
                self.now.complete_finish();
                tracing::debug!(session_id, "finish flow complete");
                self.messages.success(self.finish_summary());
            }
            _ => {}
        }
    }
}
