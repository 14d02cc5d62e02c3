//! Cross-view move/promote: Structure navigation doubles as a destination
//! picker until the move is committed or cancelled.

use crate::model::Id;
use crate::ops::Command;

use super::confirm::ConfirmAction;
use super::{NavigationController, View};
use crate::tui::state::boxes::BoxList;
use crate::tui::state::structure::{StructureLevel, StructurePosition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferKind {
    MoveBoxTodo,
    PromoteIdea,
    MoveStructureProject,
    MoveStructureTodo,
}

impl TransferKind {
    /// Whether the destination is a project (otherwise a track)
    fn needs_project(self) -> bool {
        matches!(self, TransferKind::MoveBoxTodo | TransferKind::MoveStructureTodo)
    }

    fn verb(self) -> &'static str {
        match self {
            TransferKind::PromoteIdea => "Promote",
            _ => "Move",
        }
    }
}

/// Where to go back to once the transfer ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnContext {
    Box(BoxList),
    Structure(StructurePosition),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransfer {
    pub kind: TransferKind,
    pub source_id: Id,
    pub source_name: String,
    pub origin: ReturnContext,
}

impl PendingTransfer {
    pub fn instruction(&self) -> String {
        let pick = if self.kind.needs_project() {
            "pick a project"
        } else {
            "pick a track"
        };
        format!(
            "{} \"{}\": {}, then enter (esc cancels)",
            self.kind.verb(),
            self.source_name,
            pick
        )
    }
}

impl NavigationController {
    /// `m`: start moving the focused item (promoting, for ideas)
    pub fn start_transfer(&mut self) {
        if self.transfer.is_some() {
            return;
        }
        let pending = match self.view {
            View::Box => match self.boxes.list {
                BoxList::Todos => self.boxes.current_todo().map(|t| PendingTransfer {
                    kind: TransferKind::MoveBoxTodo,
                    source_id: t.id,
                    source_name: t.name.clone(),
                    origin: ReturnContext::Box(BoxList::Todos),
                }),
                BoxList::Ideas => self.boxes.current_idea().map(|i| PendingTransfer {
                    kind: TransferKind::PromoteIdea,
                    source_id: i.id,
                    source_name: i.name.clone(),
                    origin: ReturnContext::Box(BoxList::Ideas),
                }),
            },
            View::Structure => {
                let origin = ReturnContext::Structure(self.structure.position());
                match self.structure.level {
                    StructureLevel::TracksWithProjectsP => {
                        self.structure.current_project().map(|p| PendingTransfer {
                            kind: TransferKind::MoveStructureProject,
                            source_id: p.id,
                            source_name: p.name.clone(),
                            origin,
                        })
                    }
                    StructureLevel::Todos => {
                        self.structure.current_todo().map(|t| PendingTransfer {
                            kind: TransferKind::MoveStructureTodo,
                            source_id: t.id,
                            source_name: t.name.clone(),
                            origin,
                        })
                    }
                    _ => {
                        self.messages.failure("Tracks cannot be moved");
                        return;
                    }
                }
            }
            _ => return,
        };
        let Some(pending) = pending else {
            self.messages.failure("Nothing selected");
            return;
        };
        tracing::debug!(kind = ?pending.kind, source = pending.source_id, "transfer started");
        self.transfer = Some(pending);
        self.view = View::Structure;
        self.structure.enter_pick_mode(self.actions.as_ref());
        self.show_transfer_instruction();
    }

    /// Repeat the guidance after each navigation step
    pub(super) fn show_transfer_instruction(&mut self) {
        if let Some(pending) = &self.transfer {
            self.messages.info(pending.instruction());
        }
    }

    /// Enter while a transfer is pending
    pub(super) fn transfer_descend(&mut self) {
        let Some(kind) = self.transfer.as_ref().map(|t| t.kind) else {
            return;
        };
        match (self.structure.level, kind.needs_project()) {
            (StructureLevel::Tracks, _) | (StructureLevel::TracksWithProjectsT, true) => {
                if self.structure.select_current(&mut self.messages) {
                    self.show_transfer_instruction();
                }
            }
            (StructureLevel::TracksWithProjectsP, true) => {
                if self.structure.descend_no_cursor(self.actions.as_ref()) {
                    self.confirm_transfer();
                } else {
                    self.messages.failure("No project selected");
                }
            }
            _ => self.confirm_transfer(),
        }
    }

    /// Raise the gate for the current destination, or refuse and stay pending
    pub fn confirm_transfer(&mut self) {
        let Some(pending) = &self.transfer else {
            return;
        };
        let destination = if pending.kind.needs_project() {
            self.structure.destination_project_name()
        } else {
            self.structure.destination_track_name()
        };
        let Some(destination) = destination else {
            let refusal = if pending.kind.needs_project() {
                "Pick a project first"
            } else {
                "Pick a track first"
            };
            self.messages.failure(refusal);
            return;
        };
        let prompt = format!(
            "{} \"{}\" to \"{}\"? Press enter to confirm",
            pending.kind.verb(),
            pending.source_name,
            destination
        );
        self.ask_confirm(ConfirmAction::CommitTransfer, prompt);
    }

    /// Commit the pending transfer into the focused destination
    pub fn apply_transfer(&mut self) {
        let Some(pending) = self.transfer.clone() else {
            return;
        };
        let command = if pending.kind.needs_project() {
            self.structure.destination_project_id().map(|project_id| match pending.kind {
                TransferKind::MoveBoxTodo => Command::MoveBoxTodo {
                    box_todo_id: pending.source_id,
                    project_id,
                },
                _ => Command::MoveTodo {
                    todo_id: pending.source_id,
                    project_id,
                },
            })
        } else {
            self.structure.destination_track_id().map(|track_id| match pending.kind {
                TransferKind::PromoteIdea => Command::PromoteIdea {
                    idea_id: pending.source_id,
                    track_id,
                },
                _ => Command::MoveProject {
                    project_id: pending.source_id,
                    track_id,
                },
            })
        };
        let Some(command) = command else {
            self.messages.failure("No destination selected");
            self.structure.leave_no_cursor(self.actions.as_ref());
            return;
        };

        let result = self.actions.execute(command);
        if result.is_failure() {
            // stays pending so another destination can be picked
            self.messages.from_result(&result);
            self.structure.leave_no_cursor(self.actions.as_ref());
            self.reload_all();
            return;
        }
        tracing::debug!(kind = ?pending.kind, "transfer committed");
        self.transfer = None;
        self.restore_origin(pending.origin);
        self.messages.from_result(&result);
    }

    /// Esc while a transfer is pending: nothing is committed
    pub fn cancel_transfer(&mut self) {
        let Some(pending) = self.transfer.take() else {
            return;
        };
        tracing::debug!(kind = ?pending.kind, "transfer cancelled");
        self.structure.leave_no_cursor(self.actions.as_ref());
        self.restore_origin(pending.origin);
        self.messages.info("Move cancelled");
    }

    fn restore_origin(&mut self, origin: ReturnContext) {
        self.reload_all();
        match origin {
            ReturnContext::Box(list) => {
                self.view = View::Box;
                self.boxes.switch_list(list);
            }
            ReturnContext::Structure(position) => {
                self.view = View::Structure;
                self.structure.restore(self.actions.as_ref(), position);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::state::message::MessageLevel;
    use crate::tui::state::navigation::UiMode;
    use crate::tui::state::navigation::tests::controller;
    use pretty_assertions::assert_eq;

    #[test]
    fn move_box_todo_into_project() {
        let (mut nav, ids, _) = controller();
        nav.enter_view(View::Box);
        nav.start_transfer();
        assert_eq!(nav.view(), View::Structure);
        assert_eq!(nav.structure().level, StructureLevel::TracksWithProjectsT);
        assert_eq!(nav.structure().selected_track_idx, Some(0));
        assert_eq!(
            nav.messages().text(),
            Some("Move \"Call bank\": pick a project, then enter (esc cancels)")
        );

        nav.move_cursor(1);
        // instruction survives navigation
        assert_eq!(nav.messages().level(), Some(MessageLevel::Info));
        nav.move_cursor(-1);
        nav.select();
        assert_eq!(nav.structure().level, StructureLevel::TracksWithProjectsP);
        nav.select();
        assert_eq!(nav.mode(), UiMode::Confirm);
        assert!(nav.structure().no_cursor);
        assert_eq!(nav.structure().selected_todo_idx, None);

        nav.handle_confirm_key("enter");
        assert!(nav.transfer().is_none());
        assert_eq!(nav.view(), View::Box);
        assert_eq!(nav.boxes().list, BoxList::Todos);
        assert_eq!(nav.boxes().todos.len(), 1);
        let names: Vec<String> = nav.actions().todos(ids.site).into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Header", "Footer", "Call bank"]);
    }

    #[test]
    fn confirm_at_track_level_is_refused_and_stays_pending() {
        let (mut nav, _, _) = controller();
        nav.enter_view(View::Box);
        nav.start_transfer();
        nav.confirm_transfer();
        assert_eq!(nav.mode(), UiMode::Normal);
        assert_eq!(nav.messages().text(), Some("Pick a project first"));
        assert_eq!(nav.messages().level(), Some(MessageLevel::Failure));
        assert!(nav.transfer().is_some());
        assert_eq!(nav.view(), View::Structure);
    }

    #[test]
    fn cancelled_gate_backs_out_of_no_cursor() {
        let (mut nav, _, _) = controller();
        nav.enter_view(View::Box);
        nav.start_transfer();
        nav.select();
        nav.select();
        nav.handle_confirm_key("escape");
        assert!(nav.transfer().is_some());
        assert!(!nav.structure().no_cursor);
        assert_eq!(nav.structure().level, StructureLevel::TracksWithProjectsP);
    }

    #[test]
    fn escape_cancels_and_restores_structure_position() {
        let (mut nav, ids, _) = controller();
        nav.select();
        nav.select();
        nav.select();
        assert_eq!(nav.structure().level, StructureLevel::Todos);
        nav.move_cursor(1);
        let before = nav.structure().position();

        nav.start_transfer();
        assert_eq!(nav.structure().level, StructureLevel::TracksWithProjectsT);
        nav.escape();
        assert!(nav.transfer().is_none());
        assert_eq!(nav.structure().position(), before);
        assert_eq!(nav.structure().current_todo_id, Some(ids.footer));
        assert_eq!(nav.messages().text(), Some("Move cancelled"));
    }

    #[test]
    fn promote_idea_commits_at_track_level() {
        let (mut nav, ids, _) = controller();
        nav.enter_view(View::Box);
        nav.switch_box_list();
        nav.start_transfer();
        nav.move_cursor(1);
        nav.select();
        assert_eq!(nav.mode(), UiMode::Confirm);
        nav.handle_confirm_key("enter");
        assert_eq!(nav.view(), View::Box);
        assert_eq!(nav.boxes().list, BoxList::Ideas);
        assert!(nav.boxes().ideas.is_empty());
        let names: Vec<String> = nav.actions().projects(ids.home).into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Garden", "Podcast"]);
    }

    #[test]
    fn move_todo_between_projects() {
        let (mut nav, ids, _) = controller();
        nav.select();
        nav.select();
        nav.select();
        nav.start_transfer();
        nav.select();
        nav.move_cursor(1);
        nav.select();
        assert_eq!(nav.mode(), UiMode::Confirm);
        nav.handle_confirm_key("enter");
        assert_eq!(nav.view(), View::Structure);
        assert_eq!(nav.structure().level, StructureLevel::Todos);
        assert_eq!(nav.actions().todos(ids.docs).len(), 1);
        assert_eq!(nav.structure().current_todo_id, Some(ids.footer));
    }

    #[test]
    fn view_changes_are_blocked_while_pending() {
        let (mut nav, _, _) = controller();
        nav.enter_view(View::Box);
        nav.start_transfer();
        nav.enter_view(View::Archive);
        assert_eq!(nav.view(), View::Structure);
        nav.switch_primary();
        assert_eq!(nav.view(), View::Structure);
        assert!(nav.transfer().is_some());
    }
}
