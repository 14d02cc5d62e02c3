use crate::model::{EntityRef, Id};
use crate::ops::Command;

use super::{NavigationController, UiMode, View};

/// A destructive action waiting for its confirming key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteStructureItem(EntityRef),
    ArchiveStructureItem(EntityRef),
    DeleteBoxItem(EntityRef),
    ArchiveBoxItem(EntityRef),
    UnarchiveItem(EntityRef),
    DeleteArchivedItem(EntityRef),
    DeleteSession(Id),
    CommitTransfer,
    ResetTimer,
}

impl ConfirmAction {
    /// The key that must be pressed again to go through with it
    pub fn expected_key(self) -> &'static str {
        match self {
            ConfirmAction::DeleteStructureItem(_)
            | ConfirmAction::DeleteBoxItem(_)
            | ConfirmAction::DeleteArchivedItem(_)
            | ConfirmAction::DeleteSession(_) => "backspace",
            ConfirmAction::ArchiveStructureItem(_) | ConfirmAction::ArchiveBoxItem(_) => "a",
            ConfirmAction::UnarchiveItem(_) => "u",
            ConfirmAction::CommitTransfer => "enter",
            ConfirmAction::ResetTimer => "r",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ConfirmAction::DeleteStructureItem(_) => "delete_structure_item",
            ConfirmAction::ArchiveStructureItem(_) => "archive_structure_item",
            ConfirmAction::DeleteBoxItem(_) => "delete_box_item",
            ConfirmAction::ArchiveBoxItem(_) => "archive_box_item",
            ConfirmAction::UnarchiveItem(_) => "unarchive_item",
            ConfirmAction::DeleteArchivedItem(_) => "delete_archived_item",
            ConfirmAction::DeleteSession(_) => "delete_session",
            ConfirmAction::CommitTransfer => "commit_transfer",
            ConfirmAction::ResetTimer => "reset_timer",
        }
    }
}

/// Collapse control-key aliases onto their canonical names
pub fn normalize_key(key: &str) -> &str {
    match key {
        "c-m" | "c-j" => "enter",
        "c-h" => "backspace",
        "c-i" => "tab",
        "c-[" => "escape",
        other => other,
    }
}

impl NavigationController {
    /// Arm the gate. Only a message is shown; nothing is mutated.
    pub fn ask_confirm(&mut self, action: ConfirmAction, prompt: impl Into<String>) {
        tracing::debug!(action = action.name(), "ask confirm");
        self.messages.info(prompt);
        self.confirm = Some(action);
        self.mode = UiMode::Confirm;
    }

    /// Disarm the gate, returning whatever was armed
    pub fn exit_confirm(&mut self) -> Option<ConfirmAction> {
        self.mode = UiMode::Normal;
        self.confirm.take()
    }

    /// Feed the key that follows [`NavigationController::ask_confirm`].
    /// The gate is consumed whatever the key.
    pub fn handle_confirm_key(&mut self, key: &str) {
        let Some(action) = self.exit_confirm() else {
            return;
        };
        if normalize_key(key) == action.expected_key() {
            self.apply_confirmed(action);
            return;
        }
        tracing::debug!(action = action.name(), key, "confirm cancelled");
        self.messages.info("Cancelled");
        if action == ConfirmAction::CommitTransfer {
            // back out of the no-cursor descent; the transfer stays pending
            self.structure.leave_no_cursor(self.actions.as_ref());
            self.show_transfer_instruction();
        }
    }

    fn apply_confirmed(&mut self, action: ConfirmAction) {
        match action {
            ConfirmAction::DeleteStructureItem(target) => self.apply_delete_structure_item(target),
            ConfirmAction::ArchiveStructureItem(target) => {
                self.apply_archive_structure_item(target)
            }
            ConfirmAction::DeleteBoxItem(target) => self.apply_delete_box_item(target),
            ConfirmAction::ArchiveBoxItem(target) => self.apply_archive_box_item(target),
            ConfirmAction::UnarchiveItem(target) => self.apply_unarchive(target),
            ConfirmAction::DeleteArchivedItem(target) => self.apply_delete_archived(target),
            ConfirmAction::DeleteSession(id) => self.apply_delete_session(id),
            ConfirmAction::CommitTransfer => self.apply_transfer(),
            ConfirmAction::ResetTimer => self.apply_reset_timer(),
        }
    }

    // --- ask: message only ---

    /// Backspace: delete whatever is focused, after confirmation
    pub fn ask_delete(&mut self) {
        if self.blocked_by_transfer() {
            return;
        }
        let armed = match self.view {
            View::Structure => self
                .structure
                .focused_item()
                .map(ConfirmAction::DeleteStructureItem),
            View::Box => self.boxes.focused_item().map(ConfirmAction::DeleteBoxItem),
            View::Archive => self
                .archive
                .focused()
                .map(|e| ConfirmAction::DeleteArchivedItem(e.entity)),
            View::Timeline => self
                .timeline
                .focused_session_id()
                .map(ConfirmAction::DeleteSession),
            View::Now | View::Info => return,
        };
        let Some(action) = armed else {
            self.messages.failure("Nothing selected");
            return;
        };
        let name = self.focused_label();
        self.ask_confirm(
            action,
            format!("Delete {}? Press backspace again to confirm", name),
        );
    }

    /// `a`: archive the focused item, after confirmation
    pub fn ask_archive(&mut self) {
        if self.blocked_by_transfer() {
            return;
        }
        let armed = match self.view {
            View::Structure => self
                .structure
                .focused_item()
                .map(ConfirmAction::ArchiveStructureItem),
            View::Box => self.boxes.focused_item().map(ConfirmAction::ArchiveBoxItem),
            _ => return,
        };
        let Some(action) = armed else {
            self.messages.failure("Nothing selected");
            return;
        };
        let name = self.focused_label();
        self.ask_confirm(action, format!("Archive {}? Press a again to confirm", name));
    }

    /// `u` in Archive
    pub fn ask_unarchive(&mut self) {
        if self.view != View::Archive {
            return;
        }
        let Some(entry) = self.archive.focused() else {
            self.messages.failure("Nothing selected");
            return;
        };
        let prompt = format!("Restore \"{}\"? Press u again to confirm", entry.name);
        self.ask_confirm(ConfirmAction::UnarchiveItem(entry.entity), prompt);
    }

    fn focused_label(&self) -> String {
        let name = match self.view {
            View::Structure => self.structure.focused_name().map(str::to_string),
            View::Box => self.boxes.focused_name().map(str::to_string),
            View::Archive => self.archive.focused().map(|e| e.name.clone()),
            View::Timeline => self.timeline.focused().map(|s| s.target_name.clone()),
            View::Now | View::Info => None,
        };
        match name {
            Some(name) => format!("\"{}\"", name),
            None => "this item".to_string(),
        }
    }

    // --- apply: the mutation itself ---

    pub fn apply_delete_structure_item(&mut self, target: EntityRef) {
        self.structure
            .delete_item(self.actions.as_mut(), &mut self.messages, target);
        self.reload_all();
    }

    pub fn apply_archive_structure_item(&mut self, target: EntityRef) {
        self.structure
            .archive_item(self.actions.as_mut(), &mut self.messages, target);
        self.reload_all();
    }

    pub fn apply_delete_box_item(&mut self, target: EntityRef) {
        self.boxes
            .execute(self.actions.as_mut(), &mut self.messages, Command::Delete(target));
        self.reload_all();
    }

    pub fn apply_archive_box_item(&mut self, target: EntityRef) {
        self.boxes
            .execute(self.actions.as_mut(), &mut self.messages, Command::Archive(target));
        self.reload_all();
    }

    pub fn apply_unarchive(&mut self, target: EntityRef) {
        self.archive
            .execute(self.actions.as_mut(), &mut self.messages, Command::Unarchive(target));
        self.reload_all();
    }

    pub fn apply_delete_archived(&mut self, target: EntityRef) {
        self.archive
            .execute(self.actions.as_mut(), &mut self.messages, Command::Delete(target));
        self.reload_all();
    }

    pub fn apply_delete_session(&mut self, id: Id) {
        let target = EntityRef::new(crate::model::EntityKind::Session, id);
        self.timeline
            .execute(self.actions.as_mut(), &mut self.messages, Command::Delete(target));
        self.reload_all();
    }
}
