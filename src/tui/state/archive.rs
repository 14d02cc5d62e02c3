use crate::model::ArchivedView;
use crate::ops::{ActionResult, Actions, Command};

use super::message::MessageHolder;
use super::structure::clamp_index;

/// Flat list of everything archived
#[derive(Debug, Default)]
pub struct ArchiveState {
    pub entries: Vec<ArchivedView>,
    pub selected: Option<usize>,
}

impl ArchiveState {
    pub fn reload(&mut self, actions: &dyn Actions) {
        self.entries = actions.archived();
        self.selected = clamp_index(self.selected, self.entries.len());
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if let Some(i) = self.selected {
            self.selected =
                Some(i.saturating_add_signed(delta).min(self.entries.len().saturating_sub(1)));
        }
    }

    pub fn focused(&self) -> Option<&ArchivedView> {
        self.selected.map(|i| &self.entries[i])
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityKind, EntityRef};
    use crate::tui::state::test_fixtures::sample_store;

    #[test]
    fn unarchive_removes_entry() {
        let (mut store, ids) = sample_store();
        let mut messages = MessageHolder::default();
        store.execute(Command::Archive(EntityRef::new(EntityKind::Idea, ids.podcast)));
        store.execute(Command::Archive(EntityRef::new(EntityKind::Track, ids.home)));

        let mut state = ArchiveState::default();
        state.reload(&store);
        assert_eq!(state.entries.len(), 2);
        // tracks are listed before ideas
        assert_eq!(state.focused().unwrap().name, "Home");

        state.move_cursor(1);
        let target = state.focused().unwrap().entity;
        state.execute(&mut store, &mut messages, Command::Unarchive(target));
        assert_eq!(state.entries.len(), 1);
        assert_eq!(state.selected, Some(0));
        assert_eq!(messages.text(), Some("Restored \"Podcast\""));
    }
}
