use crate::model::{Id, SessionView, TakeawayView};
use crate::ops::{ActionResult, Actions, Command};

use super::message::MessageHolder;
use super::structure::clamp_index;

/// Session history, newest first, with the takeaways of the selected session
#[derive(Debug, Default)]
pub struct TimelineState {
    pub sessions: Vec<SessionView>,
    pub selected: Option<usize>,
    pub takeaways: Vec<TakeawayView>,
}

impl TimelineState {
    pub fn reload(&mut self, actions: &dyn Actions) {
        self.sessions = actions.sessions();
        self.selected = clamp_index(self.selected, self.sessions.len());
        self.takeaways = match self.focused_session_id() {
            Some(id) => actions.takeaways(id),
            None => Vec::new(),
        };
    }

    pub fn move_cursor(&mut self, actions: &dyn Actions, delta: isize) {
        if let Some(i) = self.selected {
            self.selected =
                Some(i.saturating_add_signed(delta).min(self.sessions.len().saturating_sub(1)));
            self.reload(actions);
        }
    }

    pub fn focused(&self) -> Option<&SessionView> {
        self.selected.map(|i| &self.sessions[i])
    }

    pub fn focused_session_id(&self) -> Option<Id> {
        self.focused().map(|s| s.id)
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
    use crate::model::{EntityKind, EntityRef, SessionTarget};
    use crate::ops::SessionRecord;
    use crate::tui::state::test_fixtures::sample_store;
    use chrono::{Duration, Local};

    #[test]
    fn takeaways_follow_selection_and_delete_clamps() {
        let (mut store, ids) = sample_store();
        let start = Local::now();
        let mut session_ids = Vec::new();
        for (offset, target) in [(0, SessionTarget::Todo(ids.header)), (60, SessionTarget::Project(ids.docs))] {
            let begin = start + Duration::minutes(offset);
            let r = store.execute(Command::SaveSession(SessionRecord {
                start: begin,
                end: begin + Duration::minutes(25),
                duration_secs: 1500,
                target,
            }));
            session_ids.push(r.data.unwrap());
        }
        store.execute(Command::AddTakeaway {
            session_id: session_ids[0],
            content: "Shorter steps".into(),
        });

        let mut state = TimelineState::default();
        state.reload(&store);
        // newest first
        assert_eq!(state.focused_session_id(), Some(session_ids[1]));
        assert!(state.takeaways.is_empty());

        state.move_cursor(&store, 1);
        assert_eq!(state.takeaways.len(), 1);

        let mut messages = MessageHolder::default();
        state.execute(
            &mut store,
            &mut messages,
            Command::Delete(EntityRef::new(EntityKind::Session, session_ids[0])),
        );
        assert_eq!(state.sessions.len(), 1);
        assert_eq!(state.selected, Some(0));
        assert!(state.takeaways.is_empty());
    }
}
