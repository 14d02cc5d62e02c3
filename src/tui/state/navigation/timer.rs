use crate::io::config_io;
use crate::model::SessionTarget;
use crate::ops::Command;
use crate::ops::queries::format_duration;
use crate::tui::state::input::FormType;
use crate::tui::state::now::{TimerEvent, TimerState};
use crate::tui::state::structure::StructureLevel;

use super::confirm::ConfirmAction;
use super::{NavigationController, View};

impl NavigationController {
    /// Called from the event loop roughly ten times a second. Returns
    /// whether anything visible changed.
    pub fn tick(&mut self) -> bool {
        let changed = self.now.update(self.clock.now());
        let Some(event) = self.now.take_event() else {
            return changed;
        };
        tracing::debug!(?event, "timer event");
        match event {
            TimerEvent::FiveMinutesLeft => self.messages.info("5 minutes left"),
            TimerEvent::WorkComplete => self
                .messages
                .success("Time is up: f logs the session, r resets"),
            TimerEvent::BreakComplete => self.messages.info("Break over, ready for the next run"),
        }
        true
    }

    /// Space in Now
    pub fn toggle_timer(&mut self) {
        match self.now.start_or_pause(self.clock.now()) {
            Ok(TimerState::Running) => {
                let label = self.now.target_label();
                if label.is_empty() {
                    self.messages.info("Running");
                } else {
                    self.messages.info(format!("Running: {}", label));
                }
            }
            Ok(_) => self.messages.info("Paused"),
            Err(e) => self.messages.failure(e.to_string()),
        }
    }

    /// `+`/`-` in Now
    pub fn adjust_timer(&mut self, delta_minutes: i32) {
        match self.now.adjust(delta_minutes) {
            Ok(minutes) => self.messages.info(format!("Work length {} min", minutes)),
            Err(e) => self.messages.failure(e.to_string()),
        }
    }

    /// `work N`: same guard as adjusting, then persisted to config.toml
    pub fn set_work_minutes(&mut self, minutes: u32) {
        if let Err(e) = self.now.set_work_minutes(minutes) {
            self.messages.failure(e.to_string());
            return;
        }
        if let Some(dir) = &self.config_dir
            && let Err(e) = config_io::set_work_minutes(dir, minutes)
        {
            tracing::warn!(error = %e, "could not save work length");
            self.messages
                .failure(format!("Work length {} min, but not saved: {}", minutes, e));
            return;
        }
        self.messages.success(format!("Work length {} min", minutes));
    }

    pub fn ask_reset_timer(&mut self) {
        self.ask_confirm(
            ConfirmAction::ResetTimer,
            "Reset the timer? Press r again to confirm",
        );
    }

    pub fn apply_reset_timer(&mut self) {
        self.now.reset();
        self.messages.info("Timer reset");
    }

    /// `f` in Structure: make the focused todo (or project) the timer target
    pub fn focus_in_now(&mut self) {
        if self.blocked_by_transfer() {
            return;
        }
        if self.now.state() != TimerState::Idle || self.now.is_time_up() {
            self.messages
                .failure("A session is in progress: finish (f) or reset (r) it first");
            return;
        }
        let s = &self.structure;
        let target = match (s.level, s.current_todo(), s.current_project()) {
            (StructureLevel::Todos, Some(todo), Some(project)) => Some((
                SessionTarget::Todo(todo.id),
                format!("{} / {}", project.name, todo.name),
            )),
            (StructureLevel::TracksWithProjectsP | StructureLevel::Todos, _, Some(project)) => {
                Some((SessionTarget::Project(project.id), project.name.clone()))
            }
            _ => None,
        };
        let Some((target, label)) = target else {
            self.messages.failure("Pick a todo or project to focus on");
            return;
        };
        self.now.set_target(target, label);
        self.go_primary(View::Now);
        self.messages
            .info(format!("Focus: {}", self.now.target_label()));
    }

    /// `f` in Now: log the session, then walk the wrap-up forms
    pub fn finish_session(&mut self) {
        let record = match self.now.prepare_finish(self.clock.now()) {
            Ok(record) => record,
            Err(e) => {
                self.messages.failure(e.to_string());
                return;
            }
        };
        let target = record.target;
        let result = self.actions.execute(Command::SaveSession(record));
        if result.is_failure() {
            self.messages.from_result(&result);
            return;
        }
        let Some(session_id) = result.data else {
            self.messages.failure("Session saved without an id");
            return;
        };
        self.now.begin_finish(session_id);
        self.timeline.reload(self.actions.as_ref());
        let todo = match target {
            SessionTarget::Todo(id) => self.actions.todo(id),
            SessionTarget::Project(_) => None,
        };
        match todo {
            Some(todo) => self.input.start_stage_update(&todo),
            None => self
                .input
                .start_entry_loop(FormType::SessionDescription, session_id),
        }
        self.messages.success(result.message);
        self.start_input_keeping_message();
    }

    pub(super) fn finish_summary(&self) -> String {
        let phase = match self.now.phase() {
            crate::tui::state::now::TimerPhase::Break => {
                format!("break {} ready", format_duration(self.now.remaining_seconds()))
            }
            crate::tui::state::now::TimerPhase::Work => "ready for the next run".to_string(),
        };
        format!("Session logged, {}", phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::state::navigation::UiMode;
    use crate::tui::state::navigation::tests::controller;
    use crate::tui::state::now::TimerPhase;
    use pretty_assertions::assert_eq;

    #[test]
    fn tick_drains_one_event_into_the_message() {
        let (mut nav, _, clock) = controller();
        nav.enter_view(View::Now);
        nav.toggle_timer();
        clock.advance(1199);
        assert!(nav.tick());
        assert_eq!(nav.messages().text(), Some("Running"));
        clock.advance(1);
        nav.tick();
        assert_eq!(nav.messages().text(), Some("5 minutes left"));
        clock.advance(300);
        nav.tick();
        assert!(nav.now().is_time_up());
        nav.toggle_timer();
        assert_eq!(nav.now().state(), TimerState::Idle);
    }

    #[test]
    fn focus_then_finish_walks_every_form() {
        let (mut nav, ids, clock) = controller();
        nav.select();
        nav.select();
        nav.select();
        nav.focus_in_now();
        assert_eq!(nav.view(), View::Now);
        assert_eq!(nav.now().target_label(), "Site / Header");

        nav.toggle_timer();
        clock.advance(1500);
        nav.tick();
        nav.finish_session();
        assert_eq!(nav.mode(), UiMode::Input);
        // the save result stays visible over the first form
        assert_eq!(nav.messages().text(), Some("Logged 25m session"));
        assert_eq!(
            nav.input().session().unwrap().form,
            FormType::NowStageUpdate
        );
        nav.confirm_input();
        assert_eq!(nav.actions().todo(ids.header).unwrap().current_stage, 1);
        assert_eq!(
            nav.input().session().unwrap().form,
            FormType::SessionDescription
        );
        for c in "wrote the nav".chars() {
            nav.input.insert_char(c);
        }
        nav.confirm_input();
        nav.confirm_input();
        assert_eq!(nav.input().session().unwrap().form, FormType::Takeaway);
        nav.cancel_input();
        assert_eq!(nav.mode(), UiMode::Normal);
        assert_eq!(nav.now().phase(), TimerPhase::Break);
        assert_eq!(nav.now().remaining_seconds(), 300);

        let session = &nav.actions().sessions()[0];
        assert_eq!(session.duration_secs, 1500);
        assert_eq!(session.notes, vec!["wrote the nav".to_string()]);
    }

    #[test]
    fn project_target_skips_stage_update() {
        let (mut nav, _, clock) = controller();
        nav.select();
        nav.select();
        nav.focus_in_now();
        nav.toggle_timer();
        clock.advance(600);
        nav.finish_session();
        assert_eq!(
            nav.input().session().unwrap().form,
            FormType::SessionDescription
        );
        nav.cancel_input();
        nav.cancel_input();
        assert_eq!(nav.mode(), UiMode::Normal);
        // manual finish goes straight back to a full work run
        assert_eq!(nav.now().phase(), TimerPhase::Work);
        assert_eq!(nav.now().remaining_seconds(), 1500);
    }

    #[test]
    fn finish_without_target_enters_no_form() {
        let (mut nav, _, clock) = controller();
        nav.enter_view(View::Now);
        nav.toggle_timer();
        clock.advance(60);
        nav.finish_session();
        assert_eq!(nav.mode(), UiMode::Normal);
        assert!(nav.actions().sessions().is_empty());
    }

    #[test]
    fn reset_goes_through_the_gate() {
        let (mut nav, _, clock) = controller();
        nav.enter_view(View::Now);
        nav.toggle_timer();
        clock.advance(100);
        nav.tick();
        nav.ask_reset_timer();
        nav.handle_confirm_key("x");
        assert_eq!(nav.now().state(), TimerState::Running);
        nav.ask_reset_timer();
        nav.handle_confirm_key("r");
        assert_eq!(nav.now().state(), TimerState::Idle);
        assert_eq!(nav.now().remaining_seconds(), 1500);
    }
}
