//! View/mode orchestration.
//!
//! [`NavigationController`] owns every sub-controller, the message slot and
//! the storage handle. Key bindings call exactly one method here; the methods
//! are split by concern across the files of this module.

mod command;
mod confirm;
mod forms;
mod timer;
mod transfer;

use std::path::PathBuf;

use crate::io::state::UiState;
use crate::model::{EntityKind, EntityRef, FlipKey, TimerConfig};
use crate::ops::Actions;

use super::archive::ArchiveState;
use super::boxes::{BoxList, BoxState};
use super::info::InfoState;
use super::input::InputState;
use super::message::MessageHolder;
use super::now::{Clock, NowState};
use super::structure::StructureState;
use super::timeline::TimelineState;

pub use confirm::{ConfirmAction, normalize_key};
pub use transfer::{PendingTransfer, ReturnContext, TransferKind};

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Now,
    Structure,
    Box,
    Info,
    Archive,
    Timeline,
}

impl View {
    pub fn is_primary(self) -> bool {
        matches!(self, View::Now | View::Structure)
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Now => "now",
            View::Structure => "structure",
            View::Box => "box",
            View::Info => "info",
            View::Archive => "archive",
            View::Timeline => "timeline",
        }
    }

    fn parse_primary(s: &str) -> Option<Self> {
        match s {
            "now" => Some(View::Now),
            "structure" => Some(View::Structure),
            _ => None,
        }
    }
}

/// Interaction mode, orthogonal to the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    Command,
    Input,
    Confirm,
}

/// Where each secondary view returns to on exit
#[derive(Debug, Clone, Copy)]
struct ReturnSlots {
    info: View,
    boxes: View,
    archive: View,
    timeline: View,
}

impl ReturnSlots {
    fn slot(&mut self, view: View) -> Option<&mut View> {
        match view {
            View::Info => Some(&mut self.info),
            View::Box => Some(&mut self.boxes),
            View::Archive => Some(&mut self.archive),
            View::Timeline => Some(&mut self.timeline),
            View::Now | View::Structure => None,
        }
    }
}

pub struct NavigationController {
    view: View,
    mode: UiMode,
    last_primary_view: View,
    returns: ReturnSlots,
    structure: StructureState,
    boxes: BoxState,
    archive: ArchiveState,
    timeline: TimelineState,
    info: InfoState,
    input: InputState,
    now: NowState,
    messages: MessageHolder,
    confirm: Option<ConfirmAction>,
    transfer: Option<PendingTransfer>,
    command_line: String,
    actions: Box<dyn Actions>,
    clock: Box<dyn Clock>,
    /// Where `work N` persists the new length; None keeps it in memory
    config_dir: Option<PathBuf>,
    should_quit: bool,
}

impl NavigationController {
    pub fn new(actions: Box<dyn Actions>, clock: Box<dyn Clock>, timer: &TimerConfig) -> Self {
        let mut nav = NavigationController {
            view: View::Structure,
            mode: UiMode::Normal,
            last_primary_view: View::Structure,
            returns: ReturnSlots {
                info: View::Structure,
                boxes: View::Structure,
                archive: View::Structure,
                timeline: View::Structure,
            },
            structure: StructureState::default(),
            boxes: BoxState::default(),
            archive: ArchiveState::default(),
            timeline: TimelineState::default(),
            info: InfoState::default(),
            input: InputState::default(),
            now: NowState::new(timer),
            messages: MessageHolder::default(),
            confirm: None,
            transfer: None,
            command_line: String::new(),
            actions,
            clock,
            config_dir: None,
            should_quit: false,
        };
        nav.reload_all();
        nav
    }

    /// Persist `work N` changes into `<dir>/config.toml`
    pub fn with_config_dir(mut self, dir: PathBuf) -> Self {
        self.config_dir = Some(dir);
        self
    }

    // --- read access for the renderer and tests ---

    pub fn view(&self) -> View {
        self.view
    }

    pub fn mode(&self) -> UiMode {
        self.mode
    }

    pub fn last_primary_view(&self) -> View {
        self.last_primary_view
    }

    pub fn structure(&self) -> &StructureState {
        &self.structure
    }

    pub fn boxes(&self) -> &BoxState {
        &self.boxes
    }

    pub fn archive(&self) -> &ArchiveState {
        &self.archive
    }

    pub fn timeline(&self) -> &TimelineState {
        &self.timeline
    }

    pub fn info(&self) -> &InfoState {
        &self.info
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Field editing inside an open form; never changes the mode
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn now(&self) -> &NowState {
        &self.now
    }

    pub fn messages(&self) -> &MessageHolder {
        &self.messages
    }

    pub fn confirm_action(&self) -> Option<&ConfirmAction> {
        self.confirm.as_ref()
    }

    pub fn transfer(&self) -> Option<&PendingTransfer> {
        self.transfer.as_ref()
    }

    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    pub fn actions(&self) -> &dyn Actions {
        self.actions.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Refresh every cached list from storage
    pub fn reload_all(&mut self) {
        let actions = self.actions.as_ref();
        self.structure.reload(actions);
        self.boxes.reload(actions);
        self.archive.reload(actions);
        self.timeline.reload(actions);
    }

    // --- persisted UI state ---

    pub fn ui_state(&self) -> UiState {
        UiState {
            view: self.last_primary_view.label().to_string(),
            box_list: self.boxes.list.label().to_string(),
        }
    }

    pub fn restore_ui_state(&mut self, state: &UiState) {
        if let Some(view) = View::parse_primary(&state.view) {
            self.go_primary(view);
        }
        if let Some(list) = BoxList::parse(&state.box_list) {
            self.boxes.switch_list(list);
        }
    }

    // --- views ---

    /// Refuse view changes while a transfer is being placed
    fn blocked_by_transfer(&mut self) -> bool {
        if self.transfer.is_some() {
            self.messages
                .failure("Finish the move first (enter to pick, esc to cancel)");
            return true;
        }
        false
    }

    fn go_primary(&mut self, view: View) {
        if self.view == View::Info {
            self.info.clear();
        }
        tracing::debug!(from = self.view.label(), to = view.label(), "view");
        self.view = view;
        self.last_primary_view = view;
        if view == View::Structure {
            self.structure.reload(self.actions.as_ref());
        }
    }

    /// Jump to a view by name, recording return slots for secondary views
    pub fn enter_view(&mut self, target: View) {
        if self.blocked_by_transfer() || target == self.view {
            return;
        }
        if target.is_primary() {
            self.go_primary(target);
            return;
        }
        if target == View::Info {
            self.open_info();
            return;
        }
        if self.view == View::Info {
            self.messages.failure("Leave info first (esc)");
            return;
        }
        let origin = match self.returns.slot(self.view) {
            // inherit so that exiting always lands on a primary view
            Some(slot) => *slot,
            None => self.view,
        };
        if let Some(slot) = self.returns.slot(target) {
            *slot = origin;
        }
        let actions = self.actions.as_ref();
        match target {
            View::Box => self.boxes.reload(actions),
            View::Archive => self.archive.reload(actions),
            View::Timeline => self.timeline.reload(actions),
            _ => {}
        }
        tracing::debug!(from = self.view.label(), to = target.label(), "view");
        self.view = target;
    }

    /// Open the inspector on whatever the current view has focused
    pub fn open_info(&mut self) {
        if self.blocked_by_transfer() {
            return;
        }
        if self.view == View::Info {
            self.messages.failure("Already showing info");
            return;
        }
        let Some(target) = self.focused_entity() else {
            self.messages.failure("Nothing selected");
            return;
        };
        if !self.info.open(self.actions.as_ref(), target) {
            self.messages.failure(format!("{} not found", target));
            self.reload_all();
            return;
        }
        self.returns.info = self.view;
        tracing::debug!(from = self.view.label(), %target, "info");
        self.view = View::Info;
    }

    /// Leave a secondary view for its recorded origin
    pub fn exit_view(&mut self) -> bool {
        if self.view.is_primary() {
            return false;
        }
        let back = self.returns.slot(self.view).map_or(self.last_primary_view, |s| *s);
        if self.view == View::Info {
            self.info.clear();
        }
        tracing::debug!(from = self.view.label(), to = back.label(), "exit view");
        self.view = back;
        if back.is_primary() {
            self.last_primary_view = back;
        }
        self.reload_all();
        true
    }

    /// Toggle Now and Structure, or go back to the last primary view
    pub fn switch_primary(&mut self) {
        if self.blocked_by_transfer() {
            return;
        }
        let target = match self.view {
            View::Now => View::Structure,
            View::Structure => View::Now,
            _ => self.last_primary_view,
        };
        self.go_primary(target);
    }

    fn focused_entity(&self) -> Option<EntityRef> {
        match self.view {
            View::Structure => self.structure.focused_item(),
            View::Box => self.boxes.focused_item(),
            View::Archive => self.archive.focused().map(|e| e.entity),
            View::Timeline => self
                .timeline
                .focused_session_id()
                .map(|id| EntityRef::new(EntityKind::Session, id)),
            View::Now => self.now.target().map(|t| match t {
                crate::model::SessionTarget::Todo(id) => EntityRef::new(EntityKind::Todo, id),
                crate::model::SessionTarget::Project(id) => {
                    EntityRef::new(EntityKind::Project, id)
                }
            }),
            View::Info => self.info.target,
        }
    }

    // --- cursor movement ---

    pub fn move_cursor(&mut self, delta: isize) {
        let actions = self.actions.as_ref();
        match self.view {
            View::Structure => self.structure.move_cursor(actions, delta),
            View::Box => self.boxes.move_cursor(delta),
            View::Archive => self.archive.move_cursor(delta),
            View::Timeline => self.timeline.move_cursor(actions, delta),
            View::Info => self.info.scroll_by(delta),
            View::Now => {}
        }
        self.show_transfer_instruction();
    }

    /// Descend in Structure (intercepted while a transfer is pending)
    pub fn select(&mut self) {
        if self.view != View::Structure {
            return;
        }
        if self.transfer.is_some() {
            self.transfer_descend();
            return;
        }
        self.structure.select_current(&mut self.messages);
    }

    pub fn back(&mut self) {
        match self.view {
            View::Structure => {
                if self.structure.no_cursor {
                    self.structure.leave_no_cursor(self.actions.as_ref());
                } else {
                    self.structure.go_back();
                }
                self.show_transfer_instruction();
            }
            _ => {
                self.exit_view();
            }
        }
    }

    /// Esc in normal mode
    pub fn escape(&mut self) {
        if self.transfer.is_some() {
            self.cancel_transfer();
        } else if self.view.is_primary() {
            self.messages.clear();
        } else {
            self.exit_view();
        }
    }

    pub fn switch_box_list(&mut self) {
        if self.view != View::Box {
            return;
        }
        let next = match self.boxes.list {
            BoxList::Todos => BoxList::Ideas,
            BoxList::Ideas => BoxList::Todos,
        };
        self.boxes.switch_list(next);
    }

    /// Status flip on the focused item of Structure or Box
    pub fn toggle(&mut self, key: FlipKey) {
        if self.blocked_by_transfer() {
            return;
        }
        let actions = self.actions.as_mut();
        match self.view {
            View::Structure => {
                self.structure.toggle_current(actions, &mut self.messages, key);
            }
            View::Box => {
                self.boxes.toggle_current(actions, &mut self.messages, key);
            }
            _ => return,
        }
        self.reload_all();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::SessionTarget;
    use crate::ops::Store;
    use crate::tui::state::now::ManualClock;
    use crate::tui::state::structure::StructureLevel;
    use crate::tui::state::test_fixtures::{Sample, sample_store};
    use chrono::{Local, TimeZone};
    use pretty_assertions::assert_eq;

    pub(crate) fn controller() -> (NavigationController, Sample, ManualClock) {
        let (store, ids) = sample_store();
        let clock = ManualClock::new(Local.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap());
        let nav = NavigationController::new(
            Box::new(store),
            Box::new(clock.clone()),
            &TimerConfig::default(),
        );
        (nav, ids, clock)
    }

    #[test]
    fn secondary_view_returns_to_origin() {
        let (mut nav, _, _) = controller();
        nav.enter_view(View::Now);
        nav.enter_view(View::Box);
        assert_eq!(nav.view(), View::Box);
        assert!(nav.exit_view());
        assert_eq!(nav.view(), View::Now);

        nav.enter_view(View::Structure);
        nav.enter_view(View::Archive);
        nav.exit_view();
        assert_eq!(nav.view(), View::Structure);
    }

    #[test]
    fn secondary_from_secondary_inherits_primary_origin() {
        let (mut nav, _, _) = controller();
        nav.enter_view(View::Now);
        nav.enter_view(View::Box);
        nav.enter_view(View::Timeline);
        nav.exit_view();
        assert_eq!(nav.view(), View::Now);
    }

    #[test]
    fn info_is_modal_and_cleared_on_exit() {
        let (mut nav, ids, _) = controller();
        nav.enter_view(View::Box);
        nav.open_info();
        assert_eq!(nav.view(), View::Info);
        assert_eq!(
            nav.info().target,
            Some(EntityRef::new(EntityKind::BoxTodo, ids.call_bank))
        );

        nav.enter_view(View::Archive);
        assert_eq!(nav.view(), View::Info);
        assert_eq!(nav.messages().text(), Some("Leave info first (esc)"));
        nav.open_info();
        assert_eq!(nav.view(), View::Info);

        nav.exit_view();
        assert_eq!(nav.view(), View::Box);
        assert_eq!(nav.info().target, None);
        assert!(nav.info().rows.is_empty());
    }

    #[test]
    fn switch_primary_toggles_or_restores() {
        let (mut nav, _, _) = controller();
        assert_eq!(nav.view(), View::Structure);
        nav.switch_primary();
        assert_eq!(nav.view(), View::Now);
        nav.enter_view(View::Timeline);
        nav.switch_primary();
        assert_eq!(nav.view(), View::Now);
        nav.switch_primary();
        assert_eq!(nav.last_primary_view(), View::Structure);
    }

    #[test]
    fn ui_state_round_trips_primary_view_and_box_list() {
        let (mut nav, _, _) = controller();
        nav.enter_view(View::Now);
        nav.enter_view(View::Box);
        nav.switch_box_list();
        let state = nav.ui_state();
        assert_eq!(state.view, "now");
        assert_eq!(state.box_list, "ideas");

        let (mut fresh, _, _) = controller();
        fresh.restore_ui_state(&state);
        assert_eq!(fresh.view(), View::Now);
        assert_eq!(fresh.boxes().list, BoxList::Ideas);
    }

    #[test]
    fn toggle_routes_to_focused_view() {
        let (mut nav, ids, _) = controller();
        nav.structure.level = StructureLevel::TracksWithProjectsP;
        nav.toggle(FlipKey::Complete);
        let site = nav.actions().project(ids.site).unwrap();
        assert_eq!(site.status, crate::model::Status::Finished);
        nav.toggle(FlipKey::Complete);
        let site = nav.actions().project(ids.site).unwrap();
        assert_eq!(site.status, crate::model::Status::Active);
    }

    #[test]
    fn info_on_now_target() {
        let (mut nav, ids, _) = controller();
        nav.enter_view(View::Now);
        nav.open_info();
        assert_eq!(nav.messages().text(), Some("Nothing selected"));
        nav.now.set_target(SessionTarget::Project(ids.docs), "Docs");
        nav.open_info();
        assert_eq!(nav.view(), View::Info);
        nav.exit_view();
        assert_eq!(nav.view(), View::Now);
    }

    #[test]
    fn empty_store_tolerates_every_view() {
        let clock = ManualClock::new(Local::now());
        let mut nav = NavigationController::new(
            Box::new(Store::in_memory()),
            Box::new(clock),
            &TimerConfig::default(),
        );
        for view in [View::Box, View::Archive, View::Timeline, View::Structure] {
            nav.enter_view(view);
            nav.move_cursor(1);
            nav.select();
            nav.back();
        }
        assert_eq!(nav.structure().current_track_id, None);
    }
}
