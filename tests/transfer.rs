//! Moving items between containers by picking a destination in Structure.

mod common;

use common::harness;
use pretty_assertions::assert_eq;
use stint::tui::state::{UiMode, View};

#[test]
fn box_todo_moves_into_a_project() {
    let mut h = harness();
    h.press(&["b", "m"]);
    assert_eq!(h.nav.view(), View::Structure);
    assert!(h.nav.transfer().is_some());

    h.press(&["enter", "enter"]);
    assert_eq!(h.nav.mode(), UiMode::Confirm);
    h.press(&["enter"]);

    assert!(h.nav.transfer().is_none());
    assert_eq!(h.nav.view(), View::Box);
    assert_eq!(h.nav.boxes().todos.len(), 1);
    let names: Vec<String> = h
        .nav
        .actions()
        .todos(h.ids.site)
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert!(names.contains(&"Call bank".to_string()));
    assert_eq!(h.writes(), 1);
}

#[test]
fn committing_before_a_project_is_picked_is_refused() {
    let mut h = harness();
    h.press(&["b", "m", "y"]);
    assert_eq!(h.message(), Some("Pick a project first"));
    assert!(h.nav.transfer().is_some());
    assert_eq!(h.nav.mode(), UiMode::Normal);
    assert_eq!(h.writes(), 0);

    h.press(&["escape"]);
    assert!(h.nav.transfer().is_none());
    assert_eq!(h.nav.view(), View::Box);
    assert_eq!(h.message(), Some("Move cancelled"));
    assert_eq!(h.nav.boxes().todos.len(), 2);
}

#[test]
fn gate_mismatch_keeps_the_move_pending() {
    let mut h = harness();
    h.press(&["b", "m", "enter", "enter", "x"]);
    assert_eq!(h.message().map(|m| m.starts_with("Move")), Some(true));
    assert!(h.nav.transfer().is_some());
    assert_eq!(h.writes(), 0);

    // pick Docs instead
    h.press(&["j", "enter", "enter"]);
    assert!(h.nav.transfer().is_none());
    assert_eq!(h.nav.actions().todos(h.ids.docs).len(), 1);
}

#[test]
fn idea_is_promoted_under_a_track() {
    let mut h = harness();
    h.press(&["b", "l", "m", "j", "y", "enter"]);
    assert!(h.nav.transfer().is_none());
    assert!(h.nav.boxes().ideas.is_empty());
    let projects: Vec<String> = h
        .nav
        .actions()
        .projects(h.ids.home)
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert!(projects.contains(&"Podcast".to_string()));
}

#[test]
fn other_keys_are_inert_while_moving() {
    let mut h = harness();
    h.press(&["b", "m", "A", "n", "d"]);
    assert_eq!(h.nav.view(), View::Structure);
    assert_eq!(h.nav.mode(), UiMode::Normal);
    assert!(h.nav.transfer().is_some());
    assert_eq!(h.writes(), 0);
}

#[test]
fn view_switches_are_refused_while_moving() {
    let mut h = harness();
    h.press(&["b", "m"]);
    h.nav.enter_view(View::Archive);
    assert_eq!(h.nav.view(), View::Structure);
    assert_eq!(
        h.message(),
        Some("Finish the move first (enter to pick, esc to cancel)")
    );
}
