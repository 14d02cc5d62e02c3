//! Form sessions driven by keys: add, edit, and the silent paths.

mod common;

use common::harness;
use pretty_assertions::assert_eq;
use stint::tui::state::{UiMode, View};

#[test]
fn empty_todo_add_closes_silently() {
    let mut h = harness();
    h.press(&["enter", "enter", "enter", "n"]);
    assert_eq!(h.nav.mode(), UiMode::Input);

    h.press(&["enter"]);
    assert_eq!(h.nav.mode(), UiMode::Normal);
    assert_eq!(h.message(), None);
    assert_eq!(h.writes(), 0);
}

#[test]
fn unchanged_edit_issues_no_writes() {
    let mut h = harness();
    h.press(&["e", "enter"]);
    assert_eq!(h.nav.mode(), UiMode::Normal);
    assert_eq!(h.message(), Some("No changes"));
    assert_eq!(h.writes(), 0);
}

#[test]
fn added_todo_is_selected() {
    let mut h = harness();
    h.press(&["enter", "enter", "enter", "n"]);
    h.type_text("Hero image");
    h.press(&["enter"]);

    assert_eq!(h.nav.mode(), UiMode::Normal);
    let s = h.nav.structure();
    assert_eq!(s.todos.len(), 3);
    let focused = s.current_todo().unwrap();
    assert_eq!(focused.name, "Hero image");
    assert_eq!(h.writes(), 1);
}

#[test]
fn rename_through_edit_form() {
    let mut h = harness();
    h.press(&["e", "c-u"]);
    h.type_text("Job");
    h.press(&["enter"]);

    let names: Vec<String> = h.nav.actions().tracks().into_iter().map(|t| t.name).collect();
    assert_eq!(names, vec!["Job".to_string(), "Home".to_string()]);
}

#[test]
fn bad_deadline_keeps_the_form_open() {
    let mut h = harness();
    h.press(&["b", "n"]);
    h.type_text("Renew passport");
    h.press(&["tab", "tab"]);
    h.type_text("next week");
    h.press(&["enter"]);

    assert_eq!(h.nav.mode(), UiMode::Input);
    assert_eq!(
        h.message(),
        Some("Deadline must be YYYY-MM-DD, got \"next week\"")
    );
    assert_eq!(h.writes(), 0);

    h.press(&["escape"]);
    assert_eq!(h.nav.mode(), UiMode::Normal);
    assert_eq!(h.nav.view(), View::Box);
    assert_eq!(h.nav.boxes().todos.len(), 2);
}
