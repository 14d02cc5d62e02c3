//! Physical keys to controller calls.
//!
//! [`key_name`] turns a crossterm event into a canonical name; [`dispatch`]
//! picks the one controller method bound to (view, mode, name).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::FlipKey;
use crate::tui::state::{NavigationController, UiMode, View};

/// Shifted symbol for a US layout key, for terminals that report shift
/// separately
fn shift_symbol(c: char) -> Option<char> {
    match c {
        '1' => Some('!'),
        '2' => Some('@'),
        '3' => Some('#'),
        '-' => Some('_'),
        '=' => Some('+'),
        ';' => Some(':'),
        '/' => Some('?'),
        _ => None,
    }
}

/// Canonical key name: `a`, `A`, `enter`, `s-tab`, `c-w`, `space`, ...
/// Empty for keys nothing is bound to.
pub fn key_name(key: KeyEvent) -> String {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Char(' ') => "space".into(),
        KeyCode::Char(c) if ctrl => format!("c-{}", c.to_ascii_lowercase()),
        KeyCode::Char(c) if shift && c.is_ascii_lowercase() => c.to_ascii_uppercase().to_string(),
        KeyCode::Char(c) if shift => shift_symbol(c).unwrap_or(c).to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "enter".into(),
        KeyCode::Backspace => "backspace".into(),
        KeyCode::Delete => "delete".into(),
        KeyCode::Esc => "escape".into(),
        KeyCode::Tab if shift => "s-tab".into(),
        KeyCode::Tab => "tab".into(),
        KeyCode::BackTab => "s-tab".into(),
        KeyCode::Up => "up".into(),
        KeyCode::Down => "down".into(),
        KeyCode::Left => "left".into(),
        KeyCode::Right => "right".into(),
        KeyCode::Home => "home".into(),
        KeyCode::End => "end".into(),
        _ => String::new(),
    }
}

/// The character a key name types into a text buffer, if any
fn typed_char(name: &str) -> Option<char> {
    if name == "space" {
        return Some(' ');
    }
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Route one key. Keys with no binding in the current (view, mode) are
/// ignored.
pub fn dispatch(nav: &mut NavigationController, name: &str) {
    if name.is_empty() {
        return;
    }
    match nav.mode() {
        UiMode::Confirm => nav.handle_confirm_key(name),
        UiMode::Command => command_key(nav, name),
        UiMode::Input => input_key(nav, name),
        UiMode::Normal if nav.transfer().is_some() => transfer_key(nav, name),
        UiMode::Normal => normal_key(nav, name),
    }
}

fn command_key(nav: &mut NavigationController, name: &str) {
    match name {
        "enter" | "c-m" | "c-j" => nav.run_command(),
        "escape" | "c-[" => nav.cancel_command(),
        "backspace" | "c-h" => nav.command_backspace(),
        _ => {
            if let Some(c) = typed_char(name) {
                nav.command_insert(c);
            }
        }
    }
}

fn input_key(nav: &mut NavigationController, name: &str) {
    match name {
        "escape" | "c-[" => nav.cancel_input(),
        "enter" | "c-m" | "c-j" => nav.confirm_input(),
        "tab" | "c-i" => nav.input_mut().focus_next(),
        "s-tab" => nav.input_mut().focus_prev(),
        _ if nav.input().focused_is_text() => text_key(nav, name),
        "up" | "k" | "+" | "=" | "right" | "l" => {
            nav.input_mut().step(1);
        }
        "down" | "j" | "-" | "left" | "h" => {
            nav.input_mut().step(-1);
        }
        "space" => {
            nav.input_mut().cycle();
        }
        _ => {}
    }
}

fn text_key(nav: &mut NavigationController, name: &str) {
    let input = nav.input_mut();
    match name {
        "backspace" | "c-h" => {
            input.backspace();
        }
        "delete" | "c-d" => {
            input.delete_forward();
        }
        "c-w" => {
            input.delete_word_back();
        }
        "c-u" => {
            input.clear_to_start();
        }
        "left" | "c-b" => {
            input.cursor_left();
        }
        "right" | "c-f" => {
            input.cursor_right();
        }
        "home" | "c-a" => {
            input.cursor_home();
        }
        "end" | "c-e" => {
            input.cursor_end();
        }
        "up" => input.focus_prev(),
        "down" => input.focus_next(),
        _ => {
            if let Some(c) = typed_char(name) {
                input.insert_char(c);
            }
        }
    }
}

/// Structure doubles as a destination picker
fn transfer_key(nav: &mut NavigationController, name: &str) {
    match name {
        "up" | "k" => nav.move_cursor(-1),
        "down" | "j" => nav.move_cursor(1),
        "enter" | "c-m" | "c-j" | "right" | "l" => nav.select(),
        "left" | "h" => nav.back(),
        "y" => nav.confirm_transfer(),
        "escape" | "c-[" => nav.cancel_transfer(),
        _ => {}
    }
}

fn normal_key(nav: &mut NavigationController, name: &str) {
    // global bindings first
    match name {
        "q" => return nav.quit(),
        ":" => return nav.start_command(),
        "tab" | "c-i" => return nav.switch_primary(),
        "b" => return nav.enter_view(View::Box),
        "A" => return nav.enter_view(View::Archive),
        "T" => return nav.enter_view(View::Timeline),
        "i" => return nav.open_info(),
        "escape" | "c-[" => return nav.escape(),
        "up" | "k" => return nav.move_cursor(-1),
        "down" | "j" => return nav.move_cursor(1),
        _ => {}
    }
    match nav.view() {
        View::Structure => match name {
            "enter" | "c-m" | "c-j" | "right" | "l" => nav.select(),
            "left" | "h" => nav.back(),
            "n" => nav.start_add(),
            "e" => nav.start_edit(),
            "m" => nav.start_transfer(),
            "a" => nav.ask_archive(),
            "backspace" | "c-h" => nav.ask_delete(),
            "s" => nav.toggle(FlipKey::Sleep),
            "c" => nav.toggle(FlipKey::Cancel),
            "d" => nav.toggle(FlipKey::Complete),
            "f" => nav.focus_in_now(),
            _ => {}
        },
        View::Box => match name {
            "left" | "right" | "h" | "l" => nav.switch_box_list(),
            "n" => nav.start_add(),
            "e" => nav.start_edit(),
            "m" => nav.start_transfer(),
            "a" => nav.ask_archive(),
            "backspace" | "c-h" => nav.ask_delete(),
            "s" => nav.toggle(FlipKey::Sleep),
            "c" => nav.toggle(FlipKey::Cancel),
            "d" => nav.toggle(FlipKey::Complete),
            _ => {}
        },
        View::Archive => match name {
            "u" => nav.ask_unarchive(),
            "backspace" | "c-h" => nav.ask_delete(),
            "left" | "h" => nav.back(),
            _ => {}
        },
        View::Timeline => match name {
            "n" => nav.start_add(),
            "backspace" | "c-h" => nav.ask_delete(),
            "left" | "h" => nav.back(),
            _ => {}
        },
        View::Info => {
            if matches!(name, "left" | "h" | "enter") {
                nav.back();
            }
        }
        View::Now => match name {
            "space" => nav.toggle_timer(),
            "+" | "=" => nav.adjust_timer(1),
            "-" | "_" => nav.adjust_timer(-1),
            "r" => nav.ask_reset_timer(),
            "f" => nav.finish_session(),
            _ => {}
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn names_are_canonical() {
        assert_eq!(key_name(key(KeyCode::Char('a'), KeyModifiers::NONE)), "a");
        assert_eq!(key_name(key(KeyCode::Char('a'), KeyModifiers::SHIFT)), "A");
        assert_eq!(key_name(key(KeyCode::Char('A'), KeyModifiers::SHIFT)), "A");
        assert_eq!(key_name(key(KeyCode::Char('='), KeyModifiers::SHIFT)), "+");
        assert_eq!(key_name(key(KeyCode::Char('w'), KeyModifiers::CONTROL)), "c-w");
        assert_eq!(key_name(key(KeyCode::Char(' '), KeyModifiers::NONE)), "space");
        assert_eq!(key_name(key(KeyCode::BackTab, KeyModifiers::SHIFT)), "s-tab");
        assert_eq!(key_name(key(KeyCode::Esc, KeyModifiers::NONE)), "escape");
        assert_eq!(key_name(key(KeyCode::F(5), KeyModifiers::NONE)), "");
    }

    #[test]
    fn typed_char_only_for_single_chars() {
        assert_eq!(typed_char("x"), Some('x'));
        assert_eq!(typed_char("space"), Some(' '));
        assert_eq!(typed_char("日"), Some('日'));
        assert_eq!(typed_char("enter"), None);
    }
}
