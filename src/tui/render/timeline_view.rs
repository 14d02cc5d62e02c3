use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::model::SessionView;
use crate::ops::queries::format_duration;
use crate::tui::state::NavigationController;
use crate::tui::theme::Theme;
use crate::util::unicode;

use super::helpers::{empty_line, finish_row, pane_title, row_bg, window};

fn session_row<'a>(
    theme: &Theme,
    session: &SessionView,
    is_cursor: bool,
    width: usize,
) -> Line<'a> {
    let bg = row_bg(theme, is_cursor, true);
    let when = session.start.format("%m-%d %H:%M").to_string();
    let length = format!("{:>7}", format_duration(session.duration_secs));
    let room = width.saturating_sub(1 + when.len() + length.len() + 4);
    let mut target_style = Style::default().fg(theme.text_bright).bg(bg);
    if is_cursor {
        target_style = target_style.add_modifier(Modifier::BOLD);
    }
    let body = vec![
        Span::styled(when, Style::default().fg(theme.dim).bg(bg)),
        Span::styled(length, Style::default().fg(theme.cyan).bg(bg)),
        Span::styled("  ", Style::default().bg(bg)),
        Span::styled(
            unicode::truncate_to_width(&session.target_name, room),
            target_style,
        ),
    ];
    finish_row(theme, body, is_cursor, true, width)
}

/// Render session history on the left, the focused session's notes and
/// takeaways on the right
pub fn render_timeline_view(
    frame: &mut Frame,
    nav: &NavigationController,
    theme: &Theme,
    area: Rect,
) {
    let timeline = nav.timeline();
    let height = area.height.saturating_sub(1) as usize;
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let width = cols[0].width as usize;
    let mut left = vec![pane_title(theme, "sessions", true)];
    if timeline.sessions.is_empty() {
        left.push(empty_line(theme, "No sessions yet"));
    } else {
        let rows = timeline
            .sessions
            .iter()
            .enumerate()
            .map(|(i, s)| session_row(theme, s, timeline.selected == Some(i), width))
            .collect();
        left.extend(window(rows, timeline.selected, height));
    }
    frame.render_widget(Paragraph::new(left), cols[0]);

    let bg = theme.background;
    let text = Style::default().fg(theme.text).bg(bg);
    let mut right = Vec::new();
    if let Some(session) = timeline.focused() {
        right.push(pane_title(theme, "notes", false));
        if session.notes.is_empty() {
            right.push(empty_line(theme, "-"));
        }
        for note in &session.notes {
            right.push(Line::from(Span::styled(format!(" {}", note), text)));
        }
        right.push(Line::from(""));
        right.push(pane_title(theme, "takeaways", false));
        if timeline.takeaways.is_empty() {
            right.push(empty_line(theme, "-"));
        }
        for takeaway in &timeline.takeaways {
            right.push(Line::from(vec![
                Span::styled(" \u{2022} ", Style::default().fg(theme.purple).bg(bg)),
                Span::styled(takeaway.content.clone(), text),
            ]));
        }
    }
    frame.render_widget(Paragraph::new(right).wrap(Wrap { trim: false }), cols[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SessionTarget;
    use crate::ops::{Actions, Command, SessionRecord};
    use crate::tui::render::test_helpers::{TERM_W, render_to_string};
    use crate::tui::state::View;
    use crate::tui::state::now::ManualClock;
    use crate::tui::state::test_fixtures::sample_store;
    use crate::model::TimerConfig;
    use chrono::{Duration, Local, TimeZone};

    #[test]
    fn session_with_notes_and_takeaways() {
        let (mut store, ids) = sample_store();
        let start = Local.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let session_id = store
            .execute(Command::SaveSession(SessionRecord {
                start,
                end: start + Duration::minutes(25),
                duration_secs: 1500,
                target: SessionTarget::Todo(ids.header),
            }))
            .data
            .unwrap();
        store.execute(Command::AppendSessionNote {
            session_id,
            text: "Sketched the layout".into(),
        });
        store.execute(Command::AddTakeaway {
            session_id,
            content: "Start with mobile".into(),
        });

        let mut nav = NavigationController::new(
            Box::new(store),
            Box::new(ManualClock::new(start)),
            &TimerConfig::default(),
        );
        nav.enter_view(View::Timeline);

        let theme = Theme::default();
        let out = render_to_string(TERM_W, 10, |frame, area| {
            render_timeline_view(frame, &nav, &theme, area)
        });
        assert!(out.contains("03-02 09:00"));
        assert!(out.contains("25m"));
        assert!(out.contains("Site / Header"));
        assert!(out.contains("Sketched the layout"));
        assert!(out.contains("Start with mobile"));
    }
}
