use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::state::now::{TimerPhase, TimerState};
use crate::tui::state::{NavigationController, UiMode, View};
use crate::tui::theme::Theme;
use crate::util::unicode;

use super::helpers::spans_width;

/// Key hints for the current view in normal mode
fn view_hint(nav: &NavigationController) -> &'static str {
    if nav.transfer().is_some() {
        return "enter pick  y move here  esc cancel";
    }
    match nav.view() {
        View::Now => "space start/pause  +/- length  f finish  r reset",
        View::Structure => "n add  e edit  m move  d/s/c status  f focus  : cmd",
        View::Box => "h/l list  n add  e edit  m move  a archive",
        View::Archive => "u restore  bksp delete  esc back",
        View::Timeline => "n takeaway  bksp delete  esc back",
        View::Info => "esc back",
    }
}

/// Compact timer summary shown while a run is live
fn timer_summary(nav: &NavigationController) -> Option<String> {
    let now = nav.now();
    if now.is_time_up() {
        return Some("time up".to_string());
    }
    let phase = match now.phase() {
        TimerPhase::Work => "work",
        TimerPhase::Break => "break",
    };
    match now.state() {
        TimerState::Idle => None,
        TimerState::Running => Some(format!("\u{25B6} {} {}", phase, now.display())),
        TimerState::Paused => Some(format!("\u{2016} {} {}", phase, now.display())),
    }
}

/// Left spans plus a right-aligned dim hint when there is room
fn with_right_hint<'a>(mut spans: Vec<Span<'a>>, hint: String, theme: &Theme, width: usize) -> Line<'a> {
    let bg = theme.background;
    let content_width = spans_width(&spans);
    let hint_width = unicode::display_width(&hint);
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(theme.dim).bg(bg)));
    }
    Line::from(spans)
}

/// Render the status row (bottom of screen)
pub fn render_status_row(
    frame: &mut Frame,
    nav: &NavigationController,
    theme: &Theme,
    area: Rect,
    show_hints: bool,
) {
    let bg = theme.background;
    let width = area.width as usize;

    let line = match nav.mode() {
        UiMode::Command => {
            let spans = vec![
                Span::styled(
                    format!(":{}", nav.command_line()),
                    Style::default().fg(theme.text_bright).bg(bg),
                ),
                Span::styled("\u{258C}", Style::default().fg(theme.highlight).bg(bg)),
            ];
            with_right_hint(spans, "enter run  esc cancel".into(), theme, width)
        }
        UiMode::Confirm => {
            let prompt = nav.messages().text().unwrap_or("Confirm?").to_string();
            let spans = vec![Span::styled(
                prompt,
                Style::default()
                    .fg(theme.yellow)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            )];
            let key = nav
                .confirm_action()
                .map(|a| a.expected_key())
                .unwrap_or("enter");
            with_right_hint(spans, format!("{} confirms", key), theme, width)
        }
        UiMode::Input => {
            let mut spans = Vec::new();
            if let Some(message) = nav.messages().get() {
                spans.push(Span::styled(
                    message.text.clone(),
                    Style::default().fg(theme.message_color(message.level)).bg(bg),
                ));
            }
            with_right_hint(spans, "enter save  tab field  esc cancel".into(), theme, width)
        }
        UiMode::Normal => {
            let mut spans = Vec::new();
            if let Some(message) = nav.messages().get() {
                spans.push(Span::styled(
                    message.text.clone(),
                    Style::default().fg(theme.message_color(message.level)).bg(bg),
                ));
            }
            let right = match timer_summary(nav) {
                Some(summary) => summary,
                None if show_hints => view_hint(nav).to_string(),
                None => String::new(),
            };
            with_right_hint(spans, right, theme, width)
        }
    };

    frame.render_widget(Paragraph::new(line), area);
}
