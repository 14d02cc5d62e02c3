use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::state::NavigationController;
use crate::tui::state::now::{TimerPhase, TimerState};
use crate::tui::theme::Theme;

/// Render the timer screen: phase and state, the countdown, the focus target
pub fn render_now_view(frame: &mut Frame, nav: &NavigationController, theme: &Theme, area: Rect) {
    let now = nav.now();
    let bg = theme.background;

    let phase = match now.phase() {
        TimerPhase::Work => format!("work {} min", now.work_minutes()),
        TimerPhase::Break => format!("break {} min", now.break_minutes()),
    };
    let (state, state_color) = if now.is_time_up() {
        ("time up", theme.red)
    } else {
        match now.state() {
            TimerState::Idle => ("idle", theme.dim),
            TimerState::Running => ("running", theme.green),
            TimerState::Paused => ("paused", theme.yellow),
        }
    };
    let clock_color = match now.phase() {
        TimerPhase::Work => theme.highlight,
        TimerPhase::Break => theme.cyan,
    };
    let target = if now.target_label().is_empty() {
        Span::styled("no focus target", Style::default().fg(theme.dim).bg(bg))
    } else {
        Span::styled(
            now.target_label().to_string(),
            Style::default().fg(theme.text_bright).bg(bg),
        )
    };

    let mut lines: Vec<Line> = Vec::new();
    // vertical centering for the five content rows
    let top = (area.height as usize).saturating_sub(5) / 2;
    lines.extend(std::iter::repeat_n(Line::from(""), top));
    lines.push(Line::from(vec![
        Span::styled(phase, Style::default().fg(theme.text).bg(bg)),
        Span::styled("  \u{00B7}  ", Style::default().fg(theme.dim).bg(bg)),
        Span::styled(state, Style::default().fg(state_color).bg(bg)),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        now.display(),
        Style::default()
            .fg(clock_color)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(target));

    let para = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(bg));
    frame.render_widget(para, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::{TERM_W, render_to_string};
    use crate::tui::state::navigation::tests::controller;

    fn screen(nav: &NavigationController) -> String {
        let theme = Theme::default();
        render_to_string(TERM_W, 12, |frame, area| {
            render_now_view(frame, nav, &theme, area)
        })
    }

    #[test]
    fn idle_timer_without_target() {
        let (nav, _, _) = controller();
        let out = screen(&nav);
        assert!(out.contains("work 25 min"));
        assert!(out.contains("idle"));
        assert!(out.contains("25:00"));
        assert!(out.contains("no focus target"));
    }

    #[test]
    fn running_timer_counts_down() {
        let (mut nav, _, clock) = controller();
        nav.toggle_timer();
        clock.advance(61);
        nav.tick();
        let out = screen(&nav);
        assert!(out.contains("running"));
        assert!(out.contains("23:59"));
    }
}
