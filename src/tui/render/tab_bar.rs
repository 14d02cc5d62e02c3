use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::state::now::TimerState;
use crate::tui::state::{NavigationController, View};
use crate::tui::theme::Theme;

use super::helpers::spans_width;

/// Render the tab bar: one tab per view, separator line below
pub fn render_tab_bar(frame: &mut Frame, nav: &NavigationController, theme: &Theme, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let sep_cols = render_tabs(frame, nav, theme, chunks[0]);
    render_separator(frame, theme, chunks[1], &sep_cols);
}

fn tab_label(nav: &NavigationController, view: View) -> String {
    match view {
        View::Now if nav.now().state() != TimerState::Idle || nav.now().is_time_up() => {
            format!(" now {} ", nav.now().display())
        }
        View::Box => {
            let count = nav.boxes().todos.len() + nav.boxes().ideas.len();
            format!(" box *{} ", count)
        }
        other => format!(" {} ", other.label()),
    }
}

/// Render tabs and return the column positions of each separator character.
fn render_tabs(
    frame: &mut Frame,
    nav: &NavigationController,
    theme: &Theme,
    area: Rect,
) -> Vec<usize> {
    let bg_style = Style::default().bg(theme.background);
    let sep = Span::styled("\u{2502}", Style::default().fg(theme.dim).bg(theme.background));
    let mut spans: Vec<Span> = vec![
        Span::styled(" ", bg_style),
        Span::styled("\u{25B6}", Style::default().fg(theme.purple).bg(theme.background)),
        Span::styled(" ", bg_style),
    ];
    let mut sep_cols = Vec::new();

    let mut views = vec![View::Now, View::Structure, View::Box, View::Timeline, View::Archive];
    if nav.view() == View::Info {
        views.push(View::Info);
    }
    for view in views {
        let is_current = nav.view() == view;
        let mut style = tab_style(theme, is_current);
        // the primary a secondary view returns to stays marked
        if !is_current && view == nav.last_primary_view() {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        spans.push(Span::styled(tab_label(nav, view), style));
        sep_cols.push(spans_width(&spans));
        spans.push(sep.clone());
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
    sep_cols
}

fn render_separator(frame: &mut Frame, theme: &Theme, area: Rect, sep_cols: &[usize]) {
    let width = area.width as usize;
    let line: String = (0..width)
        .map(|col| {
            if sep_cols.contains(&col) {
                '\u{2534}'
            } else {
                '\u{2500}'
            }
        })
        .collect();
    let para = Paragraph::new(Line::from(Span::styled(
        line,
        Style::default().fg(theme.dim).bg(theme.background),
    )));
    frame.render_widget(para, area);
}

fn tab_style(theme: &Theme, is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(theme.text_bright)
            .bg(theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text).bg(theme.background)
    }
}
