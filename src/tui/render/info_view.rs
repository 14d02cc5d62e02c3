use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::tui::state::NavigationController;
use crate::util::unicode;
use crate::tui::theme::Theme;

use super::helpers::pane_title;

/// Render the read-only field list of the inspected entity
pub fn render_info_view(frame: &mut Frame, nav: &NavigationController, theme: &Theme, area: Rect) {
    let info = nav.info();
    let bg = theme.background;
    let label_width = info
        .rows
        .iter()
        .map(|r| unicode::display_width(&r.label))
        .max()
        .unwrap_or(0);

    let title = match info.target {
        Some(target) => format!("info: {}", target.kind),
        None => "info".to_string(),
    };
    let mut lines = vec![pane_title(theme, &title, true)];
    for row in info.rows.iter().skip(info.scroll) {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", unicode::fit_to_width(&row.label, label_width)),
                Style::default()
                    .fg(theme.dim)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(row.value.clone(), Style::default().fg(theme.text_bright).bg(bg)),
        ]));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::{TERM_W, render_to_string};
    use crate::tui::state::navigation::tests::controller;

    #[test]
    fn shows_fields_of_focused_item() {
        let (mut nav, _, _) = controller();
        nav.open_info();
        let theme = Theme::default();
        let out = render_to_string(TERM_W, 12, |frame, area| {
            render_info_view(frame, &nav, &theme, area)
        });
        assert!(out.starts_with(" info: track"));
        assert!(out.contains("Work"));
    }
}
