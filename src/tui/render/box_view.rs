use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::state::NavigationController;
use crate::tui::state::boxes::{BoxList, BoxState};
use crate::tui::theme::Theme;

use super::helpers::{detail, empty_line, hint_marks, item_row, window};

/// "todos 2 │ ideas 1" with the active list highlighted
fn list_switcher<'a>(b: &BoxState, theme: &Theme) -> Line<'a> {
    let bg = theme.background;
    let tab = |list: BoxList, count: usize| {
        let style = if b.list == list {
            Style::default()
                .fg(theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim).bg(bg)
        };
        Span::styled(format!(" {} {} ", list.label(), count), style)
    };
    Line::from(vec![
        tab(BoxList::Todos, b.todos.len()),
        Span::styled("\u{2502}", Style::default().fg(theme.dim).bg(bg)),
        tab(BoxList::Ideas, b.ideas.len()),
    ])
}

/// Render the inbox: untriaged todos or ideas
pub fn render_box_view(frame: &mut Frame, nav: &NavigationController, theme: &Theme, area: Rect) {
    let b = nav.boxes();
    let width = area.width as usize;
    let height = area.height.saturating_sub(1) as usize;

    let (rows, cursor): (Vec<Line>, Option<usize>) = match b.list {
        BoxList::Todos => (
            b.todos
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    let info = detail(&[
                        t.deadline
                            .map(|d| d.format("%Y-%m-%d").to_string())
                            .unwrap_or_default(),
                        hint_marks(t.importance.max(t.urgency)),
                    ]);
                    item_row(theme, t.status, &t.name, info, b.todo_idx == Some(i), true, width)
                })
                .collect(),
            b.todo_idx,
        ),
        BoxList::Ideas => (
            b.ideas
                .iter()
                .enumerate()
                .map(|(i, idea)| {
                    let info = hint_marks(idea.importance);
                    item_row(theme, idea.status, &idea.name, info, b.idea_idx == Some(i), true, width)
                })
                .collect(),
            b.idea_idx,
        ),
    };

    let mut lines = vec![list_switcher(b, theme)];
    if rows.is_empty() {
        lines.push(empty_line(theme, "Empty (n adds)"));
    } else {
        lines.extend(window(rows, cursor, height));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::{TERM_W, render_to_string};
    use crate::tui::state::View;
    use crate::tui::state::navigation::tests::controller;

    fn screen(nav: &NavigationController) -> String {
        let theme = Theme::default();
        render_to_string(TERM_W, 8, |frame, area| {
            render_box_view(frame, nav, &theme, area)
        })
    }

    #[test]
    fn shows_active_list() {
        let (mut nav, _, _) = controller();
        nav.enter_view(View::Box);
        let out = screen(&nav);
        assert!(out.starts_with(" todos 2 \u{2502} ideas 1"));
        assert!(out.contains("Call bank"));
        assert!(!out.contains("Podcast"));

        nav.switch_box_list();
        let out = screen(&nav);
        assert!(out.contains("Podcast"));
        assert!(!out.contains("Call bank"));
    }
}
