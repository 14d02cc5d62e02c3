use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::Paragraph;

use crate::tui::state::NavigationController;
use crate::tui::theme::Theme;

use super::helpers::{empty_line, item_row, pane_title, window};

/// Render archived items of every kind, newest kinds grouped by the store
pub fn render_archive_view(
    frame: &mut Frame,
    nav: &NavigationController,
    theme: &Theme,
    area: Rect,
) {
    let archive = nav.archive();
    let width = area.width as usize;
    let height = area.height.saturating_sub(1) as usize;

    let mut lines = vec![pane_title(theme, "archive", true)];
    if archive.entries.is_empty() {
        lines.push(empty_line(theme, "Nothing archived"));
    } else {
        let rows = archive
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let info = match &e.parent_name {
                    Some(parent) => format!("{} in {}", e.entity.kind, parent),
                    None => e.entity.kind.to_string(),
                };
                item_row(theme, e.status, &e.name, info, archive.selected == Some(i), true, width)
            })
            .collect();
        lines.extend(window(rows, archive.selected, height));
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
            render_archive_view(frame, nav, &theme, area)
        })
    }

    #[test]
    fn empty_archive() {
        let (mut nav, _, _) = controller();
        nav.enter_view(View::Archive);
        assert!(screen(&nav).contains("Nothing archived"));
    }

    #[test]
    fn archived_project_names_its_track() {
        let (mut nav, _, _) = controller();
        nav.select();
        nav.select();
        nav.ask_archive();
        nav.handle_confirm_key("a");
        nav.enter_view(View::Archive);
        let out = screen(&nav);
        assert!(out.contains("Site"));
        assert!(out.contains("project in Work"));
    }
}
