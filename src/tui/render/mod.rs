pub mod archive_view;
pub mod box_view;
pub mod form;
mod helpers;
pub mod info_view;
pub mod now_view;
pub mod status_row;
pub mod structure_view;
pub mod tab_bar;
pub mod timeline_view;

#[cfg(test)]
pub(crate) mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::state::{NavigationController, UiMode, View};
use super::theme::Theme;

/// Main render function: dispatches to sub-renderers. Reads the
/// controller only; nothing here changes state.
pub fn render(frame: &mut Frame, nav: &NavigationController, theme: &Theme, show_hints: bool) {
    let area = frame.area();

    let bg_style = Style::default().bg(theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // tab bar (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    tab_bar::render_tab_bar(frame, nav, theme, chunks[0]);

    match nav.view() {
        View::Now => now_view::render_now_view(frame, nav, theme, chunks[1]),
        View::Structure => structure_view::render_structure_view(frame, nav, theme, chunks[1]),
        View::Box => box_view::render_box_view(frame, nav, theme, chunks[1]),
        View::Info => info_view::render_info_view(frame, nav, theme, chunks[1]),
        View::Archive => archive_view::render_archive_view(frame, nav, theme, chunks[1]),
        View::Timeline => timeline_view::render_timeline_view(frame, nav, theme, chunks[1]),
    }

    if nav.mode() == UiMode::Input {
        form::render_form(frame, nav, theme, chunks[1]);
    }

    status_row::render_status_row(frame, nav, theme, chunks[2], show_hints);
}
