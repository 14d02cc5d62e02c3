use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::model::{ProjectView, TodoView, TrackView};
use crate::tui::state::NavigationController;
use crate::tui::state::structure::{StructureLevel, StructureState};
use crate::tui::theme::Theme;

use super::helpers::{detail, empty_line, hint_marks, item_row, pane_title, window};

fn track_detail(track: &TrackView) -> String {
    let count = track.meta.child_count;
    detail(&[
        format!("{} project{}", count, if count == 1 { "" } else { "s" }),
        session_badge(track.meta.session_count),
    ])
}

fn project_detail(project: &ProjectView) -> String {
    detail(&[
        project
            .deadline
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        hint_marks(project.importance.max(project.urgency)),
        format!("{} todos", project.meta.child_count),
    ])
}

fn todo_detail(todo: &TodoView) -> String {
    let stages = if todo.total_stages > 1 {
        format!("{}/{}", todo.current_stage, todo.total_stages)
    } else {
        String::new()
    };
    detail(&[
        stages,
        todo.deadline
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        hint_marks(todo.importance.max(todo.urgency)),
        session_badge(todo.meta.session_count),
    ])
}

fn session_badge(count: usize) -> String {
    if count == 0 {
        String::new()
    } else {
        format!("\u{25F7}{}", count)
    }
}

fn track_lines<'a>(s: &StructureState, theme: &Theme, focused: bool, width: usize) -> Vec<Line<'a>> {
    if s.tracks.is_empty() {
        return vec![empty_line(theme, "No tracks yet (n adds one)")];
    }
    s.tracks
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let is_cursor = s.selected_track_idx == Some(i);
            item_row(theme, t.status, &t.name, track_detail(t), is_cursor, focused, width)
        })
        .collect()
}

fn project_lines<'a>(s: &StructureState, theme: &Theme, focused: bool, width: usize) -> Vec<Line<'a>> {
    if s.projects.is_empty() {
        return vec![empty_line(theme, "No projects")];
    }
    s.projects
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let is_cursor = focused && s.selected_project_idx == Some(i);
            item_row(theme, p.status, &p.name, project_detail(p), is_cursor, focused, width)
        })
        .collect()
}

fn todo_lines<'a>(s: &StructureState, theme: &Theme, width: usize) -> Vec<Line<'a>> {
    if s.todos.is_empty() {
        return vec![empty_line(theme, "No todos")];
    }
    s.todos
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let is_cursor = !s.no_cursor && s.selected_todo_idx == Some(i);
            item_row(theme, t.status, &t.name, todo_detail(t), is_cursor, true, width)
        })
        .collect()
}

/// Breadcrumb of the levels above the focus
fn breadcrumb(s: &StructureState) -> String {
    let track = s
        .selected_track_idx
        .and_then(|i| s.tracks.get(i))
        .map(|t| t.name.as_str());
    let project = s
        .selected_project_idx
        .and_then(|i| s.projects.get(i))
        .map(|p| p.name.as_str());
    match (s.level, track, project) {
        (StructureLevel::Todos, Some(t), Some(p)) => format!("{} / {}", t, p),
        _ => "tracks".to_string(),
    }
}

/// Render the Track → Project → Todo browser for the current level
pub fn render_structure_view(
    frame: &mut Frame,
    nav: &NavigationController,
    theme: &Theme,
    area: Rect,
) {
    let s = nav.structure();
    let height = area.height.saturating_sub(1) as usize;

    match s.level {
        StructureLevel::Tracks => {
            let width = area.width as usize;
            let mut lines = vec![pane_title(theme, "tracks", true)];
            lines.extend(window(track_lines(s, theme, true, width), s.selected_track_idx, height));
            frame.render_widget(Paragraph::new(lines), area);
        }
        StructureLevel::TracksWithProjectsT | StructureLevel::TracksWithProjectsP => {
            let projects_focused = s.level == StructureLevel::TracksWithProjectsP;
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                .split(area);

            let mut left = vec![pane_title(theme, "tracks", !projects_focused)];
            left.extend(window(
                track_lines(s, theme, !projects_focused, cols[0].width as usize),
                s.selected_track_idx,
                height,
            ));
            frame.render_widget(Paragraph::new(left), cols[0]);

            let track_name = s
                .selected_track_idx
                .and_then(|i| s.tracks.get(i))
                .map(|t| t.name.as_str())
                .unwrap_or("projects");
            let mut right = vec![pane_title(theme, track_name, projects_focused)];
            right.extend(window(
                project_lines(s, theme, projects_focused, cols[1].width as usize),
                s.selected_project_idx,
                height,
            ));
            frame.render_widget(Paragraph::new(right), cols[1]);
        }
        StructureLevel::Todos => {
            let width = area.width as usize;
            let cursor = if s.no_cursor { None } else { s.selected_todo_idx };
            let mut lines = vec![pane_title(theme, &breadcrumb(s), true)];
            lines.extend(window(todo_lines(s, theme, width), cursor, height));
            frame.render_widget(Paragraph::new(lines), area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::{TERM_W, render_to_string};
    use crate::tui::state::navigation::tests::controller;

    fn screen(nav: &NavigationController) -> String {
        let theme = Theme::default();
        render_to_string(TERM_W, 10, |frame, area| {
            render_structure_view(frame, nav, &theme, area)
        })
    }

    #[test]
    fn track_level_lists_tracks() {
        let (nav, _, _) = controller();
        let out = screen(&nav);
        assert!(out.starts_with(" tracks"));
        assert!(out.contains("Work"));
        assert!(out.contains("2 projects"));
        assert!(out.contains("Home"));
        assert!(out.contains("1 project"));
    }

    #[test]
    fn drilling_in_shows_projects_then_todos() {
        let (mut nav, _, _) = controller();
        nav.select();
        let out = screen(&nav);
        assert!(out.contains("Site"));
        assert!(out.contains("Docs"));

        nav.select();
        nav.select();
        let out = screen(&nav);
        assert!(out.starts_with(" Work / Site"));
        assert!(out.contains("Header"));
        assert!(out.contains("0/3"));
        assert!(out.contains("Footer"));
    }
}
