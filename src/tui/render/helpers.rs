use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::model::Status;
use crate::tui::theme::Theme;
use crate::util::unicode;

/// Checkbox-style marker for a status
pub(super) fn status_symbol(status: Status) -> String {
    format!("[{}]", status.marker())
}

/// "!!" style marks for a 0-3 hint, empty at 0
pub(super) fn hint_marks(value: u8) -> String {
    "!".repeat(usize::from(value))
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// First row to draw so that `cursor` stays inside a window of `height` rows
pub(super) fn scroll_for(cursor: Option<usize>, height: usize) -> usize {
    match cursor {
        Some(c) if height > 0 && c >= height => c + 1 - height,
        _ => 0,
    }
}

/// Background of a list row
pub(super) fn row_bg(theme: &Theme, is_cursor: bool, focused: bool) -> Color {
    if is_cursor && focused {
        theme.selection_bg
    } else {
        theme.background
    }
}

/// Prefix a row with the cursor bar and pad the highlighted row to `width`
pub(super) fn finish_row<'a>(
    theme: &Theme,
    mut body: Vec<Span<'a>>,
    is_cursor: bool,
    focused: bool,
    width: usize,
) -> Line<'a> {
    let bg = row_bg(theme, is_cursor, focused);
    let marker = if is_cursor { "\u{258C}" } else { " " };
    let mut spans = vec![Span::styled(
        marker,
        Style::default().fg(theme.selection_border).bg(bg),
    )];
    spans.append(&mut body);
    if is_cursor && focused {
        let used = spans_width(&spans);
        if used < width {
            spans.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
        }
    }
    Line::from(spans)
}

/// One item row: status marker, name, trailing dim detail
pub(super) fn item_row<'a>(
    theme: &Theme,
    status: Status,
    name: &str,
    detail: String,
    is_cursor: bool,
    focused: bool,
    width: usize,
) -> Line<'a> {
    let bg = row_bg(theme, is_cursor, focused);
    let mut name_style = Style::default().fg(theme.status_color(status)).bg(bg);
    if is_cursor {
        name_style = name_style.add_modifier(Modifier::BOLD);
    }
    let marker = format!("{} ", status_symbol(status));
    let detail_width = if detail.is_empty() {
        0
    } else {
        unicode::display_width(&detail) + 2
    };
    let room = width.saturating_sub(1 + unicode::display_width(&marker) + detail_width);
    let mut body = vec![
        Span::styled(marker, Style::default().fg(theme.dim).bg(bg)),
        Span::styled(unicode::truncate_to_width(name, room), name_style),
    ];
    if !detail.is_empty() {
        body.push(Span::styled(
            format!("  {}", detail),
            Style::default().fg(theme.dim).bg(bg),
        ));
    }
    finish_row(theme, body, is_cursor, focused, width)
}

/// Join the non-empty parts of a row detail with two spaces
pub(super) fn detail(parts: &[String]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("  ")
}

/// Dim one-line placeholder for empty panes
pub(super) fn empty_line<'a>(theme: &Theme, text: &str) -> Line<'a> {
    Line::from(Span::styled(
        format!(" {}", text),
        Style::default().fg(theme.dim).bg(theme.background),
    ))
}

/// Dim title line above a pane
pub(super) fn pane_title<'a>(theme: &Theme, text: &str, focused: bool) -> Line<'a> {
    let fg = if focused { theme.highlight } else { theme.dim };
    Line::from(Span::styled(
        format!(" {}", text),
        Style::default()
            .fg(fg)
            .bg(theme.background)
            .add_modifier(Modifier::BOLD),
    ))
}

/// Keep the rows visible around `cursor` inside `height` lines
pub(super) fn window<'a>(
    lines: Vec<Line<'a>>,
    cursor: Option<usize>,
    height: usize,
) -> Vec<Line<'a>> {
    let start = scroll_for(cursor, height);
    lines.into_iter().skip(start).take(height).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_keeps_cursor_visible() {
        assert_eq!(scroll_for(None, 10), 0);
        assert_eq!(scroll_for(Some(3), 10), 0);
        assert_eq!(scroll_for(Some(10), 10), 1);
        assert_eq!(scroll_for(Some(25), 10), 16);
        assert_eq!(scroll_for(Some(4), 0), 0);
    }

    #[test]
    fn markers() {
        assert_eq!(status_symbol(Status::Done), "[x]");
        assert_eq!(hint_marks(0), "");
        assert_eq!(hint_marks(3), "!!!");
    }

    #[test]
    fn detail_skips_empty_parts() {
        let parts = vec![String::new(), "2/3".into(), String::new(), "!!".into()];
        assert_eq!(detail(&parts), "2/3  !!");
    }

    #[test]
    fn highlighted_row_fills_width() {
        let theme = Theme::default();
        let line = item_row(&theme, Status::Active, "Header", "1/3".into(), true, true, 30);
        assert_eq!(spans_width(&line.spans), 30);

        let line = item_row(&theme, Status::Active, "Header", "1/3".into(), true, false, 30);
        assert!(spans_width(&line.spans) < 30);
    }
}
