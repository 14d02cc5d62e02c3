use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::state::NavigationController;
use crate::tui::state::input::{FormField, FormSession, FormType};
use crate::tui::theme::Theme;
use crate::util::unicode;

fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

fn title(session: &FormSession) -> String {
    let verb = if session.is_edit() { "Edit" } else { "New" };
    match session.form.entity_kind() {
        Some(_) => format!(" {} {} ", verb, session.form.title().to_lowercase()),
        None => format!(" {} ", session.form.title()),
    }
}

/// Value spans of one field. The focused text field shows the cursor; the
/// focused chip field shows step arrows.
fn value_spans<'a>(session: &FormSession, field: FormField, focused: bool, theme: &Theme) -> Vec<Span<'a>> {
    let bg = theme.background;
    let value = session.values.display(field);
    let style = if focused {
        Style::default().fg(theme.text_bright).bg(bg)
    } else {
        Style::default().fg(theme.text).bg(bg)
    };
    if !focused {
        return vec![Span::styled(value, style)];
    }
    let cursor = Span::styled("\u{258C}", Style::default().fg(theme.highlight).bg(bg));
    if field.is_text() {
        let at = session.cursor.min(value.len());
        let (before, after) = value.split_at(at);
        vec![
            Span::styled(before.to_string(), style),
            cursor,
            Span::styled(after.to_string(), style),
        ]
    } else {
        let arrow = Style::default().fg(theme.highlight).bg(bg);
        vec![
            Span::styled("\u{2039} ", arrow),
            Span::styled(value, style.add_modifier(Modifier::BOLD)),
            Span::styled(" \u{203A}", arrow),
        ]
    }
}

/// Render the active form session as a centered popup over the content
pub fn render_form(frame: &mut Frame, nav: &NavigationController, theme: &Theme, area: Rect) {
    let Some(session) = nav.input().session() else {
        return;
    };
    let bg = theme.background;
    let label_width = session
        .fields
        .iter()
        .map(|f| unicode::display_width(f.label()))
        .max()
        .unwrap_or(0);

    let mut lines: Vec<Line> = Vec::new();
    for (i, field) in session.fields.iter().enumerate() {
        let focused = i == session.focus;
        let label_style = if focused {
            Style::default()
                .fg(theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim).bg(bg)
        };
        let mut spans = vec![Span::styled(
            format!(" {} ", unicode::fit_to_width(field.label(), label_width)),
            label_style,
        )];
        spans.extend(value_spans(session, *field, focused, theme));
        lines.push(Line::from(spans));
    }

    let footer = match session.form {
        FormType::NowStageUpdate => Some(format!("up to {} stages", session.stage_limit)),
        FormType::SessionDescription | FormType::Takeaway => Some(format!(
            "{} saved, empty entry finishes",
            session.entries
        )),
        _ => None,
    };
    if let Some(text) = footer {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", text),
            Style::default().fg(theme.dim).bg(bg),
        )));
    }

    let popup_w: u16 = 56.min(area.width.saturating_sub(2));
    let popup_h = ((lines.len() as u16) + 2).min(area.height);
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title(session))
        .border_style(Style::default().fg(theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::{TERM_H, TERM_W, render_to_string};
    use crate::tui::state::navigation::tests::controller;

    fn screen(nav: &NavigationController) -> String {
        let theme = Theme::default();
        render_to_string(TERM_W, TERM_H, |frame, area| {
            render_form(frame, nav, &theme, area)
        })
    }

    #[test]
    fn nothing_without_a_session() {
        let (nav, _, _) = controller();
        assert_eq!(screen(&nav), "");
    }

    #[test]
    fn add_form_shows_fields_and_cursor() {
        let (mut nav, _, _) = controller();
        nav.start_add();
        nav.input_mut().insert_char('O');
        nav.input_mut().insert_char('p');
        let out = screen(&nav);
        assert!(out.contains("New track"));
        assert!(out.contains("Op\u{258C}"));
    }

    #[test]
    fn edit_form_is_prefilled() {
        let (mut nav, _, _) = controller();
        nav.start_edit();
        let out = screen(&nav);
        assert!(out.contains("Edit track"));
        assert!(out.contains("Work\u{258C}"));
    }
}
