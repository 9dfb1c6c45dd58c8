//! Field rendering utilities for forms

use crate::state::{FieldValue, FormField};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows a field box takes, excluding the error line
pub fn field_height(field: &FormField) -> u16 {
    if field.is_multiline {
        6
    } else {
        3
    }
}

/// Draw a form field using FormField from the domain layer
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    has_error: bool,
) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let border_style = if has_error {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_value = field.display_value();
    let is_placeholder = matches!(field.value, FieldValue::Choice(None));
    let value_style = if is_placeholder {
        Style::default().fg(Color::DarkGray)
    } else {
        style
    };

    let cursor = if is_active && matches!(field.value, FieldValue::Text(_)) {
        "▌"
    } else {
        ""
    };

    let content = if field.is_multiline {
        let mut lines: Vec<Line> = display_value
            .split('\n')
            .map(|l| Line::from(l.to_string()))
            .collect();
        if let Some(last) = lines.last_mut() {
            last.spans
                .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
        }
        Paragraph::new(lines)
    } else {
        let mut spans = vec![Span::styled(display_value, value_style)];
        if matches!(field.value, FieldValue::Choice(_)) && is_active {
            spans.insert(0, Span::styled("◀ ", Style::default().fg(Color::Cyan)));
            spans.push(Span::styled(" ▶", Style::default().fg(Color::Cyan)));
        }
        spans.push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
        Paragraph::new(Line::from(spans))
    };

    let block = Block::default()
        .title(format!(" {} ", field.label()))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

/// Draw the one-line note under a field: its error, or the message counter
pub fn draw_field_note(
    frame: &mut Frame,
    area: Rect,
    error: Option<&str>,
    counter: Option<(usize, usize)>,
) {
    let line = match (error, counter) {
        (Some(error), _) => Line::from(Span::styled(
            format!(" ⚠ {error}"),
            Style::default().fg(Color::Red),
        )),
        (None, Some((used, max))) => Line::from(Span::styled(
            format!(" {used} / {max} characters"),
            Style::default().fg(counter_color(used, max)),
        ))
        .right_aligned(),
        (None, None) => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Counter turns red above 90 % of the limit
pub fn counter_color(used: usize, max: usize) -> Color {
    if used * 10 > max * 9 {
        Color::Red
    } else {
        Color::DarkGray
    }
}

/// Draw help text at the bottom of a form
pub fn draw_help_text(frame: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(help, area);
}
