//! Submission error panel

use super::base::{render_dialog, DialogConfig};
use crate::state::ErrorPanel;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Render the terminal submission error panel centered in `area`
pub fn render_error_panel(frame: &mut Frame, area: Rect, panel: &ErrorPanel) {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut body = vec![
        Line::from(panel.message),
        Line::from(""),
        Line::from(Span::styled(
            "What you can do:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    body.extend(
        panel
            .suggestions
            .iter()
            .map(|s| Line::from(format!("• {s}"))),
    );
    body.push(Line::from(""));
    body.push(Line::from(Span::styled(
        format!("Error details: {}", panel.details),
        Style::default().fg(Color::DarkGray),
    )));

    let mut hint = Vec::new();
    if panel.can_retry {
        hint.push(Span::styled("r", key_style));
        hint.push(Span::raw(" Try Again   "));
    }
    hint.push(Span::styled("Esc", key_style));
    hint.push(Span::raw(" Dismiss"));

    render_dialog(
        frame,
        area,
        DialogConfig {
            title: panel.title,
            title_color: Color::Red,
            border_color: Color::Red,
            body,
            hint: Some(hint),
            max_width: 70,
        },
    );
}
