//! Confirmation view shown after a successful enquiry

use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn confirmation_lines(confirmation_id: Option<&str>) -> Vec<Line<'static>> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(
            "✓ Application received",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Thank you for your interest in a Rabuste Coffee franchise."),
        Line::from("Our development team will contact you within 2 business days."),
        Line::from(""),
    ];
    if let Some(id) = confirmation_id {
        lines.push(Line::from(Span::styled(
            format!("Confirmation ID: {id}"),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(vec![
        Span::styled("y", key_style),
        Span::raw(" copy ID   "),
        Span::styled("Enter", key_style),
        Span::raw(" new enquiry   "),
        Span::styled("Esc", key_style),
        Span::raw(" home"),
    ]));
    lines
}

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let paragraph = Paragraph::new(confirmation_lines(app.state.confirmation_id.as_deref()))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        );
    frame.render_widget(paragraph, area);
}
