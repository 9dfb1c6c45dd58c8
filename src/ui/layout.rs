//! Layout components (header, status bar)

use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::{Role, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Instant;

/// Split the screen into header, content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw the header line with the view title
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let header = Line::from(vec![
        Span::styled(
            " ☕ Rabuste Coffee ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ ", Style::default().fg(Color::DarkGray)),
        Span::raw(app.state.current_view.title()),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
    let mut spans = vec![Span::raw(" ")];

    let mut hints = get_view_hints(app);
    if !app.state.notifications.is_empty() {
        hints.push_str("  ^X:dismiss");
    }
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    // Announcements
    if let Some(msg) = app.state.current_status(now) {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let quit_hint = " ^C^C:quit ";
    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the current view
fn get_view_hints(app: &App) -> String {
    let bindings = app.state.wizard.bindings();
    let key = |role| bindings.label_for(role);

    if let Some(panel) = &app.state.error_panel {
        return if panel.can_retry {
            "r:try again  Esc:dismiss".to_string()
        } else {
            "Esc:dismiss".to_string()
        };
    }

    match app.state.current_view {
        View::Landing if app.state.wizard.session().is_open() => format!(
            "1-4:answer  {}:close  {}:form",
            key(Role::Close),
            key(Role::GoToForm)
        ),
        View::Landing if app.state.wizard.is_enabled() => format!(
            "{}:assistant  {}:apply  q:quit",
            key(Role::Open),
            key(Role::GoToForm)
        ),
        View::Landing => format!("{}:apply  q:quit", key(Role::GoToForm)),
        View::Form => format!(
            "Tab:next  ←/→:choose  Space:check  {}:submit  Esc:back",
            SUBMIT_SHORTCUT
        ),
        View::Confirmation => "y:copy id  Enter:new enquiry  Esc:home".to_string(),
    }
}
