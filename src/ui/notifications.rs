//! Toast notifications in the top right corner

use crate::state::{Notification, NotificationKind};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const TOAST_WIDTH: u16 = 44;
const MAX_TOAST_LINES: u16 = 3;

fn kind_color(kind: NotificationKind) -> Color {
    match kind {
        NotificationKind::Info => Color::Blue,
        NotificationKind::Success => Color::Green,
        NotificationKind::Warning => Color::Yellow,
        NotificationKind::Error => Color::Red,
    }
}

/// Rows a toast needs for `message` inside a box `width` columns wide
fn toast_height(message: &str, width: u16) -> u16 {
    // borders plus the icon prefix
    let text_width = width.saturating_sub(4).max(1) as usize;
    let lines = message.chars().count().div_ceil(text_width).max(1) as u16;
    lines.min(MAX_TOAST_LINES) + 2
}

/// Draw active toasts stacked downwards, newest on top
pub fn draw(frame: &mut Frame, area: Rect, notifications: &[Notification]) {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.x + area.width - width;

    let mut y = area.y;
    for notification in notifications.iter().rev() {
        let height = toast_height(&notification.message, width);
        if y + height > area.y + area.height {
            break;
        }
        let toast = Rect::new(x, y, width, height);
        y += height;
        let color = kind_color(notification.kind);

        let line = Line::from(vec![
            Span::styled(
                format!("{} ", notification.kind.icon()),
                Style::default().fg(color),
            ),
            Span::raw(notification.message.as_str()),
        ]);
        frame.render_widget(Clear, toast);
        frame.render_widget(
            Paragraph::new(line).wrap(Wrap { trim: true }).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            ),
            toast,
        );
    }
}
