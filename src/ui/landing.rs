//! Landing view with the hero text and the assistant bubble

use crate::app::App;
use crate::state::{Focus, Role};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const BUBBLE_WIDTH: u16 = 34;
const BUBBLE_HEIGHT: u16 = 4;

fn hero_lines(apply_key: &str) -> Vec<Line<'static>> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    vec![
        Line::from(Span::styled(
            "Own a Rabuste Coffee Franchise",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Bold robusta coffee, a proven café format and a team that"),
        Line::from("supports you from site selection to grand opening."),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled(apply_key.to_string(), key_style),
            Span::raw(" to start your franchise enquiry."),
        ]),
    ]
}

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let bindings = app.state.wizard.bindings();

    let hero = Paragraph::new(hero_lines(&bindings.label_for(Role::GoToForm)))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    let hero_area = Rect {
        y: area.y + area.height / 4,
        height: area.height - area.height / 4,
        ..area
    };
    frame.render_widget(hero, hero_area);

    if app.state.wizard.is_enabled()
        && app.state.bubble.is_visible()
        && !app.state.wizard.session().is_open()
    {
        draw_bubble(frame, area, app);
    }
}

/// Bubble area in the bottom right corner, pushed down by the entrance offset
fn bubble_area(area: Rect, offset: u16) -> Option<Rect> {
    let width = BUBBLE_WIDTH.min(area.width);
    let visible_height = BUBBLE_HEIGHT.saturating_sub(offset).min(area.height);
    if visible_height == 0 {
        return None;
    }
    Some(Rect {
        x: area.x + area.width - width,
        y: area.y + area.height - visible_height,
        width,
        height: visible_height,
    })
}

fn draw_bubble(frame: &mut Frame, area: Rect, app: &App) {
    let Some(bubble) = bubble_area(area, app.state.bubble.offset(BUBBLE_HEIGHT)) else {
        return;
    };

    let focused = app.state.focus == Focus::Bubble;
    let border_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let open_key = app.state.wizard.bindings().label_for(Role::Open);
    let body = vec![
        Line::from("Not sure if franchising fits you?"),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled(open_key, Style::default().fg(Color::Cyan)),
            Span::raw(" for a quick check"),
        ]),
    ];

    frame.render_widget(Clear, bubble);
    frame.render_widget(
        Paragraph::new(body).block(
            Block::default()
                .title(" ☕ Franchise helper ")
                .borders(Borders::ALL)
                .border_style(border_style),
        ),
        bubble,
    );
}
