//! Franchise enquiry form view

use super::field_renderer::{draw_field, draw_field_note, draw_help_text, field_height};
use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::{FieldId, Form};
use crate::ui::components::{render_button, submit_label, BUTTON_HEIGHT};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Vertical slot of one row of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    top: u16,
    height: u16,
}

/// Rows of every field (box plus note line) followed by the submit button
fn slots(app: &App) -> Vec<Slot> {
    let mut top = 0;
    let mut slots = Vec::new();
    for field in app.state.form.fields() {
        let height = field_height(field) + 1;
        slots.push(Slot { top, height });
        top += height;
    }
    slots.push(Slot {
        top,
        height: BUTTON_HEIGHT,
    });
    slots
}

/// First row to draw so the active slot is fully visible
fn scroll_offset(slots: &[Slot], active: usize, visible: u16) -> u16 {
    slots
        .get(active)
        .map(|slot| (slot.top + slot.height).saturating_sub(visible))
        .unwrap_or(0)
}

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;

    let title = Line::from(Span::styled(
        "Start Your Franchise Journey",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(
        Paragraph::new(title),
        Rect {
            height: area.height.min(1),
            ..area
        },
    );

    let body = Rect {
        x: area.x + 1,
        y: area.y + 2,
        width: area.width.saturating_sub(2).min(72),
        height: area.height.saturating_sub(3),
    };

    let slots = slots(app);
    let offset = scroll_offset(&slots, form.active_field(), body.height);
    let visible = |slot: &Slot| slot.top >= offset && slot.top + slot.height <= offset + body.height;

    for (index, slot) in slots.iter().enumerate() {
        if !visible(slot) {
            continue;
        }
        let y = body.y + slot.top - offset;
        let is_active = form.active_field() == index;

        match form.get_field(index) {
            Some(field) => {
                let box_height = slot.height - 1;
                let error = form.errors.get(&field.id).map(String::as_str);
                draw_field(
                    frame,
                    Rect::new(body.x, y, body.width, box_height),
                    field,
                    is_active,
                    error.is_some(),
                );
                let counter = (field.id == FieldId::Message).then(|| form.message_counter());
                draw_field_note(
                    frame,
                    Rect::new(body.x, y + box_height, body.width, 1),
                    error,
                    counter,
                );
            }
            None => {
                let label = submit_label(form.submitting, form.retry_pending, form.retry_count);
                render_button(
                    frame,
                    Rect::new(body.x, y, body.width.min(40), slot.height),
                    &label,
                    is_active,
                    !form.is_busy(),
                );
            }
        }
    }

    draw_help_text(
        frame,
        Rect::new(
            area.x + 1,
            area.y + area.height.saturating_sub(1),
            area.width.saturating_sub(2),
            1,
        ),
        &format!("Tab/Shift+Tab: move  Enter on button or {SUBMIT_SHORTCUT}: submit"),
    );
}
