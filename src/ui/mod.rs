//! UI module for rendering the TUI

mod components;
mod confirmation;
mod forms;
mod landing;
mod layout;
mod notifications;
mod wizard;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;
use std::time::Instant;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let now = Instant::now();
    let area = frame.area();

    let (header_area, content_area, status_area) = layout::create_layout(area);

    layout::draw_header(frame, header_area, app);

    // Draw main content based on current view
    match app.state.current_view {
        View::Landing => landing::draw(frame, content_area, app),
        View::Form => forms::draw_enquiry_form(frame, content_area, app),
        View::Confirmation => confirmation::draw(frame, content_area, app),
    }

    // Overlays
    if app.state.current_view == View::Landing && app.state.wizard.session().is_open() {
        wizard::draw(frame, content_area, app);
    }
    if let Some(panel) = &app.state.error_panel {
        components::render_error_panel(frame, content_area, panel);
    }
    notifications::draw(frame, content_area, app.state.notifications.active());

    layout::draw_status_bar(frame, status_area, app, now);
}
