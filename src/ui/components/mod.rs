//! Reusable UI components

mod button;
mod dialog;

pub use button::{render_button, submit_label, BUTTON_HEIGHT};
pub use dialog::{render_dialog, render_error_panel, DialogConfig};
