//! Form rendering module
//!
//! This module contains UI components for rendering forms:
//! - `field_renderer`: Field rendering utilities
//! - `enquiry_form`: The franchise enquiry form

mod enquiry_form;
mod field_renderer;

pub use enquiry_form::draw as draw_enquiry_form;
