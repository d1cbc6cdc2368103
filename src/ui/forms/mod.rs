//! Form rendering module
//!
//! - `field_renderer`: Field rendering utilities
//! - `generate_form`: The story entry form

mod field_renderer;
mod generate_form;

pub use generate_form::draw_generate_form;
