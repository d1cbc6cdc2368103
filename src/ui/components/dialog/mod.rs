//! Dialog components for TUI

mod base;
mod examples_dialog;
mod loading_dialog;

pub use base::wrap_text;
pub use examples_dialog::render_examples_dialog;
pub use loading_dialog::render_loading_dialog;
