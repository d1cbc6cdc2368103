//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod notifications;
mod results;

use crate::state::AppState;
use chrono::{DateTime, Utc};
use components::{render_examples_dialog, render_loading_dialog};
use ratatui::Frame;

/// Main draw function. `now` drives the spinner and toast animations.
pub fn draw(frame: &mut Frame, state: &AppState, now: DateTime<Utc>) {
    let area = frame.area();
    let regions = layout::create_layout(area, state.results_visible);

    layout::draw_header(frame, regions.header, state);
    forms::draw_generate_form(frame, regions.form, state);
    if let Some(results_area) = regions.results {
        results::draw(frame, results_area, state);
    }
    layout::draw_status_bar(frame, regions.status_bar, state);

    // Overlays, topmost last
    if let Some(modal) = &state.examples_modal {
        render_examples_dialog(frame, modal);
    }
    if state.is_loading() {
        render_loading_dialog(frame, now);
    }
    notifications::draw(frame, regions.content, &state.notifications, now);
}
