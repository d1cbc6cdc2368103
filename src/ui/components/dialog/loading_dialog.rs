//! Blocking "generating" overlay

use super::base::{render_dialog, DialogConfig};
use chrono::{DateTime, Utc};
use ratatui::{
    style::{Color, Style},
    text::Span,
    Frame,
};

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_FRAME_MS: i64 = 80;

/// Spinner glyph for the given instant
pub fn spinner_frame(now: DateTime<Utc>) -> &'static str {
    let tick = now.timestamp_millis().rem_euclid(SPINNER_FRAME_MS * SPINNER_FRAMES.len() as i64)
        / SPINNER_FRAME_MS;
    SPINNER_FRAMES[tick as usize]
}

/// Render the loading overlay shown while a generate request is outstanding
pub fn render_loading_dialog(frame: &mut Frame, now: DateTime<Utc>) {
    let message = format!(
        "{} Generating test cases...\nThis can take a minute on slower models.",
        spinner_frame(now)
    );
    let hint = vec![Span::styled(
        "Ctrl+C to quit",
        Style::default().fg(Color::DarkGray),
    )];

    render_dialog(
        frame,
        DialogConfig {
            title: "Working",
            title_color: Color::Cyan,
            border_color: Color::Cyan,
            message: &message,
            hint: Some(hint),
            max_width: 56,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_spinner_advances_with_time() {
        let t0 = Utc.timestamp_millis_opt(0).unwrap();
        let t1 = Utc.timestamp_millis_opt(SPINNER_FRAME_MS).unwrap();
        assert_eq!(spinner_frame(t0), SPINNER_FRAMES[0]);
        assert_eq!(spinner_frame(t1), SPINNER_FRAMES[1]);
    }
}
