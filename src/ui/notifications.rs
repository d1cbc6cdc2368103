//! Toast rendering for transient notifications

use super::components::wrap_text;
use crate::state::{NotificationKind, NotificationPhase, NotificationQueue};
use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const TOAST_WIDTH: u16 = 44;

fn kind_color(kind: NotificationKind) -> Color {
    match kind {
        NotificationKind::Success => Color::Green,
        NotificationKind::Error => Color::Red,
        NotificationKind::Warning => Color::Yellow,
        NotificationKind::Info => Color::Blue,
    }
}

/// Horizontal offset (in cells, pushed right off-screen) for a phase
pub fn slide_offset(phase: NotificationPhase, width: u16) -> u16 {
    let hidden = match phase {
        NotificationPhase::Entering(p) => 1.0 - simple_easing::cubic_out(p),
        NotificationPhase::Visible => 0.0,
        NotificationPhase::Leaving(p) => simple_easing::cubic_in(p),
        NotificationPhase::Expired => 1.0,
    };
    (hidden * width as f32).round() as u16
}

/// Draw live notifications stacked in the top-right corner of `area`, newest on top
pub fn draw(frame: &mut Frame, area: Rect, queue: &NotificationQueue, now: DateTime<Utc>) {
    let width = TOAST_WIDTH.min(area.width);
    let text_width = width.saturating_sub(4).max(1) as usize;
    let bottom = area.y + area.height;
    let mut y = area.y;

    for (notification, phase) in queue.visible(now).into_iter().rev() {
        // Room for a border and at least one line
        let room = bottom.saturating_sub(y);
        if room < 3 {
            break;
        }

        let mut lines = wrap_text(
            &format!("{} {}", notification.kind.icon(), notification.message),
            text_width,
        );
        let max_lines = (room - 2) as usize;
        if lines.len() > max_lines {
            lines.truncate(max_lines);
            if let Some(last) = lines.last_mut() {
                mark_clipped(last, text_width);
            }
        }

        let height = lines.len() as u16 + 2;

        let offset = slide_offset(phase, width);
        let visible_width = width - offset.min(width);
        if visible_width > 0 {
            let toast_area = Rect {
                x: area.x + area.width - width + offset.min(width),
                y,
                width: visible_width,
                height,
            };
            let color = kind_color(notification.kind);
            let text: Vec<Line> = lines
                .into_iter()
                .map(|l| Line::from(Span::styled(l, Style::default().fg(Color::White))))
                .collect();
            let toast = Paragraph::new(text).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .style(Style::default().bg(Color::Black)),
            );

            frame.render_widget(Clear, toast_area);
            frame.render_widget(toast, toast_area);
        }

        y += height;
    }
}

/// End a cut-off line with an ellipsis, keeping it within `width`
fn mark_clipped(line: &mut String, width: usize) {
    if line.chars().count() >= width {
        line.pop();
    }
    line.push('…');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use chrono::TimeZone;
    use ratatui::{backend::TestBackend, Terminal};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    /// Render settled toasts for `messages` and return the screen text
    fn render_toasts(width: u16, height: u16, messages: &[String]) -> String {
        let mut queue = NotificationQueue::default();
        for message in messages {
            queue.enqueue(
                message.clone(),
                NotificationKind::Error,
                now() - chrono::Duration::seconds(1),
            );
        }

        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw(frame, area, &queue, now());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_slide_offset_follows_phase() {
        assert_eq!(slide_offset(NotificationPhase::Entering(0.0), 40), 40);
        assert_eq!(slide_offset(NotificationPhase::Entering(1.0), 40), 0);
        assert_eq!(slide_offset(NotificationPhase::Visible, 40), 0);
        assert_eq!(slide_offset(NotificationPhase::Leaving(0.0), 40), 0);
        assert_eq!(slide_offset(NotificationPhase::Leaving(1.0), 40), 40);
    }

    #[test]
    fn test_entering_moves_in_quickly() {
        // cubic ease-out covers most of the distance in the first half
        assert!(slide_offset(NotificationPhase::Entering(0.5), 40) < 10);
    }

    #[test]
    fn test_longest_error_body_is_shown_in_full() {
        let body = format!("<html>{}TAILMARK", "word ".repeat(37));
        let message = format!("Error: {}", ApiError::parse(&body));
        assert!(message.chars().count() > 200);

        let screen = render_toasts(120, 40, &[message]);
        assert!(screen.contains("<html>word"));
        assert!(screen.contains("TAILMARK"));
    }

    #[test]
    fn test_unbroken_body_is_wrapped_not_cut() {
        let body = format!("{}TAILMARK", "x".repeat(192));
        let message = format!("Error: {}", ApiError::parse(&body));

        let screen = render_toasts(120, 40, &[message]);
        assert!(screen.contains("TAILMARK"));
    }

    #[test]
    fn test_toast_clipped_to_area_is_marked() {
        let message = format!("Error: {}", "word ".repeat(40));
        let screen = render_toasts(120, 5, &[message]);
        assert!(screen.contains("Error: word"));
        assert!(screen.contains('…'));
    }
}
