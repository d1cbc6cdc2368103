//! Button component for TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a bordered action button with its keyboard shortcut.
/// Disabled buttons are dimmed and their shortcut is hidden.
pub fn render_action_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    shortcut: &str,
    is_enabled: bool,
) {
    let (border_style, text_style) = if is_enabled {
        (
            Style::default().fg(Color::Green),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::DarkGray),
        )
    };

    let mut spans = vec![Span::styled(label, text_style)];
    if is_enabled && !shortcut.is_empty() {
        spans.push(Span::styled(
            format!("  {shortcut}"),
            Style::default().fg(Color::Gray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}
