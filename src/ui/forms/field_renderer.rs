//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw a form field. `placeholder` is shown dimmed while the field is empty.
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    placeholder: &str,
    is_active: bool,
) {
    let accent = if is_active { Color::Cyan } else { Color::DarkGray };
    let cursor = Span::styled(if is_active { "▌" } else { "" }, Style::default().fg(Color::Cyan));

    let display_value = field.display_value();
    let mut lines: Vec<Line> = if display_value.is_empty() {
        vec![Line::from(Span::styled(
            placeholder.to_string(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))]
    } else {
        display_value
            .split('\n')
            .map(|l| Line::from(l.to_string()))
            .collect()
    };

    if is_active {
        if display_value.is_empty() {
            lines[0].spans.insert(0, cursor);
        } else if let Some(last) = lines.last_mut() {
            last.spans.push(cursor);
        }
    }

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));

    // Keep the cursor line in view for long multiline input
    let inner_height = area.height.saturating_sub(2);
    let scroll = if field.is_multiline {
        (lines.len() as u16).saturating_sub(inner_height)
    } else {
        0
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}
