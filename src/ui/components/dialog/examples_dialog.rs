//! Example story picker

use super::base::centered_rect;
use crate::state::ExamplesModal;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Render the examples modal over the current screen
pub fn render_examples_dialog(frame: &mut Frame, modal: &ExamplesModal) {
    let area = centered_rect(frame.area(), 80, 24);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Example User Stories ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let hint = Paragraph::new(Line::from(vec![
        Span::styled("j/k", Style::default().fg(Color::Cyan)),
        Span::styled(":nav  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::styled(":load  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::styled(":close", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(hint, chunks[1]);

    if modal.examples.is_empty() {
        let empty = Paragraph::new("No examples available.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, chunks[0]);
        return;
    }

    let preview_width = chunks[0].width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = modal
        .examples
        .iter()
        .enumerate()
        .map(|(idx, example)| {
            let is_selected = idx == modal.selected;
            let prefix = if is_selected { "▸ " } else { "  " };
            let title_style = if is_selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let preview: String = example.preview().chars().take(preview_width).collect();

            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(prefix, title_style),
                    Span::styled(format!("{} ", example.id), Style::default().fg(Color::Yellow)),
                    Span::styled(example.title.as_str(), title_style),
                ]),
                Line::from(Span::styled(
                    format!("    {preview}"),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    // Stateful render keeps the selected example scrolled into view
    let mut list_state = ListState::default().with_selected(Some(modal.selected));
    frame.render_stateful_widget(List::new(items), chunks[0], &mut list_state);
}
