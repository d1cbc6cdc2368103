//! Layout components (header, panes, status bar)

use crate::platform::GENERATE_SHORTCUT;
use crate::state::{AppState, Focus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Screen regions
pub struct AppLayout {
    pub header: Rect,
    /// Everything between header and status bar
    pub content: Rect,
    pub form: Rect,
    /// Present once a result has been generated
    pub results: Option<Rect>,
    pub status_bar: Rect,
}

/// Split the screen into header, form, optional results pane and status bar
pub fn create_layout(area: Rect, results_visible: bool) -> AppLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let (form, results) = if results_visible {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(rows[1]);
        (columns[0], Some(columns[1]))
    } else {
        (rows[1], None)
    };

    AppLayout {
        header: rows[0],
        content: rows[1],
        form,
        results,
        status_bar: rows[2],
    }
}

/// Draw the title bar with the provider indicator on the right
pub fn draw_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let title = Paragraph::new(Line::from(Span::styled(
        " Test Case Generator",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, area);

    let indicator = match &state.provider_status {
        Some(status) => Line::from(vec![
            Span::styled("● ", Style::default().fg(Color::Green)),
            Span::styled(status.as_str(), Style::default().fg(Color::Gray)),
            Span::raw(" "),
        ]),
        None => Line::from(vec![
            Span::styled("○ ", Style::default().fg(Color::Red)),
            Span::styled("No provider", Style::default().fg(Color::DarkGray)),
            Span::raw(" "),
        ]),
    };
    let width = indicator.width() as u16;
    let indicator_area = Rect {
        x: area.x + area.width.saturating_sub(width),
        y: area.y,
        width: width.min(area.width),
        height: 1,
    };
    frame.render_widget(Paragraph::new(indicator), indicator_area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let spans = vec![
        Span::styled(
            format!(" {} ", status_hints(state)),
            Style::default().fg(Color::Gray),
        ),
        Span::raw("| "),
        Span::styled(state.api_url.as_str(), Style::default().fg(Color::Blue)),
    ];
    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_hint = " ^Q:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the current context
pub fn status_hints(state: &AppState) -> String {
    if state.is_loading() {
        return "Generating...".to_string();
    }
    if state.is_modal_open() {
        return "j/k:nav  Enter:load  Esc:close".to_string();
    }
    match state.focus {
        Focus::Form if state.form.is_provider_active() => {
            format!("←/→:provider  Tab:next  {GENERATE_SHORTCUT}:generate  ^T:test  ^L:examples")
        }
        Focus::Form => {
            format!("Tab:next  {GENERATE_SHORTCUT}:generate  ^L:examples  ^T:test provider")
        }
        Focus::Results => {
            "j/k:scroll  PgUp/PgDn:page  ^V:view  ^E:export  ^Y:copy  ^R:form".to_string()
        }
    }
}
