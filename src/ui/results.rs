//! Generated test case view

use crate::state::{cell_text, AppState, Focus, GenerationResult, ResultsView};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

/// Draw the results pane
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(result) = state.current_result.as_ref() else {
        return;
    };

    let border_color = match state.focus {
        Focus::Results => Color::Cyan,
        Focus::Form => Color::DarkGray,
    };
    let block = Block::default()
        .title(format!(" Test Cases ({}) ", state.results_view.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header_height = if result.note.is_some() { 4 } else { 3 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(header_height), Constraint::Min(0)])
        .split(inner);

    draw_header(frame, chunks[0], result);

    match state.results_view {
        ResultsView::Raw => draw_raw(frame, chunks[1], result, state.results_scroll),
        ResultsView::Table => draw_table(frame, chunks[1], result, state.results_scroll),
    }
}

fn draw_header(frame: &mut Frame, area: Rect, result: &GenerationResult) {
    let mut lines = vec![
        Line::from(Span::styled(
            result.story_label(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            result.generated_at_label(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    if let Some(note) = &result.note {
        lines.push(Line::from(Span::styled(
            note.as_str(),
            Style::default().fg(Color::Yellow),
        )));
    }
    lines.push(Line::from(vec![
        Span::styled("^E", Style::default().fg(Color::Cyan)),
        Span::styled(":export  ", Style::default().fg(Color::DarkGray)),
        Span::styled("^Y", Style::default().fg(Color::Cyan)),
        Span::styled(":copy  ", Style::default().fg(Color::DarkGray)),
        Span::styled("^V", Style::default().fg(Color::Cyan)),
        Span::styled(":raw/table", Style::default().fg(Color::DarkGray)),
    ]));

    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_raw(frame: &mut Frame, area: Rect, result: &GenerationResult, scroll: u16) {
    let paragraph = Paragraph::new(result.test_cases.as_str())
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn draw_table(frame: &mut Frame, area: Rect, result: &GenerationResult, scroll: u16) {
    if result.parsed_cases.is_empty() {
        let empty = Paragraph::new("No structured rows in this result. Press ^V for the raw output.")
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true });
        frame.render_widget(empty, area);
        return;
    }

    let columns = result.table_columns();
    let header = Row::new(columns.iter().map(|c| Cell::from(c.as_str())))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = result
        .parsed_cases
        .iter()
        .skip(scroll as usize)
        .map(|case| {
            let cells: Vec<String> = columns.iter().map(|c| cell_text(case.get(c))).collect();
            let height = cells
                .iter()
                .map(|text| text.lines().count())
                .max()
                .unwrap_or(1)
                .max(1) as u16;
            Row::new(cells).height(height).bottom_margin(1)
        })
        .collect();

    let widths: Vec<Constraint> = columns.iter().map(|c| column_width(c)).collect();
    let table = Table::new(rows, widths).header(header).column_spacing(1);
    frame.render_widget(table, area);
}

fn column_width(column: &str) -> Constraint {
    match column {
        "Test Case ID" => Constraint::Length(12),
        "Priority" | "Risk Level" => Constraint::Length(10),
        "Steps" | "Expected Result" => Constraint::Fill(2),
        _ => Constraint::Fill(1),
    }
}
