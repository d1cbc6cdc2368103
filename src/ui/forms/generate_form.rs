//! Story entry form rendering

use super::field_renderer::draw_field;
use crate::platform::GENERATE_SHORTCUT;
use crate::state::{AppState, Focus, Form, GenerateForm};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

const USER_STORY_PLACEHOLDER: &str =
    "As a [type of user], I want [goal] so that [benefit]";
const CRITERIA_PLACEHOLDER: &str = "Given [context], when [action], then [outcome]";

/// Draw the generate form
pub fn draw_generate_form(frame: &mut Frame, area: Rect, state: &AppState) {
    let form_focused = state.focus == Focus::Form;
    let border_color = if form_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Story ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Story ID + title
            Constraint::Min(5),                // User story
            Constraint::Min(5),                // Acceptance criteria
            Constraint::Length(3),             // Provider
            Constraint::Length(BUTTON_HEIGHT), // Generate
        ])
        .split(inner);

    let form = &state.form;
    let is_active = |index: usize| form_focused && form.active_field() == index;

    let id_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(18), Constraint::Min(0)])
        .split(chunks[0]);

    draw_field(
        frame,
        id_row[0],
        &form.story_id,
        "e.g. US001",
        is_active(GenerateForm::STORY_ID),
    );
    draw_field(
        frame,
        id_row[1],
        &form.story_title,
        "Short title",
        is_active(GenerateForm::STORY_TITLE),
    );
    draw_field(
        frame,
        chunks[1],
        &form.user_story,
        USER_STORY_PLACEHOLDER,
        is_active(GenerateForm::USER_STORY),
    );
    draw_field(
        frame,
        chunks[2],
        &form.acceptance_criteria,
        CRITERIA_PLACEHOLDER,
        is_active(GenerateForm::ACCEPTANCE_CRITERIA),
    );
    draw_field(
        frame,
        chunks[3],
        &form.ai_provider,
        "",
        is_active(GenerateForm::AI_PROVIDER),
    );

    render_action_button(
        frame,
        chunks[4],
        "Generate Test Cases",
        GENERATE_SHORTCUT,
        state.generate_enabled && !state.is_loading(),
    );
}
