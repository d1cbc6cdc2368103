//! Application state definitions
//!
//! `AppState` is the whole view-model: the draw functions read nothing else.

use super::examples::ExamplesModal;
use super::forms::GenerateForm;
use super::generation::GenerationTracker;
use super::notifications::NotificationQueue;
use super::results::GenerationResult;

/// Which pane receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Form,
    Results,
}

impl Focus {
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Form => Self::Results,
            Self::Results => Self::Form,
        };
    }
}

/// How generated test cases are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultsView {
    /// Generator output verbatim
    #[default]
    Raw,
    /// Rows parsed by the backend
    Table,
}

impl ResultsView {
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Raw => Self::Table,
            Self::Table => Self::Raw,
        };
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Raw => "Raw",
            Self::Table => "Table",
        }
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Form
    pub form: GenerateForm,
    pub generate_enabled: bool,
    /// Header status indicator for the selected provider
    pub provider_status: Option<String>,

    // Results
    pub current_result: Option<GenerationResult>,
    pub results_visible: bool,
    pub results_view: ResultsView,
    pub results_scroll: u16,
    pub focus: Focus,

    // Overlays
    pub examples_modal: Option<ExamplesModal>,
    pub generation: GenerationTracker,
    pub notifications: NotificationQueue,

    // Backend
    pub api_url: String,
}

impl AppState {
    pub fn new(api_url: impl Into<String>) -> Self {
        let mut state = Self {
            api_url: api_url.into(),
            ..Self::default()
        };
        state.validate_form();
        state
    }

    /// Re-evaluate whether generate is enabled
    pub fn validate_form(&mut self) {
        self.generate_enabled = self.form.can_generate();
    }

    pub fn is_loading(&self) -> bool {
        self.generation.is_loading()
    }

    pub fn is_modal_open(&self) -> bool {
        self.examples_modal.is_some()
    }

    /// Store a new result and reveal the results pane at its top
    pub fn show_result(&mut self, result: GenerationResult) {
        self.current_result = Some(result);
        self.results_visible = true;
        self.results_scroll = 0;
        self.focus = Focus::Results;
    }

    /// Scroll down
    pub fn scroll_down(&mut self) {
        self.results_scroll = self.results_scroll.saturating_add(1);
    }

    /// Scroll up
    pub fn scroll_up(&mut self) {
        self.results_scroll = self.results_scroll.saturating_sub(1);
    }

    /// Scroll down a page (10 lines)
    pub fn scroll_down_page(&mut self) {
        self.results_scroll = self.results_scroll.saturating_add(10);
    }

    /// Scroll up a page (10 lines)
    pub fn scroll_up_page(&mut self) {
        self.results_scroll = self.results_scroll.saturating_sub(10);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: &str) -> GenerationResult {
        GenerationResult {
            story_id: id.to_string(),
            story_title: "Title".to_string(),
            test_cases: "cases".to_string(),
            timestamp: "2024-05-01T12:00:00".to_string(),
            parsed_cases: Vec::new(),
            note: None,
        }
    }

    #[test]
    fn test_new_state_is_idle_and_disabled() {
        let state = AppState::new("http://localhost:5000");
        assert!(!state.generate_enabled);
        assert!(!state.is_loading());
        assert!(!state.is_modal_open());
        assert!(state.current_result.is_none());
        assert!(!state.results_visible);
    }

    #[test]
    fn test_validate_form_tracks_user_story() {
        let mut state = AppState::new("http://localhost:5000");
        state.form.user_story.set_text("As a user");
        state.validate_form();
        assert!(state.generate_enabled);

        state.form.user_story.set_text("  ");
        state.validate_form();
        assert!(!state.generate_enabled);
    }

    #[test]
    fn test_show_result_replaces_and_reveals() {
        let mut state = AppState::new("http://localhost:5000");
        state.show_result(result("US001"));
        state.results_scroll = 25;
        state.focus = Focus::Form;

        state.show_result(result("US002"));
        assert_eq!(
            state.current_result.as_ref().map(|r| r.story_id.as_str()),
            Some("US002")
        );
        assert!(state.results_visible);
        assert_eq!(state.results_scroll, 0);
        assert_eq!(state.focus, Focus::Results);
    }

    #[test]
    fn test_scroll_saturates() {
        let mut state = AppState::default();
        state.scroll_up();
        assert_eq!(state.results_scroll, 0);
        state.scroll_down_page();
        state.scroll_down();
        assert_eq!(state.results_scroll, 11);
        state.scroll_up_page();
        assert_eq!(state.results_scroll, 1);
    }

    #[test]
    fn test_toggles() {
        let mut focus = Focus::default();
        focus.toggle();
        assert_eq!(focus, Focus::Results);

        let mut view = ResultsView::default();
        view.toggle();
        assert_eq!(view, ResultsView::Table);
        assert_eq!(view.label(), "Table");
    }
}
