//! Application state and core logic

use crate::api::{ApiClient, ApiClientTrait, ProviderList, ProviderTestOutcome};
use crate::clipboard::{Clipboard, SystemClipboard};
use crate::clock::{Clock, SystemClock};
use crate::config::TuiConfig;
use crate::error::ApiError;
use crate::platform::has_primary_modifier;
use crate::state::{
    capitalize, export_filename, AppState, Example, ExamplesModal, Focus, Form,
    GenerationResult, NotificationKind,
};
use anyhow::Result;
use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Completion of a background backend call
#[derive(Debug)]
pub enum AppEvent {
    ProvidersLoaded(Result<ProviderList, ApiError>),
    /// `toast` is the progress notification shown while the check ran
    ProviderTested {
        toast: Uuid,
        outcome: Result<ProviderTestOutcome, ApiError>,
    },
    Generated {
        seq: u64,
        outcome: Result<GenerationResult, ApiError>,
    },
    /// Sent exactly once per generate request, however it ended
    GenerateSettled {
        seq: u64,
    },
    Exported {
        toast: Uuid,
        outcome: Result<PathBuf, ApiError>,
    },
    ExamplesLoaded(Result<Vec<Example>, ApiError>),
}

/// Reports a generate request as settled when dropped
struct SettleGuard {
    seq: u64,
    tx: UnboundedSender<AppEvent>,
}

impl Drop for SettleGuard {
    fn drop(&mut self) {
        let _ = self.tx.send(AppEvent::GenerateSettled { seq: self.seq });
    }
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Backend client shared with background tasks
    api: Arc<dyn ApiClientTrait>,
    clipboard: Box<dyn Clipboard>,
    clock: Arc<dyn Clock>,
    config: TuiConfig,
    /// Whether provider changes are written back to the config file
    persist_config: bool,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    generate_task: Option<JoinHandle<()>>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance talking to the configured backend
    pub fn new(config: TuiConfig) -> Result<Self> {
        let api = ApiClient::new(config.api_url(), config.request_timeout())?;
        let mut app = Self::with_parts(
            Arc::new(api),
            Box::new(SystemClipboard),
            Arc::new(SystemClock),
            config,
        );
        app.persist_config = true;
        Ok(app)
    }

    /// Assemble an App from its collaborators
    pub fn with_parts(
        api: Arc<dyn ApiClientTrait>,
        clipboard: Box<dyn Clipboard>,
        clock: Arc<dyn Clock>,
        config: TuiConfig,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(config.api_url()),
            api,
            clipboard,
            clock,
            config,
            persist_config: false,
            events_tx,
            events_rx,
            generate_task: None,
            quit: false,
        }
    }

    /// Kick off startup requests
    pub fn start(&mut self) {
        self.load_providers();
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Housekeeping run once per frame
    pub fn tick(&mut self) {
        let now = self.clock.now();
        self.state.notifications.expire(now);
    }

    /// Whether the next frame should come quickly (animations in progress)
    pub fn is_animating(&self) -> bool {
        self.state.is_loading() || !self.state.notifications.is_empty()
    }

    /// Apply every completed background call
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
        }
    }

    /// Show a transient notification
    pub fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) -> Uuid {
        let message = message.into();
        debug!(?kind, %message, "notification");
        let now = self.clock.now();
        self.state.notifications.enqueue(message, kind, now)
    }

    // ---------------------------------------------------------------------
    // Providers
    // ---------------------------------------------------------------------

    /// Fetch the provider list in the background
    pub fn load_providers(&self) {
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = api.list_providers().await;
            let _ = tx.send(AppEvent::ProvidersLoaded(outcome));
        });
    }

    fn on_providers_loaded(&mut self, outcome: Result<ProviderList, ApiError>) {
        match outcome {
            Ok(list) => {
                info!(providers = ?list.providers, current = ?list.current, "providers loaded");
                let preferred = self
                    .config
                    .preferred_provider
                    .clone()
                    .filter(|p| list.providers.contains(p))
                    .or(list.current);
                self.state
                    .form
                    .ai_provider
                    .set_options(list.providers, preferred.as_deref());
                self.update_provider_status();
            }
            Err(e) => {
                // The selector stays usable (empty); nothing to tell the user
                error!("Failed to load AI providers: {e}");
            }
        }
    }

    /// Refresh the header status for the selected provider
    pub fn update_provider_status(&mut self) {
        self.state.provider_status = self
            .state
            .form
            .ai_provider
            .selected_option()
            .map(|p| format!("{} Ready", capitalize(p)));
    }

    /// User picked a different provider
    fn on_provider_changed(&mut self) {
        self.update_provider_status();

        let selected = self
            .state
            .form
            .ai_provider
            .selected_option()
            .map(str::to_string);
        if selected == self.config.preferred_provider {
            return;
        }
        self.config.preferred_provider = selected;
        if self.persist_config {
            if let Err(e) = self.config.save() {
                warn!("Failed to save preferred provider: {e}");
            }
        }
    }

    /// Run the backend's provider health check
    pub fn test_provider(&mut self) {
        let toast = self.notify("Testing AI provider...", NotificationKind::Info);
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = api.test_provider().await;
            let _ = tx.send(AppEvent::ProviderTested { toast, outcome });
        });
    }

    fn on_provider_tested(
        &mut self,
        toast: Uuid,
        outcome: Result<ProviderTestOutcome, ApiError>,
    ) {
        self.state.notifications.dismiss(toast);

        match outcome {
            Ok(ProviderTestOutcome::Healthy { provider }) => {
                info!(%provider, "AI provider test successful");
                self.notify(
                    format!("AI Provider Test Successful! {provider} is working."),
                    NotificationKind::Success,
                );
            }
            Ok(ProviderTestOutcome::Failed { error }) => {
                error!(%error, "AI provider test failed");
                self.notify(
                    format!("AI Provider Test Failed: {error}"),
                    NotificationKind::Error,
                );
            }
            Err(e) => {
                error!("Error testing AI provider: {e}");
                self.notify(format!("Test Error: {e}"), NotificationKind::Error);
            }
        }
    }

    // ---------------------------------------------------------------------
    // Generation
    // ---------------------------------------------------------------------

    /// Re-evaluate whether generate is enabled
    pub fn validate_form(&mut self) {
        self.state.validate_form();
    }

    /// Submit the form. A newer request supersedes any in-flight one.
    pub fn generate(&mut self) {
        let input = self.state.form.to_input();
        if input.user_story.is_empty() {
            warn!("generate requested without a user story");
            self.notify("Please enter a user story", NotificationKind::Error);
            return;
        }

        let seq = self.state.generation.issue();
        if let Some(previous) = self.generate_task.take() {
            previous.abort();
        }
        info!(seq, story_id = %input.story_id, "generating test cases");

        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        // Created outside the task so an abort before first poll still settles
        let settle = SettleGuard {
            seq,
            tx: tx.clone(),
        };
        self.generate_task = Some(tokio::spawn(async move {
            let _settle = settle;
            let outcome = api.generate(&input).await;
            let _ = tx.send(AppEvent::Generated { seq, outcome });
        }));
    }

    fn on_generated(&mut self, seq: u64, outcome: Result<GenerationResult, ApiError>) {
        if !self.state.generation.is_current(seq) {
            debug!(
                seq,
                latest = self.state.generation.latest(),
                "discarding superseded generation"
            );
            return;
        }

        match outcome {
            Ok(result) => {
                info!(seq, story_id = %result.story_id, "test cases generated");
                self.display_results(result);
                self.notify(
                    "Test cases generated successfully!",
                    NotificationKind::Success,
                );
            }
            Err(e) => {
                error!(seq, "Error generating test cases: {e}");
                self.notify(format!("Error: {e}"), NotificationKind::Error);
            }
        }
    }

    /// Replace the held result and bring the results pane into view
    pub fn display_results(&mut self, result: GenerationResult) {
        self.state.show_result(result);
    }

    // ---------------------------------------------------------------------
    // Export / copy
    // ---------------------------------------------------------------------

    /// Export the held result to a spreadsheet in the download directory
    pub fn export_to_spreadsheet(&mut self) {
        let Some(result) = self.state.current_result.clone() else {
            warn!("export requested without generated test cases");
            self.notify("No test cases to export", NotificationKind::Error);
            return;
        };
        self.spawn_export(result);
    }

    fn spawn_export(&mut self, result: GenerationResult) {
        let toast = self.notify("Exporting to Excel...", NotificationKind::Info);

        let path = self
            .config
            .download_dir()
            .join(export_filename(&result.story_id, self.clock.now()));
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = match api.export(&result).await {
                Ok(bytes) => save_export(&path, &bytes).await,
                Err(e) => Err(e),
            };
            let _ = tx.send(AppEvent::Exported { toast, outcome });
        });
    }

    fn on_exported(&mut self, toast: Uuid, outcome: Result<PathBuf, ApiError>) {
        self.state.notifications.dismiss(toast);

        match outcome {
            Ok(path) => {
                info!(path = %path.display(), "spreadsheet exported");
                self.notify(
                    format!("Excel file exported successfully! Saved to {}", path.display()),
                    NotificationKind::Success,
                );
            }
            Err(e) => {
                if let ApiError::UnexpectedContentType { content_type, body } = &e {
                    debug!(
                        ?content_type,
                        body_len = body.len(),
                        "export payload was not a spreadsheet"
                    );
                }
                error!("Error exporting to Excel: {e}");
                self.notify(format!("Export failed: {e}"), NotificationKind::Error);
            }
        }
    }

    /// Copy the held test cases to the clipboard
    pub fn copy_result(&mut self) {
        let Some(result) = self.state.current_result.as_ref() else {
            self.notify("No test cases to copy", NotificationKind::Error);
            return;
        };

        match copy_result_text(self.clipboard.as_mut(), result) {
            Ok(()) => {
                self.notify("Test cases copied to clipboard!", NotificationKind::Success);
            }
            Err(e) => {
                error!("Failed to copy to clipboard: {e}");
                self.notify("Failed to copy to clipboard", NotificationKind::Error);
            }
        }
    }

    // ---------------------------------------------------------------------
    // Examples
    // ---------------------------------------------------------------------

    /// Fetch examples and open the picker when they arrive
    pub fn show_examples(&self) {
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = api.list_examples().await;
            let _ = tx.send(AppEvent::ExamplesLoaded(outcome));
        });
    }

    fn on_examples_loaded(&mut self, outcome: Result<Vec<Example>, ApiError>) {
        match outcome {
            Ok(examples) => {
                self.state.examples_modal = Some(ExamplesModal::new(examples));
            }
            Err(e) => {
                error!("Failed to load examples: {e}");
                self.notify("Failed to load examples", NotificationKind::Error);
            }
        }
    }

    pub fn hide_examples(&mut self) {
        self.state.examples_modal = None;
    }

    /// Fill the form from an example story
    pub fn load_example(&mut self, example: &Example) {
        let (user_story, acceptance_criteria) = example.split();
        let form = &mut self.state.form;
        form.story_id.set_text(example.id.clone());
        form.story_title.set_text(example.title.clone());
        form.user_story.set_text(user_story);
        form.acceptance_criteria.set_text(acceptance_criteria);

        self.validate_form();
        self.notify(
            format!("Loaded example: {}", example.title),
            NotificationKind::Success,
        );
    }

    // ---------------------------------------------------------------------
    // Events
    // ---------------------------------------------------------------------

    /// Apply the completion of a background call
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ProvidersLoaded(outcome) => self.on_providers_loaded(outcome),
            AppEvent::ProviderTested { toast, outcome } => {
                self.on_provider_tested(toast, outcome)
            }
            AppEvent::Generated { seq, outcome } => self.on_generated(seq, outcome),
            AppEvent::GenerateSettled { seq } => self.state.generation.settle(seq),
            AppEvent::Exported { toast, outcome } => self.on_exported(toast, outcome),
            AppEvent::ExamplesLoaded(outcome) => self.on_examples_loaded(outcome),
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Global quit
        if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
            self.quit = true;
            return;
        }

        // Loading overlay blocks everything else
        if self.state.is_loading() {
            return;
        }

        if self.state.is_modal_open() {
            self.handle_modal_key(key);
            return;
        }

        // Shortcuts
        if key.code == KeyCode::Enter && has_primary_modifier(key.modifiers) {
            self.generate_if_enabled();
            return;
        }
        if ctrl {
            match key.code {
                KeyCode::Char('g') => self.generate_if_enabled(),
                KeyCode::Char('l') => self.show_examples(),
                KeyCode::Char('t') => self.test_provider(),
                KeyCode::Char('e') => self.export_to_spreadsheet(),
                KeyCode::Char('y') => self.copy_result(),
                KeyCode::Char('r') => {
                    if self.state.results_visible {
                        self.state.focus.toggle();
                    }
                }
                KeyCode::Char('v') => {
                    if self.state.current_result.is_some() {
                        self.state.results_view.toggle();
                        self.state.results_scroll = 0;
                    }
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Tab => {
                self.state.focus = Focus::Form;
                self.state.form.next_field();
            }
            KeyCode::BackTab => {
                self.state.focus = Focus::Form;
                self.state.form.prev_field();
            }
            KeyCode::PageDown => self.state.scroll_down_page(),
            KeyCode::PageUp => self.state.scroll_up_page(),
            _ => match self.state.focus {
                Focus::Form => self.handle_form_key(key),
                Focus::Results => self.handle_results_key(key),
            },
        }
    }

    fn generate_if_enabled(&mut self) {
        if self.state.generate_enabled {
            self.generate();
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.hide_examples(),
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(modal) = self.state.examples_modal.as_mut() {
                    modal.select_prev();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(modal) = self.state.examples_modal.as_mut() {
                    modal.select_next();
                }
            }
            KeyCode::Enter => {
                let selected = self
                    .state
                    .examples_modal
                    .as_ref()
                    .and_then(|m| m.selected_example().cloned());
                if let Some(example) = selected {
                    self.load_example(&example);
                    self.hide_examples();
                }
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        if self.state.form.is_provider_active() {
            match key.code {
                KeyCode::Left => {
                    self.state.form.ai_provider.prev_option();
                    self.on_provider_changed();
                }
                KeyCode::Right | KeyCode::Char(' ') => {
                    self.state.form.ai_provider.next_option();
                    self.on_provider_changed();
                }
                KeyCode::Enter => self.state.form.next_field(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Enter => {
                if self.state.form.is_active_field_multiline() {
                    self.state.form.get_active_field_mut().push_char('\n');
                    self.validate_form();
                } else {
                    self.state.form.next_field();
                }
            }
            KeyCode::Backspace => {
                self.state.form.get_active_field_mut().pop_char();
                self.validate_form();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
                self.state.form.get_active_field_mut().push_char(c);
                self.validate_form();
            }
            _ => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.state.scroll_down(),
            KeyCode::Up | KeyCode::Char('k') => self.state.scroll_up(),
            KeyCode::Home => self.state.results_scroll = 0,
            _ => {}
        }
    }
}

/// Write the spreadsheet bytes, creating the directory if needed.
/// An existing file is never replaced: the name gets a `-1`, `-2`, ...
/// suffix instead. Returns the path actually written.
async fn save_export(path: &Path, bytes: &[u8]) -> Result<PathBuf, ApiError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut attempt = 0;
    loop {
        let candidate = numbered_path(path, attempt);
        let opened = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
            .await;
        match opened {
            Ok(mut file) => {
                file.write_all(bytes).await?;
                file.flush().await?;
                return Ok(candidate);
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                debug!(path = %candidate.display(), "export file exists, trying next name");
                attempt += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// `dir/name.ext` for attempt 0, `dir/name-N.ext` after that
fn numbered_path(path: &Path, attempt: u32) -> PathBuf {
    if attempt == 0 {
        return path.to_path_buf();
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}-{attempt}.{}", ext.to_string_lossy()),
        None => format!("{stem}-{attempt}"),
    };
    path.with_file_name(name)
}

/// Copy a result's test case text
fn copy_result_text(clipboard: &mut dyn Clipboard, result: &GenerationResult) -> Result<()> {
    clipboard.set_text(&result.test_cases)
}
