use ratatui::Frame;
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::sync::mpsc::{Receiver, Sender};
use std::time::Instant;
use tui_input::backend::crossterm::EventHandler;

use crate::dashboard::{self, FetchOutcome, FetchRequest};
use crate::logging::FlashMessage;
use crate::models::{Country, RegistrationBook};
use crate::storage::{Config, RegistrationStorage};
use crate::ui;
use crate::ui::Theme;
use crate::ui::form::RegistrationForm;

/// Inline message shown in the dashboard panel when a fetch fails
const FETCH_ERROR_TEXT: &str = "Failed to load data. Please check your connection.";

/// Application mode determines which keybindings are active
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Table navigation
    #[default]
    Normal,
    /// Editing the registration form
    Form,
    /// Confirmation dialog for destructive actions
    Confirm,
    /// Help overlay
    Help,
}

/// Pending destructive action awaiting a yes/no answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Remove one registration, looked up by its stable id
    RemoveRegistration(u64),
    /// Empty the whole book
    ClearAll,
}

impl ConfirmAction {
    pub fn prompt(&self) -> &'static str {
        match self {
            ConfirmAction::RemoveRegistration(_) => "Are you sure you want to remove this course?",
            ConfirmAction::ClearAll => "Are you sure you want to clear all data?",
        }
    }
}

/// Dashboard panel state
///
/// `Loading` doubles as the refresh gate: requests are ignored until the
/// pending outcome arrives, and the transition on receipt is what re-enables
/// refresh on every exit path.
#[derive(Debug, Clone, PartialEq)]
pub enum Dashboard {
    /// Nothing fetched yet
    Idle,
    /// A fetch is in flight; skeleton placeholders render
    Loading,
    /// Last fetch succeeded; the sampled cards
    Ready(Vec<Country>),
    /// Last fetch failed; only the error message renders
    Failed(String),
}

impl Dashboard {
    pub fn is_loading(&self) -> bool {
        matches!(self, Dashboard::Loading)
    }
}

/// Main application state
pub struct App {
    /// Current interaction mode
    pub mode: AppMode,

    /// Course registrations (loaded from storage)
    pub book: RegistrationBook,

    /// Persistence for the book; written after every mutation
    storage: Box<dyn RegistrationStorage>,

    /// Application configuration
    pub config: Config,

    theme: Theme,

    /// The four text inputs plus focus
    pub form: RegistrationForm,

    /// Currently selected row in the table
    pub selected_index: usize,

    /// Action awaiting confirmation (only while in Confirm mode)
    pub pending_confirm: Option<ConfirmAction>,

    /// Country dashboard panel
    pub dashboard: Dashboard,

    /// Channel for requesting background fetches
    fetch_tx: Sender<FetchRequest>,

    /// Channel for receiving fetch outcomes
    fetch_rx: Receiver<FetchOutcome>,

    /// Flash messages displayed over the dashboard panel
    pub flash_messages: Vec<FlashMessage>,

    /// Receiver for flash messages from the logger
    flash_rx: Option<Receiver<FlashMessage>>,

    /// Flag to request application exit
    pub should_quit: bool,
}

impl App {
    pub fn new(
        book: RegistrationBook,
        storage: Box<dyn RegistrationStorage>,
        config: Config,
        flash_rx: Option<Receiver<FlashMessage>>,
        fetch_tx: Sender<FetchRequest>,
        fetch_rx: Receiver<FetchOutcome>,
    ) -> Self {
        App {
            mode: AppMode::default(),
            book,
            storage,
            config,
            theme: Theme::default(),
            form: RegistrationForm::default(),
            selected_index: 0,
            pending_confirm: None,
            dashboard: Dashboard::Idle,
            fetch_tx,
            fetch_rx,
            flash_messages: Vec::new(),
            flash_rx,
            should_quit: false,
        }
    }

    /// Poll the flash message receiver and add to the queue
    pub fn poll_flash_messages(&mut self) {
        if let Some(rx) = &self.flash_rx {
            while let Ok(msg) = rx.try_recv() {
                self.flash_messages.push(msg);
            }
        }
    }

    /// Drop flash messages whose fade has completed
    ///
    /// A message stays fully visible for `flash_duration_ms`, renders dimmed
    /// for another `flash_fade_ms`, and is only removed after that.
    pub fn prune_flash_messages(&mut self) {
        if self.flash_messages.is_empty() {
            return;
        }

        let now = Instant::now();
        let ttl = self.config.general.flash_duration_ms + self.config.general.flash_fade_ms;
        self.flash_messages
            .retain(|msg| now.duration_since(msg.timestamp).as_millis() < ttl as u128);
    }

    pub fn clear_flash_messages(&mut self) {
        self.flash_messages.clear();
    }

    /// Drain fetch outcomes from the worker
    ///
    /// Outcomes arrive in completion order; the last one wins the panel.
    pub fn poll_fetch_outcomes(&mut self) {
        while let Ok(outcome) = self.fetch_rx.try_recv() {
            self.apply_fetch_outcome(outcome);
        }
    }

    fn apply_fetch_outcome(&mut self, outcome: FetchOutcome) {
        match outcome {
            Ok(countries) => {
                let total = countries.len();
                let sample =
                    dashboard::sample_countries(countries, self.config.dashboard.sample_size);
                log::debug!("Sampled {} of {} countries", sample.len(), total);
                self.dashboard = Dashboard::Ready(sample);
                log::info!("Dashboard data updated");
            }
            Err(e) => {
                log::debug!("Dashboard fetch failed: {e}");
                self.dashboard = Dashboard::Failed(FETCH_ERROR_TEXT.to_string());
                log::error!("Failed to load dashboard data");
            }
        }
    }

    /// Kick off a dashboard fetch unless one is already in flight
    pub fn refresh_dashboard(&mut self) {
        if self.dashboard.is_loading() {
            // Refresh is disabled while a fetch is in flight
            return;
        }

        self.dashboard = Dashboard::Loading;
        if self.fetch_tx.send(FetchRequest).is_err() {
            log::debug!("Fetch worker is gone");
            self.dashboard = Dashboard::Failed(FETCH_ERROR_TEXT.to_string());
            log::error!("Failed to load dashboard data");
        }
    }

    /// Validate the form and append a registration
    ///
    /// On validation failure nothing is mutated and the form keeps its
    /// entered values.
    pub fn submit_form(&mut self) {
        let draft = self.form.draft();

        if let Err(e) = draft.validate() {
            log::error!("{e}");
            return;
        }

        self.book.add(draft);
        self.persist();
        self.form.reset();
        self.selected_index = self.book.len() - 1;
        self.mode = AppMode::Normal;
        log::info!("Course registered successfully!");
    }

    /// Write the book to storage, reporting failures as a flash
    fn persist(&mut self) {
        if let Err(e) = self.storage.save(&self.book) {
            log::error!("Failed to save registrations: {e:#}");
        }
    }

    /// Ask to remove the selected registration
    pub fn request_remove_selected(&mut self) {
        let Some(reg) = self.book.entries().get(self.selected_index) else {
            return;
        };

        self.pending_confirm = Some(ConfirmAction::RemoveRegistration(reg.id));
        self.mode = AppMode::Confirm;
    }

    /// Ask to clear the book; a no-op when it is already empty
    pub fn request_clear_all(&mut self) {
        if self.book.is_empty() {
            return;
        }

        self.pending_confirm = Some(ConfirmAction::ClearAll);
        self.mode = AppMode::Confirm;
    }

    /// Execute the pending destructive action
    pub fn confirm_pending(&mut self) {
        let action = self.pending_confirm.take();
        self.mode = AppMode::Normal;

        match action {
            Some(ConfirmAction::RemoveRegistration(id)) => match self.book.remove(id) {
                Ok(_) => {
                    self.persist();
                    self.clamp_selection();
                    log::info!("Course removed.");
                }
                Err(e) => log::error!("{e}"),
            },
            Some(ConfirmAction::ClearAll) => {
                self.book.clear();
                self.persist();
                self.selected_index = 0;
                log::info!("All data cleared.");
            }
            None => {}
        }
    }

    /// Declining a confirmation is a no-op
    pub fn cancel_confirm(&mut self) {
        self.pending_confirm = None;
        self.mode = AppMode::Normal;
    }

    pub fn move_up(&mut self, n: usize) {
        self.selected_index = self.selected_index.saturating_sub(n);
    }

    pub fn move_down(&mut self, n: usize) {
        if !self.book.is_empty() {
            self.selected_index = (self.selected_index + n).min(self.book.len() - 1);
        }
    }

    fn clamp_selection(&mut self) {
        if self.book.is_empty() {
            self.selected_index = 0;
        } else if self.selected_index >= self.book.len() {
            self.selected_index = self.book.len() - 1;
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Route a key press to the handler for the current mode
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Ctrl-C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        match self.mode {
            AppMode::Normal => self.handle_normal_key(key),
            AppMode::Form => self.handle_form_key(key),
            AppMode::Confirm => self.handle_confirm_key(key),
            AppMode::Help => self.handle_help_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_down(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(1),
            KeyCode::Home => self.selected_index = 0,
            KeyCode::End => {
                self.selected_index = self.book.len().saturating_sub(1);
            }
            KeyCode::Char('a') | KeyCode::Char('i') => {
                self.mode = AppMode::Form;
            }
            KeyCode::Char('d') => self.request_remove_selected(),
            KeyCode::Char('D') => self.request_clear_all(),
            KeyCode::Char('r') => self.refresh_dashboard(),
            KeyCode::Char('c') => self.clear_flash_messages(),
            KeyCode::Char('?') => self.mode = AppMode::Help,
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                // Leave the form without clearing it; entered values survive
                self.mode = AppMode::Normal;
            }
            KeyCode::Enter => self.submit_form(),
            KeyCode::Tab | KeyCode::Down => self.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus_prev(),
            _ => {
                self.form.active_input_mut().handle_event(&Event::Key(key));
            }
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => self.confirm_pending(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.cancel_confirm(),
            _ => {}
        }
    }

    fn handle_help_key(&mut self, _key: KeyEvent) {
        self.mode = AppMode::Normal;
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let size = frame.area();

        frame.render_widget(
            ratatui::widgets::Block::default()
                .style(ratatui::prelude::Style::default().bg(self.theme.default_bg)),
            size,
        );

        // Layout: [registrations, divider, dashboard, keyboard hints]
        let chunks = ui::create_main_layout(size);
        let left_area = chunks[0];
        let divider_area = chunks[1];
        let dashboard_area = chunks[2];
        let hints_area = chunks[3];

        // Left panel: form above, table below
        let left_chunks = ratatui::layout::Layout::default()
            .direction(ratatui::layout::Direction::Vertical)
            .constraints([
                ratatui::layout::Constraint::Length(8),
                ratatui::layout::Constraint::Min(4),
            ])
            .split(left_area);

        ui::render_form(
            frame,
            left_chunks[0],
            &self.form,
            self.mode == AppMode::Form,
            &self.theme,
        );

        ui::render_table(
            frame,
            left_chunks[1],
            self.book.entries(),
            self.selected_index,
            self.mode == AppMode::Normal,
            &self.theme,
        );

        ui::render_divider(frame, divider_area, &self.theme);

        ui::render_dashboard(frame, dashboard_area, &self.dashboard, &self.theme);

        ui::render_flashes(
            frame,
            dashboard_area,
            &self.flash_messages,
            self.config.general.flash_duration_ms,
            &self.theme,
        );

        ui::render_keyboard_hints(frame, hints_area, self.mode, &self.theme);

        if matches!(self.mode, AppMode::Help) {
            ui::render_help_overlay(frame, size, &self.theme);
        }

        if let (AppMode::Confirm, Some(action)) = (self.mode, self.pending_confirm) {
            ui::render_confirm_overlay(frame, size, action.prompt(), &self.theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::FetchError;
    use crate::models::RegistrationDraft;
    use crate::storage::JsonRegistrationStorage;
    use std::sync::mpsc;
    use tempfile::TempDir;

    struct Fixture {
        app: App,
        // Held so refresh_dashboard has a live receiver without a real worker
        worker_rx: Receiver<FetchRequest>,
        dir: TempDir,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let storage = JsonRegistrationStorage::new(dir.path().join("registrations.json"));
        let (fetch_tx, worker_rx) = mpsc::channel();
        let (_outcome_tx, fetch_rx) = mpsc::channel();

        let app = App::new(
            RegistrationBook::new(),
            Box::new(storage),
            Config::default(),
            None,
            fetch_tx,
            fetch_rx,
        );

        Fixture {
            app,
            worker_rx,
            dir,
        }
    }

    fn fill_form(app: &mut App, name: &str, matric: &str, code: &str, title: &str) {
        use tui_input::Input;
        app.form.student_name = Input::new(name.to_string());
        app.form.matric_number = Input::new(matric.to_string());
        app.form.course_code = Input::new(code.to_string());
        app.form.course_title = Input::new(title.to_string());
    }

    fn country(name: &str) -> Country {
        Country {
            name: name.to_string(),
            region: "Test".to_string(),
            capital: vec![],
            population: 1,
            flag: String::new(),
        }
    }

    #[test]
    fn test_submit_with_missing_field_does_not_mutate() {
        let mut fx = fixture();
        fx.app.mode = AppMode::Form;
        fill_form(&mut fx.app, "Ada Obi", "LCU/CS/2023/001", "", "Intro");

        fx.app.submit_form();

        assert!(fx.app.book.is_empty());
        // The form keeps its entered values and stays active
        assert_eq!(fx.app.form.student_name.value(), "Ada Obi");
        assert_eq!(fx.app.mode, AppMode::Form);
    }

    #[test]
    fn test_submit_with_bad_matric_does_not_mutate() {
        let mut fx = fixture();
        fx.app.mode = AppMode::Form;
        fill_form(&mut fx.app, "Ada Obi", "LCU-CS-2023-001", "CSC101", "Intro");

        fx.app.submit_form();

        assert!(fx.app.book.is_empty());
        assert_eq!(fx.app.mode, AppMode::Form);
    }

    #[test]
    fn test_submit_valid_adds_persists_and_resets_form() {
        let mut fx = fixture();
        fx.app.mode = AppMode::Form;
        fill_form(&mut fx.app, "Ada Obi", "LCU/CS/2023/001", "CSC101", "Intro");

        fx.app.submit_form();

        assert_eq!(fx.app.book.len(), 1);
        assert_eq!(fx.app.form.student_name.value(), "");
        assert_eq!(fx.app.mode, AppMode::Normal);

        // Persisted: a fresh storage handle sees the record
        let reloaded = JsonRegistrationStorage::new(fx.dir.path().join("registrations.json"))
            .load()
            .unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.entries()[0].student_name, "Ada Obi");
    }

    #[test]
    fn test_decline_confirm_is_a_noop() {
        let mut fx = fixture();
        fx.app.book.add(RegistrationDraft::new(
            "Ada Obi",
            "LCU/CS/2023/001",
            "CSC101",
            "Intro",
        ));

        fx.app.request_remove_selected();
        assert_eq!(fx.app.mode, AppMode::Confirm);

        fx.app.cancel_confirm();
        assert_eq!(fx.app.book.len(), 1);
        assert_eq!(fx.app.mode, AppMode::Normal);
        assert!(fx.app.pending_confirm.is_none());
    }

    #[test]
    fn test_confirm_remove_deletes_by_id() {
        let mut fx = fixture();
        fx.app.book.add(RegistrationDraft::new(
            "Ada Obi",
            "LCU/CS/2023/001",
            "CSC101",
            "Intro",
        ));
        fx.app.book.add(RegistrationDraft::new(
            "Ada Obi",
            "LCU/CS/2023/002",
            "CSC102",
            "Data Structures",
        ));
        fx.app.selected_index = 0;

        fx.app.request_remove_selected();
        fx.app.confirm_pending();

        assert_eq!(fx.app.book.len(), 1);
        assert_eq!(fx.app.book.entries()[0].course_code, "CSC102");
    }

    #[test]
    fn test_clear_all_requires_nonempty_book() {
        let mut fx = fixture();

        fx.app.request_clear_all();
        assert_eq!(fx.app.mode, AppMode::Normal);
        assert!(fx.app.pending_confirm.is_none());

        fx.app.book.add(RegistrationDraft::new(
            "Ada Obi",
            "LCU/CS/2023/001",
            "CSC101",
            "Intro",
        ));
        fx.app.request_clear_all();
        assert_eq!(fx.app.mode, AppMode::Confirm);

        fx.app.confirm_pending();
        assert!(fx.app.book.is_empty());
    }

    #[test]
    fn test_refresh_gated_while_loading() {
        let mut fx = fixture();

        fx.app.refresh_dashboard();
        assert!(fx.app.dashboard.is_loading());

        fx.app.refresh_dashboard();
        fx.app.refresh_dashboard();

        // Only the first refresh reached the worker
        assert_eq!(fx.worker_rx.try_iter().count(), 1);
    }

    #[test]
    fn test_failed_fetch_shows_error_and_reenables_refresh() {
        let mut fx = fixture();
        fx.app.dashboard = Dashboard::Loading;

        fx.app
            .apply_fetch_outcome(Err(FetchError::Client("boom".to_string())));

        match &fx.app.dashboard {
            Dashboard::Failed(msg) => assert_eq!(msg, FETCH_ERROR_TEXT),
            other => panic!("expected Failed, got {other:?}"),
        }

        // Refresh is accepted again after the failure
        fx.app.refresh_dashboard();
        assert!(fx.app.dashboard.is_loading());
        assert_eq!(fx.worker_rx.try_iter().count(), 1);
    }

    #[test]
    fn test_successful_fetch_samples_at_most_configured_size() {
        let mut fx = fixture();
        fx.app.dashboard = Dashboard::Loading;

        let countries: Vec<Country> = (0..20).map(|i| country(&format!("c{i}"))).collect();
        fx.app.apply_fetch_outcome(Ok(countries));

        match &fx.app.dashboard {
            Dashboard::Ready(sample) => assert_eq!(sample.len(), 8),
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[test]
    fn test_small_collection_renders_all_cards() {
        let mut fx = fixture();
        fx.app.dashboard = Dashboard::Loading;

        let countries: Vec<Country> = (0..3).map(|i| country(&format!("c{i}"))).collect();
        fx.app.apply_fetch_outcome(Ok(countries));

        match &fx.app.dashboard {
            Dashboard::Ready(sample) => assert_eq!(sample.len(), 3),
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[test]
    fn test_failure_replaces_previous_cards() {
        let mut fx = fixture();
        fx.app.dashboard = Dashboard::Ready(vec![country("Nigeria")]);

        fx.app
            .apply_fetch_outcome(Err(FetchError::Client("boom".to_string())));

        // No stale cards survive a failed attempt
        assert!(matches!(fx.app.dashboard, Dashboard::Failed(_)));
    }

    #[test]
    fn test_flash_pruned_only_after_fade_completes() {
        use std::time::Duration;

        let mut fx = fixture();
        let ttl =
            fx.app.config.general.flash_duration_ms + fx.app.config.general.flash_fade_ms;

        let flash_aged = |age_ms: u64| FlashMessage {
            level: log::Level::Info,
            message: "Course registered successfully!".to_string(),
            timestamp: Instant::now()
                .checked_sub(Duration::from_millis(age_ms))
                .unwrap(),
        };

        // One fresh, one mid-fade, one past visible + fade
        fx.app.flash_messages.push(flash_aged(0));
        fx.app.flash_messages.push(flash_aged(ttl - 100));
        fx.app.flash_messages.push(flash_aged(ttl + 100));

        fx.app.prune_flash_messages();

        // The fading message survives until its fade completes
        assert_eq!(fx.app.flash_messages.len(), 2);
    }

    #[test]
    fn test_selection_clamped_after_removal() {
        let mut fx = fixture();
        for i in 1..=3 {
            fx.app.book.add(RegistrationDraft::new(
                "Ada Obi",
                format!("LCU/CS/2023/00{i}"),
                format!("CSC10{i}"),
                "Course",
            ));
        }
        fx.app.selected_index = 2;

        fx.app.request_remove_selected();
        fx.app.confirm_pending();

        assert_eq!(fx.app.selected_index, 1);
    }
}
