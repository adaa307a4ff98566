//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.

use std::time::{Duration, Instant};

use crate::config::settings::Settings;
use crate::models::{Expense, Goal, Session};
use crate::planner::MockPlanner;
use crate::storage::Storage;

use super::dialogs::form::FormDialogState;
use super::widgets::TextInput;

/// How long a status message stays visible
const STATUS_TTL: Duration = Duration::from_secs(4);

/// Which view is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Dashboard,
    Goals,
    Planner,
}

impl ActiveView {
    pub const ALL: [ActiveView; 3] = [Self::Dashboard, Self::Goals, Self::Planner];

    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Goals => "Goals",
            Self::Planner => "Planner",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Dashboard => 0,
            Self::Goals => 1,
            Self::Planner => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Mode of input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the planner prompt
    Editing,
}

/// Deletions waiting for a yes/no answer
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmAction {
    DeleteExpense(Expense),
    DeleteGoal(Goal),
}

impl ConfirmAction {
    pub fn message(&self) -> String {
        match self {
            Self::DeleteExpense(expense) => format!("Delete expense '{}'?", expense.name),
            Self::DeleteGoal(goal) => format!("Delete goal '{}'?", goal.name),
        }
    }
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    Help,
    Form,
    Confirm(ConfirmAction),
}

/// A transient message shown in the status bar
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    pub set_at: Instant,
}

/// Main application state
pub struct App<'a> {
    /// The storage layer
    pub storage: &'a Storage,

    /// Application settings
    pub settings: &'a Settings,

    /// Who is using the app
    pub session: &'a Session,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Currently active view
    pub active_view: ActiveView,

    /// Current input mode
    pub input_mode: InputMode,

    /// Currently active dialog
    pub active_dialog: ActiveDialog,

    /// Expenses and goals as of the last refresh
    expenses: Vec<Expense>,
    goals: Vec<Goal>,

    /// Selected row in the expense table
    pub selected_expense_index: usize,

    /// Selected goal
    pub selected_goal_index: usize,

    /// Fields of the open form dialog
    pub form: FormDialogState,

    /// The planner and its prompt
    pub planner: MockPlanner,
    pub planner_input: TextInput,

    /// Status message to display
    pub status: Option<StatusMessage>,

    /// Ticks since startup, drives the planner spinner
    pub tick_count: u64,
}

impl<'a> App<'a> {
    /// Create a new App instance
    pub fn new(storage: &'a Storage, settings: &'a Settings, session: &'a Session) -> Self {
        let mut app = Self {
            storage,
            settings,
            session,
            should_quit: false,
            active_view: ActiveView::default(),
            input_mode: InputMode::default(),
            active_dialog: ActiveDialog::default(),
            expenses: Vec::new(),
            goals: Vec::new(),
            selected_expense_index: 0,
            selected_goal_index: 0,
            form: FormDialogState::default(),
            planner: MockPlanner::new(settings.planner_delay()),
            planner_input: TextInput::new()
                .label("Describe your finances")
                .placeholder("e.g. I earn 40000, rent is 12000 and I want a new phone"),
            status: None,
            tick_count: 0,
        };
        app.refresh();
        app
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: message.into(),
            is_error: false,
            set_at: Instant::now(),
        });
    }

    /// Set an error message
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: message.into(),
            is_error: true,
            set_at: Instant::now(),
        });
    }

    /// Switch to a different view
    pub fn switch_view(&mut self, view: ActiveView) {
        self.active_view = view;
        self.input_mode = InputMode::Normal;
        self.planner_input.focused = false;
    }

    /// Open a dialog
    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        self.active_dialog = dialog;
    }

    /// Open the form dialog with the given fields
    pub fn open_form(&mut self, form: FormDialogState) {
        self.form = form;
        self.active_dialog = ActiveDialog::Form;
    }

    /// Close the current dialog
    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    /// Check if a dialog is active
    pub fn has_dialog(&self) -> bool {
        !matches!(self.active_dialog, ActiveDialog::None)
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// The expense under the cursor
    pub fn selected_expense(&self) -> Option<Expense> {
        self.expenses.get(self.selected_expense_index).cloned()
    }

    /// The goal under the cursor
    pub fn selected_goal(&self) -> Option<Goal> {
        self.goals.get(self.selected_goal_index).cloned()
    }

    /// Move selection up in the current view
    pub fn move_up(&mut self) {
        match self.active_view {
            ActiveView::Dashboard => {
                self.selected_expense_index = self.selected_expense_index.saturating_sub(1);
            }
            ActiveView::Goals => {
                self.selected_goal_index = self.selected_goal_index.saturating_sub(1);
            }
            ActiveView::Planner => {}
        }
    }

    /// Move selection down in the current view
    pub fn move_down(&mut self) {
        match self.active_view {
            ActiveView::Dashboard => {
                let max = self.expenses.len();
                if self.selected_expense_index + 1 < max {
                    self.selected_expense_index += 1;
                }
            }
            ActiveView::Goals => {
                let max = self.goals.len();
                if self.selected_goal_index + 1 < max {
                    self.selected_goal_index += 1;
                }
            }
            ActiveView::Planner => {}
        }
    }

    /// Reload expenses and goals from storage and keep selections in range
    ///
    /// A read failure is shown in the status bar and the previous lists stay
    /// on screen.
    pub fn refresh(&mut self) {
        match self.storage.expenses.get_all() {
            Ok(expenses) => self.expenses = expenses,
            Err(e) => self.set_error(format!("Cannot read expenses: {}", e)),
        }
        match self.storage.goals.get_all() {
            Ok(goals) => self.goals = goals,
            Err(e) => self.set_error(format!("Cannot read goals: {}", e)),
        }

        self.selected_expense_index = self
            .selected_expense_index
            .min(self.expenses.len().saturating_sub(1));
        self.selected_goal_index = self
            .selected_goal_index
            .min(self.goals.len().saturating_sub(1));
    }

    /// Send the planner prompt
    pub fn submit_plan(&mut self, now: Instant) {
        match self.planner.submit(self.planner_input.value(), now) {
            Some(_) => self.set_status("Generating plan..."),
            None => self.set_error("Describe your finances first"),
        }
    }

    /// Advance timers: resolve the planner, pick up outside changes and
    /// expire the status message
    pub fn on_tick(&mut self, now: Instant) {
        self.tick_count = self.tick_count.wrapping_add(1);

        self.refresh();
        if let Some(failure) = self.storage.take_audit_failures().pop() {
            self.set_error(format!("Saved, but the audit log was not updated: {}", failure));
        }

        if self.planner.poll(now).is_some() {
            self.set_status("Plan ready");
        }

        if let Some(status) = &self.status {
            if now.saturating_duration_since(status.set_at) >= STATUS_TTL {
                self.status = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn settings() -> Settings {
        Settings {
            planner_delay_ms: 0,
            ..Settings::default()
        }
    }

    #[test]
    fn test_view_cycle() {
        assert_eq!(ActiveView::Dashboard.next(), ActiveView::Goals);
        assert_eq!(ActiveView::Planner.next(), ActiveView::Dashboard);
        assert_eq!(ActiveView::Dashboard.prev(), ActiveView::Planner);
    }

    #[test]
    fn test_selection_bounds() {
        let storage = Storage::in_memory();
        for name in ["Rent", "Food"] {
            storage
                .expenses
                .push(Expense::new(name, Money::from_units(10)))
                .unwrap();
        }
        let settings = settings();
        let session = Session::anonymous();
        let mut app = App::new(&storage, &settings, &session);

        app.move_down();
        app.move_down();
        assert_eq!(app.selected_expense_index, 1);
        assert_eq!(app.selected_expense().map(|e| e.name), Some("Food".to_string()));

        storage.expenses.remove(app.selected_expense().unwrap().id).unwrap();
        app.refresh();
        assert_eq!(app.selected_expense_index, 0);

        app.move_up();
        assert_eq!(app.selected_expense_index, 0);
    }

    #[test]
    fn test_tick_resolves_planner() {
        let storage = Storage::in_memory();
        let settings = settings();
        let session = Session::anonymous();
        let mut app = App::new(&storage, &settings, &session);

        let now = Instant::now();
        app.submit_plan(now);
        assert!(app.status.as_ref().is_some_and(|s| s.is_error));
        assert!(!app.planner.is_submitting());

        app.planner_input = TextInput::new().content("I earn 30000");
        app.submit_plan(now);
        assert!(app.planner.is_submitting());

        app.on_tick(now);
        assert!(app.planner.result().is_some());
        assert_eq!(app.status.as_ref().map(|s| s.text.as_str()), Some("Plan ready"));
    }

    #[test]
    fn test_status_expires() {
        let storage = Storage::in_memory();
        let settings = settings();
        let session = Session::anonymous();
        let mut app = App::new(&storage, &settings, &session);

        app.set_status("Saved");
        let later = Instant::now() + STATUS_TTL + Duration::from_millis(1);
        app.on_tick(later);
        assert!(app.status.is_none());
    }

    #[test]
    fn test_tick_reports_audit_failure() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let paths = crate::config::paths::FinbotPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(&paths).unwrap();
        std::fs::create_dir(paths.audit_log()).unwrap();
        let settings = settings();
        let session = Session::anonymous();
        let mut app = App::new(&storage, &settings, &session);

        crate::services::LedgerService::new(&storage)
            .add_expense("Rent", "10000")
            .unwrap();
        app.on_tick(Instant::now());

        assert_eq!(app.expenses().len(), 1);
        let status = app.status.as_ref().unwrap();
        assert!(status.is_error);
        assert!(status.text.contains("audit log was not updated"));
    }

    #[test]
    fn test_unreadable_storage_is_reported() {
        let storage = Storage::in_memory();
        storage
            .expenses
            .push(Expense::new("Rent", Money::from_units(10)))
            .unwrap();
        let settings = settings();
        let session = Session::anonymous();
        let mut app = App::new(&storage, &settings, &session);
        assert_eq!(app.expenses().len(), 1);

        storage.expenses.poison_for_test();
        app.refresh();

        let status = app.status.as_ref().unwrap();
        assert!(status.is_error);
        assert!(status.text.starts_with("Cannot read expenses"));
        assert_eq!(app.expenses().len(), 1);
    }
}
