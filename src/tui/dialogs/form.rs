//! Form dialog
//!
//! One dialog drives every data-entry flow: setting income, adding or
//! re-submitting an expense, adding a goal, and updating a goal's saved
//! amount. Input is kept as raw text and handed to the services on submit;
//! a rejected submit keeps the dialog open with the error shown.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::{ExpenseForm, Goal, GoalForm, GoalId, Money};
use crate::services::{GoalService, LedgerService};
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

/// What the form submits to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormKind {
    #[default]
    Income,
    Expense,
    Goal,
    GoalSaved(GoalId),
}

/// State for the form dialog
#[derive(Debug, Clone, Default)]
pub struct FormDialogState {
    pub kind: FormKind,
    pub title: String,
    pub fields: Vec<TextInput>,
    pub focused: usize,
    pub error: Option<String>,
    /// The entry being edited was taken out of the ledger
    pub editing: bool,
}

impl FormDialogState {
    fn with_fields(kind: FormKind, title: impl Into<String>, fields: Vec<TextInput>) -> Self {
        let mut state = Self {
            kind,
            title: title.into(),
            fields,
            focused: 0,
            error: None,
            editing: false,
        };
        state.sync_focus();
        state
    }

    /// Income form, prefilled with the current value when there is one
    pub fn income(current: Money) -> Self {
        let amount = if current.is_zero() {
            String::new()
        } else {
            current.to_string()
        };
        Self::with_fields(
            FormKind::Income,
            "Set Income",
            vec![TextInput::new()
                .label("Income")
                .placeholder("30000")
                .content(amount)],
        )
    }

    /// Expense form loaded from `form`
    pub fn expense(form: &ExpenseForm) -> Self {
        let editing = !form.is_empty();
        let title = if editing { "Edit Expense" } else { "Add Expense" };
        let mut state = Self::with_fields(
            FormKind::Expense,
            title,
            vec![
                TextInput::new()
                    .label("Name")
                    .placeholder("Rent")
                    .content(form.name.clone()),
                TextInput::new()
                    .label("Amount")
                    .placeholder("10000")
                    .content(form.amount.clone()),
            ],
        );
        state.editing = editing;
        state
    }

    pub fn goal() -> Self {
        Self::with_fields(
            FormKind::Goal,
            "Add Goal",
            vec![
                TextInput::new().label("Name").placeholder("iPhone"),
                TextInput::new().label("Target").placeholder("50000"),
                TextInput::new().label("Saved").placeholder("0"),
            ],
        )
    }

    pub fn goal_saved(goal: &Goal) -> Self {
        Self::with_fields(
            FormKind::GoalSaved(goal.id),
            format!("Saved toward {}", goal.name),
            vec![TextInput::new()
                .label("Saved")
                .content(goal.saved.to_string())],
        )
    }

    fn sync_focus(&mut self) {
        let focused = self.focused;
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.focused = i == focused;
        }
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
            self.sync_focus();
        }
    }

    pub fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
            self.sync_focus();
        }
    }

    fn focused_input(&mut self) -> Option<&mut TextInput> {
        self.fields.get_mut(self.focused)
    }

    /// Raw text of field `index`
    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value()).unwrap_or("")
    }

    pub fn is_last_field(&self) -> bool {
        self.focused + 1 >= self.fields.len()
    }
}

/// Render the form dialog
pub fn render(frame: &mut Frame, app: &App) {
    let state = &app.form;
    let height = state.fields.len() as u16 * 2 + 5;
    let area = centered_rect_fixed(56, height, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", state.title))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = Vec::new();
    for _ in &state.fields {
        constraints.push(Constraint::Length(1)); // Input
        constraints.push(Constraint::Length(1)); // Spacer
    }
    constraints.push(Constraint::Length(1)); // Error
    constraints.push(Constraint::Length(1)); // Instructions
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, field) in state.fields.iter().enumerate() {
        frame.render_widget(field, chunks[i * 2]);
    }

    let row = state.fields.len() * 2;
    if let Some(ref error) = state.error {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
            chunks[row],
        );
    }

    let instructions = Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Save  "),
        Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
        Span::raw(" Cancel  "),
        Span::styled("[Tab]", Style::default().fg(Color::Cyan)),
        Span::raw(" Fields"),
    ]);
    frame.render_widget(Paragraph::new(instructions), chunks[row + 1]);
}

/// Handle key events for the form dialog
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            if app.form.editing {
                app.set_error("Edit abandoned; the expense was discarded");
            }
            app.form = FormDialogState::default();
            app.close_dialog();
        }

        KeyCode::Tab | KeyCode::Down => app.form.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.form.prev_field(),

        KeyCode::Enter => {
            if app.form.is_last_field() {
                match submit(app) {
                    Ok(message) => {
                        app.form = FormDialogState::default();
                        app.close_dialog();
                        app.refresh();
                        app.set_status(message);
                    }
                    Err(e) => app.form.error = Some(e),
                }
            } else {
                app.form.next_field();
            }
        }

        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(input) = app.form.focused_input() {
                input.clear();
            }
        }

        KeyCode::Char(c) => {
            if let Some(input) = app.form.focused_input() {
                input.insert(c);
            }
            app.form.error = None;
        }

        KeyCode::Backspace => {
            if let Some(input) = app.form.focused_input() {
                input.backspace();
            }
        }

        KeyCode::Delete => {
            if let Some(input) = app.form.focused_input() {
                input.delete();
            }
        }

        KeyCode::Left => {
            if let Some(input) = app.form.focused_input() {
                input.move_left();
            }
        }

        KeyCode::Right => {
            if let Some(input) = app.form.focused_input() {
                input.move_right();
            }
        }

        KeyCode::Home => {
            if let Some(input) = app.form.focused_input() {
                input.move_start();
            }
        }

        KeyCode::End => {
            if let Some(input) = app.form.focused_input() {
                input.move_end();
            }
        }

        _ => return false,
    }

    true
}

/// Hand the form to its service, returning a status message
fn submit(app: &App) -> Result<String, String> {
    let symbol = app.settings.currency_symbol.as_str();
    let state = &app.form;

    match state.kind {
        FormKind::Income => {
            let income = LedgerService::new(app.storage)
                .set_income(state.value(0))
                .map_err(|e| e.to_string())?;
            Ok(format!("Income set to {}", income.format_with_symbol(symbol)))
        }

        FormKind::Expense => {
            let mut form = ExpenseForm::new(state.value(0), state.value(1));
            let expense = LedgerService::new(app.storage)
                .submit_expense_form(&mut form)
                .map_err(|e| e.to_string())?;
            Ok(format!(
                "Added {} ({})",
                expense.name,
                expense.amount.format_with_symbol(symbol)
            ))
        }

        FormKind::Goal => {
            let mut form = GoalForm::new(state.value(0), state.value(1), state.value(2));
            let goal = GoalService::new(app.storage)
                .submit_goal_form(&mut form)
                .map_err(|e| e.to_string())?;
            Ok(format!("Added goal {}", goal.name))
        }

        FormKind::GoalSaved(id) => {
            let goal = GoalService::new(app.storage)
                .update_saved_text(id, state.value(0))
                .map_err(|e| e.to_string())?
                .ok_or("Goal no longer exists")?;
            Ok(format!("{} is {}% funded", goal.name, goal.progress_percent()))
        }
    }
}
