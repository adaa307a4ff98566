//! Event handler for the TUI
//!
//! Routes keyboard events and ticks to the appropriate handlers
//! based on the current application state.

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::models::ExpenseForm;
use crate::services::LedgerService;

use super::app::{ActiveDialog, ActiveView, App, ConfirmAction, InputMode};
use super::dialogs;
use super::dialogs::form::FormDialogState;
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick => {
            app.on_tick(Instant::now());
            Ok(())
        }
        Event::Mouse(_) | Event::Resize(_, _) => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    // Windows reports releases as well as presses
    if key.kind == KeyEventKind::Release {
        return Ok(());
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return Ok(());
    }

    if app.has_dialog() {
        handle_dialog_key(app, key);
        return Ok(());
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Editing => handle_editing_key(app, key),
    }
}

fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    match app.active_dialog {
        ActiveDialog::Help => {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Enter
            ) {
                app.close_dialog();
            }
        }
        ActiveDialog::Form => {
            dialogs::form::handle_key(app, key);
        }
        ActiveDialog::Confirm(_) => {
            dialogs::confirm::handle_key(app, key);
        }
        ActiveDialog::None => {}
    }
}

/// Handle keys in normal mode
fn handle_normal_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.quit();
            return Ok(());
        }
        KeyCode::Char('?') => {
            app.open_dialog(ActiveDialog::Help);
            return Ok(());
        }
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
            app.switch_view(app.active_view.next());
            return Ok(());
        }
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
            app.switch_view(app.active_view.prev());
            return Ok(());
        }
        KeyCode::Char('1') => {
            app.switch_view(ActiveView::Dashboard);
            return Ok(());
        }
        KeyCode::Char('2') => {
            app.switch_view(ActiveView::Goals);
            return Ok(());
        }
        KeyCode::Char('3') => {
            app.switch_view(ActiveView::Planner);
            return Ok(());
        }
        KeyCode::Char('i') => {
            let current = app.storage.income.get()?;
            app.open_form(FormDialogState::income(current));
            return Ok(());
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_down();
            return Ok(());
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_up();
            return Ok(());
        }
        _ => {}
    }

    match app.active_view {
        ActiveView::Dashboard => handle_dashboard_key(app, key),
        ActiveView::Goals => handle_goals_key(app, key),
        ActiveView::Planner => handle_planner_key(app, key),
    }
}

fn handle_dashboard_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('a') | KeyCode::Char('n') => {
            app.open_form(FormDialogState::expense(&ExpenseForm::default()));
        }
        KeyCode::Char('e') => {
            if let Some(expense) = app.selected_expense() {
                let mut form = ExpenseForm::default();
                LedgerService::new(app.storage).begin_edit_expense(expense.id, &mut form)?;
                app.refresh();
                app.open_form(FormDialogState::expense(&form));
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(expense) = app.selected_expense() {
                app.open_dialog(ActiveDialog::Confirm(ConfirmAction::DeleteExpense(expense)));
            }
        }
        _ => {}
    }

    Ok(())
}

fn handle_goals_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('a') | KeyCode::Char('n') => {
            app.open_form(FormDialogState::goal());
        }
        KeyCode::Char('s') | KeyCode::Enter => {
            if let Some(goal) = app.selected_goal() {
                app.open_form(FormDialogState::goal_saved(&goal));
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(goal) = app.selected_goal() {
                app.open_dialog(ActiveDialog::Confirm(ConfirmAction::DeleteGoal(goal)));
            }
        }
        _ => {}
    }

    Ok(())
}

fn handle_planner_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Enter | KeyCode::Char('e') => {
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Char('c') => {
            if app.planner.cancel() {
                app.set_status("Plan cancelled");
            }
        }
        _ => {}
    }

    Ok(())
}

/// Handle keys while typing into the planner prompt
fn handle_editing_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Enter => {
            app.submit_plan(Instant::now());
            if app.planner.is_submitting() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.planner_input.clear();
        }
        KeyCode::Char(c) => app.planner_input.insert(c),
        KeyCode::Backspace => app.planner_input.backspace(),
        KeyCode::Delete => app.planner_input.delete(),
        KeyCode::Left => app.planner_input.move_left(),
        KeyCode::Right => app.planner_input.move_right(),
        KeyCode::Home => app.planner_input.move_start(),
        KeyCode::End => app.planner_input.move_end(),
        _ => {}
    }

    Ok(())
}
