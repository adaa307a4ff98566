//! Confirmation dialog
//!
//! Simple yes/no confirmation before a deletion

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::services::{GoalService, LedgerService};
use crate::tui::app::{ActiveDialog, App, ConfirmAction};
use crate::tui::layout::centered_rect_fixed;

/// Render a confirmation dialog
pub fn render(frame: &mut Frame, message: &str) {
    let area = centered_rect_fixed(50, 7, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Confirm ")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Y]", Style::default().fg(Color::Green)),
            Span::raw(" Yes  "),
            Span::styled("[N]", Style::default().fg(Color::Red)),
            Span::raw(" No  "),
            Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
            Span::raw(" Cancel"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Handle key events for the confirmation dialog
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    let ActiveDialog::Confirm(action) = app.active_dialog.clone() else {
        return false;
    };

    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            app.close_dialog();
            match perform(app, &action) {
                Ok(message) => app.set_status(message),
                Err(e) => app.set_error(e),
            }
            app.refresh();
            true
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.close_dialog();
            true
        }
        _ => false,
    }
}

fn perform(app: &App, action: &ConfirmAction) -> Result<String, String> {
    match action {
        ConfirmAction::DeleteExpense(expense) => {
            LedgerService::new(app.storage)
                .delete_expense(expense.id)
                .map_err(|e| e.to_string())?;
            Ok(format!("Deleted expense {}", expense.name))
        }
        ConfirmAction::DeleteGoal(goal) => {
            GoalService::new(app.storage)
                .delete_goal(goal.id)
                .map_err(|e| e.to_string())?;
            Ok(format!("Deleted goal {}", goal.name))
        }
    }
}
