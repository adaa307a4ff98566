//! Help dialog
//!
//! Shows contextual keyboard shortcuts

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{ActiveView, App};
use crate::tui::layout::centered_rect;

/// Render the help dialog
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 70, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(get_help_lines(app))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Get help lines for the current context
fn get_help_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = vec![
        section("Global Keys"),
        Line::from(""),
        key_line("q", "Quit application"),
        key_line("?", "Show/hide help"),
        key_line("Tab / l", "Next tab"),
        key_line("S-Tab / h", "Previous tab"),
        key_line("1 2 3", "Dashboard, Goals, Planner"),
        key_line("i", "Set income"),
        Line::from(""),
    ];

    match app.active_view {
        ActiveView::Dashboard => {
            lines.push(section("Dashboard"));
            lines.push(Line::from(""));
            lines.push(key_line("j/k", "Move selection"));
            lines.push(key_line("a", "Add expense"));
            lines.push(key_line("e", "Edit expense (removed until resubmitted)"));
            lines.push(key_line("d", "Delete expense"));
        }
        ActiveView::Goals => {
            lines.push(section("Goals"));
            lines.push(Line::from(""));
            lines.push(key_line("j/k", "Move selection"));
            lines.push(key_line("a", "Add goal"));
            lines.push(key_line("s / Enter", "Update saved amount"));
            lines.push(key_line("d", "Delete goal"));
        }
        ActiveView::Planner => {
            lines.push(section("Planner"));
            lines.push(Line::from(""));
            lines.push(key_line("Enter / e", "Type a prompt"));
            lines.push(key_line("Enter", "Submit while typing"));
            lines.push(key_line("Esc", "Stop typing"));
            lines.push(key_line("c", "Cancel pending plan"));
        }
    }

    lines
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(vec![Span::styled(
        title,
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Yellow),
    )])
}

fn key_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>12}", key), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::raw(desc),
    ])
}
