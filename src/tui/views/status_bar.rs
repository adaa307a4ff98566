//! Status bar view
//!
//! Shows savings, the signed-in user, status messages and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::services::LedgerService;
use crate::tui::app::{App, InputMode};

/// Render the status bar
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let totals = LedgerService::new(app.storage).compute_totals().ok();
    let symbol = app.settings.currency_symbol.as_str();

    let mut spans = vec![];

    if let Some(totals) = totals {
        let color = if totals.savings.is_negative() {
            Color::Red
        } else {
            Color::Green
        };
        spans.push(Span::styled(" Savings: ", Style::default().fg(Color::White)));
        spans.push(Span::styled(
            totals.savings.format_with_symbol(symbol),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" │ "));
    }

    spans.push(Span::styled(
        app.session.display_email().to_string(),
        Style::default().fg(Color::Cyan),
    ));

    if let Some(ref status) = app.status {
        let color = if status.is_error {
            Color::Red
        } else {
            Color::Yellow
        };
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(status.text.clone(), Style::default().fg(color)));
    }

    let hints = match app.input_mode {
        InputMode::Editing => " Enter:Submit  Esc:Stop typing ",
        InputMode::Normal => " q:Quit  ?:Help  i:Income ",
    };

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = usize::from(area.width)
        .saturating_sub(left_len)
        .saturating_sub(hints.len());

    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
