//! Goals view
//!
//! One progress gauge per savings goal

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::models::Goal;
use crate::tui::app::App;

const GAUGE_HEIGHT: u16 = 3;

/// Render the goals view
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let goals = app.goals();

    let block = Block::default()
        .title(format!(" Savings Goals ({}) ", goals.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if goals.is_empty() {
        frame.render_widget(
            Paragraph::new("No goals yet. Press 'a' to add one.")
                .style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let visible = usize::from((inner.height / GAUGE_HEIGHT).max(1));
    let offset = first_visible(app.selected_goal_index, visible);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(GAUGE_HEIGHT); visible])
        .split(inner);

    let symbol = app.settings.currency_symbol.as_str();
    for (slot, (index, goal)) in goals.iter().enumerate().skip(offset).take(visible).enumerate() {
        let selected = index == app.selected_goal_index;
        frame.render_widget(goal_gauge(goal, symbol, selected), chunks[slot]);
    }
}

/// First goal to draw so the selected one stays on screen
fn first_visible(selected: usize, visible: usize) -> usize {
    (selected + 1).saturating_sub(visible)
}

fn goal_gauge(goal: &Goal, symbol: &str, selected: bool) -> Gauge<'static> {
    let percent = goal.progress_percent();
    let color = if goal.is_complete() {
        Color::Green
    } else {
        Color::Blue
    };

    let border_style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let title = format!(
        " {}: {} / {} ",
        goal.name,
        goal.saved.format_with_symbol(symbol),
        goal.target.format_with_symbol(symbol)
    );

    Gauge::default()
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .percent(u16::from(percent))
        .label(format!("{}%", percent))
}
