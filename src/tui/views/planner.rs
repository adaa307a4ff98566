//! Planner view
//!
//! A prompt line and the plan it produced

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{App, InputMode};
use crate::tui::layout::PlannerLayout;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Render the planner view
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let layout = PlannerLayout::new(area);

    let editing = app.input_mode == InputMode::Editing;
    let input_block = Block::default()
        .title(" Ask FinBot ")
        .borders(Borders::ALL)
        .border_style(if editing {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        });
    let input_area = input_block.inner(layout.input);
    frame.render_widget(input_block, layout.input);

    app.planner_input.focused = editing;
    frame.render_widget(&app.planner_input, input_area);

    let output_block = Block::default()
        .title(" Your Plan ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let lines = plan_lines(app);
    frame.render_widget(
        Paragraph::new(lines)
            .block(output_block)
            .wrap(Wrap { trim: false }),
        layout.output,
    );
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

fn plan_lines(app: &App) -> Vec<Line<'static>> {
    if app.planner.is_submitting() {
        let frame = SPINNER[(app.tick_count % SPINNER.len() as u64) as usize];
        return vec![Line::from(format!("{} Generating plan...", frame))];
    }

    let Some(plan) = app.planner.result() else {
        return vec![Line::from(Span::styled(
            "Press Enter, describe your income and goals, then press Enter again.",
            Style::default().fg(Color::DarkGray),
        ))];
    };

    let symbol = app.settings.currency_symbol.as_str();
    let mut lines = vec![heading("Budget Breakdown")];
    for line in &plan.budget_breakdown {
        lines.push(Line::from(vec![
            Span::raw(format!("  {:<12}", line.category)),
            Span::styled(
                format!("{:>14}", line.amount.format_with_symbol(symbol)),
                Style::default().fg(Color::Green),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(heading("Goal Timeline"));
    lines.push(Line::from(format!("  {}", plan.goal_timeline)));

    lines.push(Line::from(""));
    lines.push(heading("Tips"));
    for tip in &plan.tips {
        lines.push(Line::from(format!("  - {}", tip)));
    }

    lines
}
