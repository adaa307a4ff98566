//! Dashboard view
//!
//! Totals, the income/expenses/savings bar chart, and the expense table

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::models::Money;
use crate::reports::{ChartDataset, DashboardReport, LedgerTotals};
use crate::tui::app::App;
use crate::tui::layout::DashboardLayout;

/// Render the dashboard view
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let report = match DashboardReport::generate(app.storage) {
        Ok(report) => report,
        Err(e) => {
            frame.render_widget(
                Paragraph::new(format!("Could not load ledger: {}", e))
                    .style(Style::default().fg(Color::Red)),
                area,
            );
            return;
        }
    };

    let layout = DashboardLayout::new(area);
    let symbol = app.settings.currency_symbol.as_str();

    render_totals(frame, app, &report.totals, symbol, layout.totals);
    render_chart(frame, &report.chart, symbol, layout.chart);
    render_expense_table(frame, app, &report, symbol, layout.expenses);
}

fn savings_color(savings: Money) -> Color {
    if savings.is_negative() {
        Color::Red
    } else {
        Color::Green
    }
}

fn render_totals(frame: &mut Frame, app: &App, totals: &LedgerTotals, symbol: &str, area: Rect) {
    let label = Style::default().fg(Color::Yellow);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Hello, ", Style::default().fg(Color::White)),
            Span::styled(
                app.session.display_email().to_string(),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Income:    ", label),
            Span::raw(totals.income.format_with_symbol(symbol)),
        ]),
        Line::from(vec![
            Span::styled("Expenses:  ", label),
            Span::raw(totals.total_expenses.format_with_symbol(symbol)),
        ]),
        Line::from(vec![
            Span::styled("Savings:   ", label),
            Span::styled(
                totals.savings.format_with_symbol(symbol),
                Style::default()
                    .fg(savings_color(totals.savings))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    if let Some(rate) = totals.savings_rate() {
        lines.push(Line::from(vec![
            Span::styled("Rate:      ", label),
            Span::raw(format!("{:.1}%", rate * 100.0)),
        ]));
    }

    let block = Block::default()
        .title(" Summary ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Whole units for a bar; negative values draw as empty bars
fn bar_value(value: Money) -> u64 {
    u64::try_from(value.units()).unwrap_or(0)
}

fn render_chart(frame: &mut Frame, chart: &ChartDataset, symbol: &str, area: Rect) {
    let colors = [Color::Blue, Color::Red, Color::Green];

    let bars: Vec<Bar> = chart
        .points
        .iter()
        .zip(colors)
        .map(|(point, color)| {
            Bar::default()
                .label(Line::from(point.label))
                .value(bar_value(point.value))
                .text_value(point.value.format_with_symbol(symbol))
                .style(Style::default().fg(color))
        })
        .collect();

    let block = Block::default()
        .title(format!(" Overview (step {}{}) ", symbol, chart.step_size))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let bar_width = (area.width.saturating_sub(2) / 3).saturating_sub(2).clamp(3, 16);

    let widget = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(2)
        .max(bar_value(chart.max_value()).max(1));

    frame.render_widget(widget, area);
}

fn render_expense_table(
    frame: &mut Frame,
    app: &App,
    report: &DashboardReport,
    symbol: &str,
    area: Rect,
) {
    let block = Block::default()
        .title(format!(" Expenses ({}) ", report.expenses.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if report.expenses.is_empty() {
        let hint = Paragraph::new("No expenses yet. Press 'a' to add one.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Name"),
        Cell::from(Line::from("Amount").right_aligned()),
        Cell::from("Added"),
    ])
    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let rows = report.expenses.iter().map(|expense| {
        let amount_style = if expense.amount.is_negative() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::White)
        };
        Row::new(vec![
            Cell::from(expense.name.clone()),
            Cell::from(
                Line::from(expense.amount.format_with_symbol(symbol)).right_aligned(),
            )
            .style(amount_style),
            Cell::from(expense.created_at.format("%Y-%m-%d").to_string()),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Min(16),
            Constraint::Length(16),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(block)
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("> ");

    let mut state = TableState::default().with_selected(Some(app.selected_expense_index));
    frame.render_stateful_widget(table, area, &mut state);
}
