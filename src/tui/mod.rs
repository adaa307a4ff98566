//! Terminal User Interface module
//!
//! An interactive dashboard for FinBot built on ratatui: a summary with a
//! bar chart and expense table, savings goal gauges, and the planner prompt.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
