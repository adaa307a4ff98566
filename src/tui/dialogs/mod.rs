//! Dialog widgets for the TUI

pub mod confirm;
pub mod form;
pub mod help;
