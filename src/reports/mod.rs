//! Reports module for FinBot
//!
//! Read-only views computed from the ledger.

pub mod dashboard;

pub use dashboard::{ChartDataset, ChartPoint, DashboardReport, LedgerTotals};
