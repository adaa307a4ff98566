//! FinBot - personal finance tracking from the terminal
//!
//! This library provides the core functionality for FinBot: an income figure,
//! an expense ledger with derived totals, savings goals with progress, a
//! placeholder planner that answers free-text questions with a canned plan,
//! and a contact form with a simulated submission.
//! Everything is kept in a local key-value store and mirrored there on every
//! change.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, expenses, goals, forms, session)
//! - `storage`: Key-value persistence and repositories
//! - `audit`: Audit logging system
//! - `services`: Business logic layer
//! - `reports`: Derived totals and chart data
//! - `planner`: The delayed mock planner
//! - `contact`: The contact form and its simulated submission
//! - `display`: Plain-text formatting for the CLI
//! - `cli`: Command handlers
//! - `tui`: Interactive terminal interface
//!
//! # Example
//!
//! ```rust,ignore
//! use finbot::config::{paths::FinbotPaths, settings::Settings};
//! use finbot::services::LedgerService;
//! use finbot::storage::Storage;
//!
//! let paths = FinbotPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(&paths)?;
//! storage.load_all()?;
//!
//! let ledger = LedgerService::new(&storage);
//! ledger.set_income("30000")?;
//! ledger.add_expense("Rent", "10000")?;
//! let totals = ledger.compute_totals()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod contact;
pub mod display;
pub mod error;
pub mod models;
pub mod planner;
pub mod reports;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::{FinbotError, FinbotResult};
