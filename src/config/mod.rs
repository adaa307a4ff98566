//! Configuration module for FinBot
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::FinbotPaths;
pub use settings::Settings;
