//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the session.

pub mod config;
pub mod expense;
pub mod filter;
pub mod history;
pub mod report;

pub use config::{handle_config_command, handle_theme_command};
pub use expense::{
    handle_add_command, handle_import_command, handle_list_command, handle_remove_command,
    handle_stats_command, AddArgs,
};
pub use filter::FilterArgs;
pub use history::handle_history_command;
pub use report::{handle_report_command, ReportArgs};
