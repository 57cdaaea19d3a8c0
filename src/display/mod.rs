//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses and reports for terminal
//! display, including tables and bar hints.

pub mod expense;
pub mod report;

pub use expense::{format_expense_table, format_summary};
