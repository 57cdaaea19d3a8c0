//! Expense Tracker - filter, aggregate and summarize personal expense records
//!
//! Expense records are loaded from a CSV table into a collection that stays
//! unchanged until it is explicitly appended to or replaced. Everything a
//! dashboard shows is derived from a filtered view of that collection.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Records, money amounts, the collection and filter specs
//! - `storage`: CSV loading and atomic saving, the record store
//! - `services`: The query engine producing filtered views
//! - `reports`: Grouped sums, the month/day pivot, summary metrics, dashboard
//! - `display`: Terminal tables and bars
//! - `export`: CSV, JSON and YAML dashboard exports
//! - `audit`: Audit log of appends, removals and replacements
//! - `config`: Paths and user settings
//! - `session`: Application state for one run
//! - `cli`: Command handlers for the `expenses` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::models::{FieldSelector, FilterSpec};
//! use expense_tracker::reports::{group_sum, summarize};
//! use expense_tracker::services::filter;
//! use expense_tracker::storage::load_file;
//!
//! let collection = load_file("expenses.csv")?;
//! let view = filter(&collection, &FilterSpec::all().with_payment_methods(["Card"]));
//! let by_category = group_sum(&view, &[FieldSelector::Category])?;
//! let stats = summarize(&view);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod log;
pub mod models;
pub mod reports;
pub mod services;
pub mod session;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
