//! Business logic layer
//!
//! Read-only queries over the record store.

pub mod query;

pub use query::{filter, ExpenseView};
