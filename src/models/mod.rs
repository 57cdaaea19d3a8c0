//! Core data models for the expense tracker
//!
//! Records, the collection that owns them, money amounts and filter specs.

pub mod collection;
pub mod expense;
pub mod filter;
pub mod money;

pub use collection::ExpenseCollection;
pub use expense::{parse_tags, ExpenseDate, ExpenseRecord, FieldSelector};
pub use filter::{DateRange, FilterSpec};
pub use money::Money;
