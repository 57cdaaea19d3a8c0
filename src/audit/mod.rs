//! Audit trail for the expense collection
//!
//! Every append, remove and replace performed through a session is recorded
//! as one JSON line in an append-only log, so the history of the data file
//! can be reconstructed.
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::append(12, &record, 12))?;
//!
//! for entry in logger.read_recent(5)? {
//!     println!("{}", entry.format_human_readable());
//! }
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
