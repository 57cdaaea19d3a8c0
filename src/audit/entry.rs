//! Audit entry data structures
//!
//! Defines the operations that change the collection and the entry format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ExpenseRecord;

/// Operations that change the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// A record was appended
    Append,
    /// A record was removed
    Remove,
    /// The whole collection was replaced by another source
    Replace,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Append => write!(f, "APPEND"),
            Operation::Remove => write!(f, "REMOVE"),
            Operation::Replace => write!(f, "REPLACE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// 1-based row the operation applied to (append and remove)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,

    /// The appended or removed record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<serde_json::Value>,

    /// Source the collection was replaced with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Collection size after the operation
    pub rows_after: usize,
}

impl AuditEntry {
    /// Entry for a record appended at `row` (1-based)
    pub fn append(row: usize, record: &ExpenseRecord, rows_after: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Append,
            row: Some(row),
            record: serde_json::to_value(record).ok(),
            source: None,
            rows_after,
        }
    }

    /// Entry for a record removed from `row` (1-based)
    pub fn remove(row: usize, record: &ExpenseRecord, rows_after: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Remove,
            row: Some(row),
            record: serde_json::to_value(record).ok(),
            source: None,
            rows_after,
        }
    }

    /// Entry for the collection being replaced by `source`
    pub fn replace(source: impl Into<String>, rows_after: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Replace,
            row: None,
            record: None,
            source: Some(source.into()),
            rows_after,
        }
    }

    /// The logged record, if it can still be read as one
    pub fn expense(&self) -> Option<ExpenseRecord> {
        self.record
            .as_ref()
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation
        );

        if let Some(row) = self.row {
            output.push_str(&format!(" row {}", row));
        }
        if let Some(record) = self.expense() {
            output.push_str(&format!(
                " ({} {} on {})",
                record.category, record.amount, record.date
            ));
        }
        if let Some(source) = &self.source {
            output.push_str(&format!(" from {}", source));
        }
        output.push_str(&format!(" -> {} rows", self.rows_after));

        output
    }
}
