//! Custom error types for the expense tracker
//!
//! Structural failures (unreadable source, missing columns, rejected records)
//! are distinct variants so callers can show a specific message. Soft
//! conditions such as unparsable dates never reach this type; they are kept
//! as sentinels on the record instead.

use thiserror::Error;

/// The main error type for expense tracker operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// The data source could not be opened or read at all
    #[error("Source unavailable: {source_name}: {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    /// Required columns are absent from the input header
    #[error("Schema error: missing required column(s): {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    /// A record was rejected (negative amount, unusable amount text, ...)
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ExpenseError {
    /// Create a "source unavailable" error
    pub fn source_unavailable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a "not found" error for a record position
    pub fn record_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a schema error
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }

    /// Check if this is an unreadable-source error
    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. })
    }

    /// Check if this is a rejected-record error
    pub fn is_invalid_record(&self) -> bool {
        matches!(self, Self::InvalidRecord(_))
    }
}

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for expense tracker operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExpenseError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_schema_error_lists_columns() {
        let err = ExpenseError::Schema {
            missing: vec!["Date".into(), "Amount".into()],
        };
        assert_eq!(
            err.to_string(),
            "Schema error: missing required column(s): Date, Amount"
        );
        assert!(err.is_schema());
    }

    #[test]
    fn test_source_unavailable() {
        let err = ExpenseError::source_unavailable("expenses.csv", "No such file");
        assert_eq!(
            err.to_string(),
            "Source unavailable: expenses.csv: No such file"
        );
        assert!(err.is_source_unavailable());
    }

    #[test]
    fn test_not_found_error() {
        let err = ExpenseError::record_not_found("row 7");
        assert_eq!(err.to_string(), "Expense not found: row 7");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ExpenseError = io_err.into();
        assert!(matches!(err, ExpenseError::Io(_)));
    }
}
