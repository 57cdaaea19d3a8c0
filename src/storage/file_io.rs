//! File I/O for expense tables with atomic writes
//!
//! Saving never leaves a half-written data file behind: rows are written to a
//! sibling temp file, synced, then renamed over the target.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use super::csv_io::{read_expenses, write_expenses};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseCollection, ExpenseRecord};

/// Load an expense table from a CSV file
pub fn load_file<P: AsRef<Path>>(path: P) -> ExpenseResult<ExpenseCollection> {
    let path = path.as_ref();
    let name = path.display().to_string();

    let file = File::open(path).map_err(|e| ExpenseError::source_unavailable(&name, e))?;
    read_expenses(BufReader::new(file), &name)
}

/// Write records to a CSV file atomically (write to temp, then rename)
pub fn save_atomic<'a, P, I>(path: P, records: I) -> ExpenseResult<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            ExpenseError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = path.with_extension("csv.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| ExpenseError::Io(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    write_expenses(&mut writer, records)?;

    writer
        .flush()
        .map_err(|e| ExpenseError::Io(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| ExpenseError::Io(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        ExpenseError::Io(format!("Failed to rename temp file: {}", e))
    })?;

    debug!(path = %path.display(), "saved expenses");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample() -> ExpenseCollection {
        let mut collection = ExpenseCollection::new();
        collection
            .append(
                ExpenseRecord::new(
                    NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                    "Food",
                    Money::from_cents(2000),
                )
                .with_payment_method("Card"),
            )
            .unwrap();
        collection
    }

    #[test]
    fn test_missing_file_is_source_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_file(temp_dir.path().join("nope.csv")).unwrap_err();
        assert!(err.is_source_unavailable());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.csv");

        let collection = sample();
        save_atomic(&path, &collection).unwrap();

        let loaded = load_file(&path).unwrap();
        assert_eq!(loaded, collection);
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.csv");

        save_atomic(&path, &sample()).unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join("expenses.csv.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("expenses.csv");

        save_atomic(&path, &sample()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_save_empty_collection_writes_header() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.csv");

        save_atomic(&path, &ExpenseCollection::new()).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Date,Category"));
        assert!(load_file(&path).unwrap().is_empty());
    }
}
