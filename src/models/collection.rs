//! Ordered collection of expense records
//!
//! Insertion order is load/append order and is never re-sorted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::expense::{ExpenseRecord, FieldSelector};
use crate::error::{ExpenseError, ExpenseResult};

/// The canonical, unfiltered set of records for a session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseCollection {
    records: Vec<ExpenseRecord>,
}

impl ExpenseCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from already-validated rows (used by loaders)
    pub(crate) fn from_records(records: Vec<ExpenseRecord>) -> Self {
        Self { records }
    }

    /// Normalize, validate and append a record at the end.
    ///
    /// The collection is unchanged when validation fails.
    pub fn append(&mut self, record: ExpenseRecord) -> ExpenseResult<()> {
        let record = record.normalized();
        record.validate()?;
        self.records.push(record);
        Ok(())
    }

    /// Remove the record at `index` (0-based), returning it
    pub fn remove(&mut self, index: usize) -> ExpenseResult<ExpenseRecord> {
        if index >= self.records.len() {
            return Err(ExpenseError::record_not_found(format!(
                "row {} (collection has {} rows)",
                index + 1,
                self.records.len()
            )));
        }
        Ok(self.records.remove(index))
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExpenseRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ExpenseRecord> {
        self.records.get(index)
    }

    /// Earliest and latest valid dates, used to seed a date-range picker
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.records.iter().filter_map(|r| r.date.valid());
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    /// Sorted distinct non-empty values of a field, used for select options
    pub fn distinct_values(&self, field: FieldSelector) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.field(field))
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of records whose date did not parse
    pub fn invalid_date_count(&self) -> usize {
        self.records.iter().filter(|r| !r.date.is_valid()).count()
    }
}

impl<'a> IntoIterator for &'a ExpenseCollection {
    type Item = &'a ExpenseRecord;
    type IntoIter = std::slice::Iter<'a, ExpenseRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseDate, Money};

    fn record(day: u32, category: &str, cents: i64) -> ExpenseRecord {
        ExpenseRecord::new(
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            category,
            Money::from_cents(cents),
        )
    }

    #[test]
    fn test_append_preserves_order() {
        let mut collection = ExpenseCollection::new();
        collection.append(record(10, "Food", 100)).unwrap();
        collection.append(record(2, "Rent", 200)).unwrap();

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.records()[0].category, "Food");
        assert_eq!(collection.records()[1].category, "Rent");
    }

    #[test]
    fn test_append_rejects_negative() {
        let mut collection = ExpenseCollection::new();
        collection.append(record(1, "Food", 100)).unwrap();

        let err = collection.append(record(2, "Food", -500)).unwrap_err();
        assert!(err.is_invalid_record());
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_append_normalizes() {
        let mut collection = ExpenseCollection::new();
        let mut untidy = record(1, "Food", 100);
        untidy.category = " Food ".to_string();
        untidy.tags = vec!["a,b".to_string()];
        collection.append(untidy).unwrap();

        let stored = &collection.records()[0];
        assert_eq!(stored.category, "Food");
        assert_eq!(stored.tags, vec!["a".to_string(), "b".to_string()]);

        let mut blank = record(2, "Food", 100);
        blank.category = "   ".to_string();
        assert!(collection.append(blank).unwrap_err().is_invalid_record());
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut collection = ExpenseCollection::from_records(vec![
            record(1, "Food", 100),
            record(2, "Rent", 200),
        ]);

        let removed = collection.remove(0).unwrap();
        assert_eq!(removed.category, "Food");
        assert_eq!(collection.len(), 1);
        assert!(collection.remove(5).unwrap_err().is_not_found());
    }

    #[test]
    fn test_date_bounds_skip_invalid() {
        let collection = ExpenseCollection::from_records(vec![
            record(10, "Food", 100),
            ExpenseRecord::new(ExpenseDate::parse("garbage"), "Food", Money::zero()),
            record(3, "Rent", 200),
            record(21, "Fun", 300),
        ]);

        let (lo, hi) = collection.date_bounds().unwrap();
        assert_eq!(lo, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(hi, NaiveDate::from_ymd_opt(2024, 1, 21).unwrap());
        assert_eq!(collection.invalid_date_count(), 1);
    }

    #[test]
    fn test_date_bounds_empty() {
        assert_eq!(ExpenseCollection::new().date_bounds(), None);
    }

    #[test]
    fn test_distinct_values_sorted() {
        let collection = ExpenseCollection::from_records(vec![
            record(1, "Transport", 100),
            record(2, "Food", 200),
            record(3, "Transport", 300),
        ]);

        assert_eq!(
            collection.distinct_values(FieldSelector::Category),
            vec!["Food".to_string(), "Transport".to_string()]
        );
        assert!(collection
            .distinct_values(FieldSelector::PaymentMethod)
            .is_empty());
    }
}
