//! Query engine
//!
//! Produces read-only views over a collection. Filtering is stable: the view
//! keeps the collection's order and never re-sorts.

use crate::models::{ExpenseCollection, ExpenseRecord, FilterSpec};

/// A filtered, borrowed, ordered sequence of records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseView<'a> {
    records: Vec<&'a ExpenseRecord>,
}

impl<'a> ExpenseView<'a> {
    /// A view over every record of a collection
    pub fn all(collection: &'a ExpenseCollection) -> Self {
        Self {
            records: collection.iter().collect(),
        }
    }

    pub fn records(&self) -> &[&'a ExpenseRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, &'a ExpenseRecord>> {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Pair each viewed record with its 0-based position in `collection`.
    ///
    /// The view must have been filtered from `collection`; records from
    /// anywhere else are skipped.
    pub fn positions_in(&self, collection: &ExpenseCollection) -> Vec<(usize, &'a ExpenseRecord)> {
        let mut positions = Vec::with_capacity(self.records.len());
        let mut all = collection.iter().enumerate();
        for &record in &self.records {
            if let Some((i, _)) = all.find(|(_, r)| std::ptr::eq(*r, record)) {
                positions.push((i, record));
            }
        }
        positions
    }

    /// Copy the viewed records into an owned collection
    pub fn to_collection(&self) -> ExpenseCollection {
        ExpenseCollection::from_records(self.records.iter().map(|r| (*r).clone()).collect())
    }
}

impl<'v, 'a> IntoIterator for &'v ExpenseView<'a> {
    type Item = &'a ExpenseRecord;
    type IntoIter = std::iter::Copied<std::slice::Iter<'v, &'a ExpenseRecord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter().copied()
    }
}

/// Keep the records that satisfy every constraint of `spec`, in input order
pub fn filter<'a, I>(records: I, spec: &FilterSpec) -> ExpenseView<'a>
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    ExpenseView {
        records: records.into_iter().filter(|r| spec.matches(r)).collect(),
    }
}
