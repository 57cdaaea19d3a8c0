//! Filter criteria for views
//!
//! `None` on any field means "no constraint". An empty set is a real
//! constraint that matches nothing; the two must never be conflated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::expense::{ExpenseDate, ExpenseRecord};

/// Inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// An inverted range (`from > to`) is allowed and matches nothing
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }

    /// Invalid dates are never inside any range
    pub fn contains_expense_date(&self, date: &ExpenseDate) -> bool {
        date.valid().is_some_and(|d| self.contains(d))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub date_range: Option<DateRange>,
    pub categories: Option<BTreeSet<String>>,
    pub subcategories: Option<BTreeSet<String>>,
    pub payment_methods: Option<BTreeSet<String>>,
}

impl FilterSpec {
    /// A spec with no constraints
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_date_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.date_range = Some(DateRange::new(from, to));
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_subcategories<I, S>(mut self, subcategories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subcategories = Some(subcategories.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_payment_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.payment_methods = Some(methods.into_iter().map(Into::into).collect());
        self
    }

    /// Whether no field carries a constraint
    pub fn is_unconstrained(&self) -> bool {
        self.date_range.is_none()
            && self.categories.is_none()
            && self.subcategories.is_none()
            && self.payment_methods.is_none()
    }

    /// Whether a record passes every non-`None` constraint
    pub fn matches(&self, record: &ExpenseRecord) -> bool {
        if let Some(range) = &self.date_range {
            if !range.contains_expense_date(&record.date) {
                return false;
            }
        }
        set_matches(&self.categories, &record.category)
            && set_matches(&self.subcategories, &record.subcategory)
            && set_matches(&self.payment_methods, &record.payment_method)
    }
}

fn set_matches(allowed: &Option<BTreeSet<String>>, value: &str) -> bool {
    match allowed {
        None => true,
        Some(set) => set.contains(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn test_range_is_inclusive() {
        let range = DateRange::new(date(1, 1), date(1, 31));
        assert!(range.contains(date(1, 1)));
        assert!(range.contains(date(1, 31)));
        assert!(!range.contains(date(2, 1)));
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let range = DateRange::new(date(2, 1), date(1, 1));
        assert!(!range.contains(date(1, 15)));
    }

    #[test]
    fn test_invalid_date_never_in_range() {
        let range = DateRange::new(date(1, 1), date(12, 31));
        assert!(!range.contains_expense_date(&ExpenseDate::Invalid("soon".into())));
    }

    #[test]
    fn test_unconstrained_matches_everything() {
        let record = ExpenseRecord::new(ExpenseDate::Invalid(String::new()), "", Money::zero());
        assert!(FilterSpec::all().is_unconstrained());
        assert!(FilterSpec::all().matches(&record));
    }

    #[test]
    fn test_empty_set_matches_nothing() {
        let record = ExpenseRecord::new(date(1, 5), "Food", Money::from_cents(100));
        let spec = FilterSpec::all().with_categories(Vec::<String>::new());
        assert!(!spec.is_unconstrained());
        assert!(!spec.matches(&record));
    }

    #[test]
    fn test_all_fields_must_match() {
        let record = ExpenseRecord::new(date(1, 5), "Food", Money::from_cents(100))
            .with_payment_method("Cash");

        let spec = FilterSpec::all()
            .with_categories(["Food"])
            .with_payment_methods(["Card"]);
        assert!(!spec.matches(&record));

        let spec = FilterSpec::all()
            .with_categories(["Food", "Rent"])
            .with_payment_methods(["Card", "Cash"])
            .with_date_range(date(1, 5), date(1, 5));
        assert!(spec.matches(&record));
    }
}
