//! Expense record model
//!
//! One row of the expense table. Records are never edited in place once they
//! are part of a collection; an edit is a remove followed by an append.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;
use crate::error::{ExpenseError, ExpenseResult};

/// Date formats tried, in order, when coercing the `Date` column
const DATE_FORMATS: [&str; 9] = [
    "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m/%d/%y", "%d/%m/%Y", "%d/%m/%y", "%m-%d-%Y",
    "%d-%m-%Y", "%d.%m.%Y",
];

/// Timestamp formats whose date part is kept (time-of-day is dropped)
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// The date of an expense, or the sentinel for text that did not parse.
///
/// Invalid dates keep their original text so the row can be written back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum ExpenseDate {
    Valid(NaiveDate),
    Invalid(String),
}

impl ExpenseDate {
    /// Best-effort parse; never fails
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();

        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return Self::Valid(date);
            }
        }
        for format in DATETIME_FORMATS {
            if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Self::Valid(datetime.date());
            }
        }
        if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
            return Self::Valid(datetime.date_naive());
        }

        Self::Invalid(trimmed.to_string())
    }

    /// The calendar date, if valid
    pub fn valid(&self) -> Option<NaiveDate> {
        match self {
            Self::Valid(date) => Some(*date),
            Self::Invalid(_) => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Render with a strftime format; invalid dates render as their raw text.
    ///
    /// A malformed format string falls back to ISO.
    pub fn format(&self, format: &str) -> String {
        use std::fmt::Write;

        match self {
            Self::Valid(date) => {
                let mut out = String::new();
                match write!(out, "{}", date.format(format)) {
                    Ok(()) => out,
                    Err(_) => date.format("%Y-%m-%d").to_string(),
                }
            }
            Self::Invalid(raw) => raw.clone(),
        }
    }
}

impl From<NaiveDate> for ExpenseDate {
    fn from(date: NaiveDate) -> Self {
        Self::Valid(date)
    }
}

impl fmt::Display for ExpenseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Invalid(raw) if raw.is_empty() => write!(f, "(no date)"),
            Self::Invalid(raw) => write!(f, "{} (invalid)", raw),
        }
    }
}

/// A single expense entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub date: ExpenseDate,
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    /// Always non-negative for records accepted into a collection
    pub amount: Money,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ExpenseRecord {
    /// Create a record with the required fields; optional fields start empty
    pub fn new(date: impl Into<ExpenseDate>, category: impl Into<String>, amount: Money) -> Self {
        Self {
            date: date.into(),
            category: clean_label(category.into()),
            subcategory: String::new(),
            amount,
            payment_method: String::new(),
            description: String::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = clean_label(subcategory.into());
        self
    }

    pub fn with_payment_method(mut self, payment_method: impl Into<String>) -> Self {
        self.payment_method = clean_label(payment_method.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into().trim().to_string();
        self
    }

    /// Set the tags. Values containing commas are split into separate tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined: Vec<String> = tags.into_iter().map(|t| t.as_ref().to_string()).collect();
        self.tags = parse_tags(&joined.join(","));
        self
    }

    /// The record as it reads back from a saved table: labels and the
    /// description trimmed, tags split on commas and deduplicated, and an
    /// invalid date re-parsed from its raw text
    pub fn normalized(self) -> Self {
        let date = match self.date {
            ExpenseDate::Invalid(raw) => ExpenseDate::parse(&raw),
            valid => valid,
        };
        Self {
            date,
            category: clean_label(self.category),
            subcategory: clean_label(self.subcategory),
            amount: self.amount,
            payment_method: clean_label(self.payment_method),
            description: self.description.trim().to_string(),
            tags: parse_tags(&self.tags.join(",")),
        }
    }

    /// The value of one grouping field
    pub fn field(&self, selector: FieldSelector) -> &str {
        match selector {
            FieldSelector::Category => &self.category,
            FieldSelector::Subcategory => &self.subcategory,
            FieldSelector::PaymentMethod => &self.payment_method,
        }
    }

    /// Tags joined the way they are stored in the `Tags` column
    pub fn tags_text(&self) -> String {
        self.tags.join(", ")
    }

    /// Check the invariants required before a record may be appended
    pub fn validate(&self) -> ExpenseResult<()> {
        if self.amount.is_negative() {
            return Err(ExpenseError::InvalidRecord(format!(
                "amount must not be negative (got {})",
                self.amount
            )));
        }
        if self.amount > Money::MAX_AMOUNT {
            return Err(ExpenseError::InvalidRecord(format!(
                "amount must not exceed {} (got {})",
                Money::MAX_AMOUNT,
                self.amount
            )));
        }
        if self.category.is_empty() {
            return Err(ExpenseError::InvalidRecord(
                "category must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Split a `Tags` cell into distinct, trimmed, non-empty labels
pub fn parse_tags(s: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

fn clean_label(s: String) -> String {
    let trimmed = s.trim();
    if trimmed.len() == s.len() {
        s
    } else {
        trimmed.to_string()
    }
}

/// A record field that can be used as a grouping or filtering key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSelector {
    Category,
    Subcategory,
    PaymentMethod,
}

impl FieldSelector {
    /// The input column this field is read from
    pub fn column_name(&self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Subcategory => "Subcategory",
            Self::PaymentMethod => "Payment Method",
        }
    }
}

impl fmt::Display for FieldSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

impl FromStr for FieldSelector {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match normalized.as_str() {
            "category" => Ok(Self::Category),
            "subcategory" => Ok(Self::Subcategory),
            "paymentmethod" | "payment" => Ok(Self::PaymentMethod),
            _ => Err(ExpenseError::Validation(format!(
                "Unknown field '{}'. Valid fields: category, subcategory, payment-method",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(ExpenseDate::parse("2024-01-05"), ExpenseDate::Valid(date(2024, 1, 5)));
        assert_eq!(ExpenseDate::parse(" 2024/01/05 "), ExpenseDate::Valid(date(2024, 1, 5)));
    }

    #[test]
    fn test_parse_us_date() {
        assert_eq!(ExpenseDate::parse("01/15/2025"), ExpenseDate::Valid(date(2025, 1, 15)));
    }

    #[test]
    fn test_parse_timestamp_drops_time() {
        assert_eq!(
            ExpenseDate::parse("2024-03-09 14:30:00"),
            ExpenseDate::Valid(date(2024, 3, 9))
        );
        assert_eq!(
            ExpenseDate::parse("2024-03-09T23:59:59+02:00"),
            ExpenseDate::Valid(date(2024, 3, 9))
        );
    }

    #[test]
    fn test_unparsable_date_is_sentinel() {
        let parsed = ExpenseDate::parse("not a date");
        assert_eq!(parsed, ExpenseDate::Invalid("not a date".into()));
        assert!(!parsed.is_valid());
        assert_eq!(parsed.valid(), None);
        assert_eq!(parsed.format("%Y-%m-%d"), "not a date");

        assert_eq!(ExpenseDate::parse("2024-02-30"), ExpenseDate::Invalid("2024-02-30".into()));
        assert_eq!(ExpenseDate::parse(""), ExpenseDate::Invalid(String::new()));
    }

    #[test]
    fn test_format_with_bad_pattern_falls_back() {
        let valid = ExpenseDate::Valid(date(2024, 1, 5));
        assert_eq!(valid.format("%d %b %Y"), "05 Jan 2024");
        assert_eq!(valid.format("%Q"), "2024-01-05");
    }

    #[test]
    fn test_builder_trims_labels() {
        let record = ExpenseRecord::new(date(2024, 1, 5), " Food ", Money::from_cents(2000))
            .with_subcategory("Groceries ")
            .with_payment_method(" Card")
            .with_description("  weekly shop ")
            .with_tags(["home, weekly", "home"]);

        assert_eq!(record.category, "Food");
        assert_eq!(record.subcategory, "Groceries");
        assert_eq!(record.payment_method, "Card");
        assert_eq!(record.description, "weekly shop");
        assert_eq!(record.tags, vec!["home".to_string(), "weekly".to_string()]);
        assert_eq!(record.tags_text(), "home, weekly");
    }

    #[test]
    fn test_validate_rejects_negative_amount() {
        let record = ExpenseRecord::new(date(2024, 1, 5), "Food", Money::from_cents(-1));
        let err = record.validate().unwrap_err();
        assert!(err.is_invalid_record());
    }

    #[test]
    fn test_validate_rejects_empty_category() {
        let record = ExpenseRecord::new(date(2024, 1, 5), "  ", Money::from_cents(100));
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_amount_over_cap() {
        let record = ExpenseRecord::new(
            date(2024, 1, 5),
            "Food",
            Money::from_cents(Money::MAX_AMOUNT.cents() + 1),
        );
        assert!(record.validate().unwrap_err().is_invalid_record());
    }

    #[test]
    fn test_normalized() {
        let mut record = ExpenseRecord::new(date(2024, 1, 5), "Food", Money::from_cents(100));
        record.category = " Food ".to_string();
        record.payment_method = "Card\t".to_string();
        record.description = "  lunch ".to_string();
        record.tags = vec!["a,b".to_string(), " a ".to_string(), String::new()];
        record.date = ExpenseDate::Invalid(" 2024-01-06 ".to_string());

        let record = record.normalized();
        assert_eq!(record.category, "Food");
        assert_eq!(record.payment_method, "Card");
        assert_eq!(record.description, "lunch");
        assert_eq!(record.tags, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(record.date, ExpenseDate::Valid(date(2024, 1, 6)));
        assert_eq!(record.clone().normalized(), record);
    }

    #[test]
    fn test_validate_accepts_zero_amount_and_invalid_date() {
        let record = ExpenseRecord::new(ExpenseDate::parse("??"), "Food", Money::zero());
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_field_selector() {
        let record = ExpenseRecord::new(date(2024, 1, 5), "Food", Money::from_cents(100))
            .with_subcategory("Snacks")
            .with_payment_method("Cash");
        assert_eq!(record.field(FieldSelector::Category), "Food");
        assert_eq!(record.field(FieldSelector::Subcategory), "Snacks");
        assert_eq!(record.field(FieldSelector::PaymentMethod), "Cash");
    }

    #[test]
    fn test_field_selector_from_str() {
        assert_eq!("category".parse::<FieldSelector>().unwrap(), FieldSelector::Category);
        assert_eq!(
            "Payment Method".parse::<FieldSelector>().unwrap(),
            FieldSelector::PaymentMethod
        );
        assert_eq!(
            "payment-method".parse::<FieldSelector>().unwrap(),
            FieldSelector::PaymentMethod
        );
        assert!("amount".parse::<FieldSelector>().is_err());
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags(""), Vec::<String>::new());
        assert_eq!(parse_tags("a, b,,a , c"), vec!["a", "b", "c"]);
    }
}
