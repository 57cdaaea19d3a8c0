//! CSV reading and writing for expense tables
//!
//! Reads any CSV whose header contains `Date`, `Category` and `Amount`;
//! optional columns default to empty and unknown columns are ignored. Writing
//! always produces the canonical header so a saved file loads back unchanged.

use std::io::{Read, Write};

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use tracing::{debug, warn};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseCollection, ExpenseDate, ExpenseRecord, Money};

/// Canonical column order used when writing
pub const COLUMNS: [&str; 7] = [
    "Date",
    "Category",
    "Subcategory",
    "Amount",
    "Payment Method",
    "Description",
    "Tags",
];

/// Format used for dates on disk
pub const STORAGE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Positions of the recognized columns within one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: usize,
    pub category: usize,
    pub amount: usize,
    pub subcategory: Option<usize>,
    pub payment_method: Option<usize>,
    pub description: Option<usize>,
    pub tags: Option<usize>,
}

impl ColumnMap {
    /// Locate columns by header name, ignoring case, spaces and underscores.
    ///
    /// Fails with a schema error naming every missing required column.
    pub fn from_headers(headers: &StringRecord) -> ExpenseResult<Self> {
        let find = |name: &str| {
            let wanted = normalize_header(name);
            headers.iter().position(|h| normalize_header(h) == wanted)
        };

        let date = find("Date");
        let category = find("Category");
        let amount = find("Amount");

        match (date, category, amount) {
            (Some(date), Some(category), Some(amount)) => Ok(Self {
                date,
                category,
                amount,
                subcategory: find("Subcategory"),
                payment_method: find("Payment Method"),
                description: find("Description"),
                tags: find("Tags"),
            }),
            _ => {
                let missing = [("Date", date), ("Category", category), ("Amount", amount)]
                    .into_iter()
                    .filter(|(_, idx)| idx.is_none())
                    .map(|(name, _)| name.to_string())
                    .collect();
                Err(ExpenseError::Schema { missing })
            }
        }
    }

    fn parse_row(&self, row: &StringRecord, row_number: usize) -> ExpenseResult<ExpenseRecord> {
        let cell = |idx: usize| row.get(idx).unwrap_or("");
        let optional = |idx: Option<usize>| idx.map(cell).unwrap_or("");

        let amount_text = cell(self.amount);
        let amount = Money::parse(amount_text).map_err(|e| {
            ExpenseError::InvalidRecord(format!("row {}: {}", row_number, e))
        })?;
        if amount.is_negative() {
            return Err(ExpenseError::InvalidRecord(format!(
                "row {}: amount must not be negative (got '{}')",
                row_number, amount_text
            )));
        }

        let date = ExpenseDate::parse(cell(self.date));
        Ok(ExpenseRecord::new(date, cell(self.category), amount)
            .with_subcategory(optional(self.subcategory))
            .with_payment_method(optional(self.payment_method))
            .with_description(optional(self.description))
            .with_tags([optional(self.tags)]))
    }
}

fn normalize_header(h: &str) -> String {
    h.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Parse expense rows from a CSV stream.
///
/// `source_name` is only used in error messages. Row numbers in errors are
/// 1-based and exclude the header.
pub fn read_expenses<R: Read>(reader: R, source_name: &str) -> ExpenseResult<ExpenseCollection> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| read_error(source_name, e))?
        .clone();
    let columns = ColumnMap::from_headers(&headers)?;
    debug!(source = source_name, ?columns, "resolved expense columns");

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row = result.map_err(|e| read_error(source_name, e))?;
        records.push(columns.parse_row(&row, idx + 1)?);
    }

    let collection = ExpenseCollection::from_records(records);
    let invalid = collection.invalid_date_count();
    if invalid > 0 {
        warn!(
            source = source_name,
            invalid, "rows with unparsable dates are excluded from date filters"
        );
    }
    debug!(source = source_name, rows = collection.len(), "loaded expenses");

    Ok(collection)
}

fn read_error(source_name: &str, err: csv::Error) -> ExpenseError {
    let line = err.position().map(|pos| pos.line());
    match line {
        Some(line) if !err.is_io_error() => {
            ExpenseError::InvalidRecord(format!("line {}: {}", line, err))
        }
        _ => ExpenseError::source_unavailable(source_name, err.to_string()),
    }
}

/// Write records as CSV with the canonical header
pub fn write_expenses<'a, W, I>(writer: W, records: I) -> ExpenseResult<()>
where
    W: Write,
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let mut writer = WriterBuilder::new().from_writer(writer);
    let to_err = |e: csv::Error| ExpenseError::Io(format!("Failed to write CSV: {}", e));

    writer.write_record(COLUMNS).map_err(to_err)?;
    for record in records {
        writer
            .write_record([
                record.date.format(STORAGE_DATE_FORMAT),
                record.category.clone(),
                record.subcategory.clone(),
                record.amount.to_plain_string(),
                record.payment_method.clone(),
                record.description.clone(),
                record.tags_text(),
            ])
            .map_err(to_err)?;
    }
    writer
        .flush()
        .map_err(|e| ExpenseError::Io(format!("Failed to flush CSV: {}", e)))?;

    Ok(())
}
