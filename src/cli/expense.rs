//! CLI commands for expenses
//!
//! Listing, adding and removing expenses, summary metrics, and replacing the
//! data with another CSV file.

use chrono::Local;
use clap::Args;
use std::path::Path;

use crate::display::{format_expense_table, format_summary};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseDate, ExpenseRecord, Money};
use crate::reports::summarize;
use crate::services::filter;
use crate::session::Session;

use super::filter::FilterArgs;

/// Fields of a new expense
#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Expense date (defaults to today)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Category, e.g. Food
    #[arg(short, long)]
    pub category: String,

    /// Amount, e.g. 12.50
    #[arg(short, long)]
    pub amount: String,

    #[arg(short, long)]
    pub subcategory: Option<String>,

    #[arg(short, long)]
    pub payment_method: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Comma-separated tags
    #[arg(short, long)]
    pub tags: Option<String>,
}

impl AddArgs {
    /// Build a record; unlike file loads, a date that does not parse is an error
    pub fn to_record(&self) -> ExpenseResult<ExpenseRecord> {
        let date = match &self.date {
            Some(text) => match ExpenseDate::parse(text) {
                ExpenseDate::Valid(date) => date,
                ExpenseDate::Invalid(raw) => {
                    return Err(ExpenseError::Validation(format!(
                        "Invalid date '{}'. Use YYYY-MM-DD",
                        raw
                    )))
                }
            },
            None => Local::now().date_naive(),
        };

        let amount = Money::parse(&self.amount).map_err(|e| {
            ExpenseError::Validation(format!("Invalid amount '{}': {}", self.amount, e))
        })?;

        let mut record = ExpenseRecord::new(date, self.category.as_str(), amount);
        if let Some(subcategory) = &self.subcategory {
            record = record.with_subcategory(subcategory.as_str());
        }
        if let Some(method) = &self.payment_method {
            record = record.with_payment_method(method.as_str());
        }
        if let Some(description) = &self.description {
            record = record.with_description(description.as_str());
        }
        if let Some(tags) = &self.tags {
            record = record.with_tags([tags]);
        }
        Ok(record)
    }
}

/// List the filtered expenses as a table
pub fn handle_list_command(session: &Session, filter_args: &FilterArgs) -> ExpenseResult<()> {
    session.require_data()?;
    let spec = filter_args.to_spec()?;
    let collection = session.collection();
    let view = filter(collection, &spec);
    let settings = session.settings();

    print!(
        "{}",
        format_expense_table(
            view.positions_in(collection),
            &settings.date_format,
            &settings.currency_symbol
        )
    );
    println!("Showing {} of {} expenses", view.len(), collection.len());
    Ok(())
}

/// Append an expense to the data file
pub fn handle_add_command(session: &mut Session, args: &AddArgs) -> ExpenseResult<()> {
    let record = args.to_record()?;
    let summary = format!(
        "{} {} on {}",
        record.category,
        record.amount.format_with_symbol(&session.settings().currency_symbol),
        record.date.format(&session.settings().date_format)
    );
    let row = session.add_expense(record)?;
    println!("Added expense #{}: {}", row, summary);
    Ok(())
}

/// Remove an expense by its 1-based row number
pub fn handle_remove_command(session: &mut Session, row: usize) -> ExpenseResult<()> {
    let removed = session.remove_expense(row)?;
    println!(
        "Removed expense #{}: {} {}",
        row,
        removed.category,
        removed
            .amount
            .format_with_symbol(&session.settings().currency_symbol)
    );
    Ok(())
}

/// Show total, average and highest expense of the filtered view
pub fn handle_stats_command(session: &Session, filter_args: &FilterArgs) -> ExpenseResult<()> {
    session.require_data()?;
    let spec = filter_args.to_spec()?;
    let view = filter(session.collection(), &spec);
    let stats = summarize(&view);
    let settings = session.settings();

    print!(
        "{}",
        format_summary(&stats, &settings.currency_symbol, &settings.date_format)
    );

    let invalid = view.iter().filter(|r| !r.date.is_valid()).count();
    if invalid > 0 {
        println!("({} expense(s) have unreadable dates)", invalid);
    }
    Ok(())
}

/// Replace the data with a CSV file
///
/// With `link`, the file becomes the data file for later runs; otherwise its
/// rows are copied into the current data file.
pub fn handle_import_command(session: &mut Session, file: &Path, link: bool) -> ExpenseResult<()> {
    let rows = if link {
        let rows = session.use_file(file)?;
        session.remember_data_file()?;
        rows
    } else {
        session.import_file(file)?
    };

    println!("Imported {} expenses from {}", rows, file.display());
    let invalid = session.collection().invalid_date_count();
    if invalid > 0 {
        println!("Warning: {} row(s) have unreadable dates", invalid);
    }
    if let Some(target) = session.data_file() {
        println!("Data file: {}", target.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn args(date: Option<&str>, amount: &str) -> AddArgs {
        AddArgs {
            date: date.map(str::to_string),
            category: "Food".to_string(),
            amount: amount.to_string(),
            subcategory: Some("Groceries".to_string()),
            payment_method: None,
            description: None,
            tags: Some("weekly, family".to_string()),
        }
    }

    #[test]
    fn test_to_record() {
        let record = args(Some("2024-01-05"), "$12.50").to_record().unwrap();
        assert_eq!(record.date.valid(), NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(record.amount, Money::from_cents(1250));
        assert_eq!(record.subcategory, "Groceries");
        assert_eq!(record.tags, vec!["weekly".to_string(), "family".to_string()]);
        assert_eq!(record.payment_method, "");
    }

    #[test]
    fn test_to_record_defaults_to_today() {
        let before = Local::now().date_naive();
        let record = args(None, "1").to_record().unwrap();
        let date = record.date.valid().unwrap();
        assert!(date >= before && date <= Local::now().date_naive());
    }

    #[test]
    fn test_to_record_rejects_bad_input() {
        assert!(args(Some("someday"), "1").to_record().is_err());
        assert!(args(Some("2024-01-05"), "lots").to_record().is_err());
    }
}
