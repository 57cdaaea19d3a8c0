//! Expense display formatting
//!
//! Renders expense lists as tables and summary metrics as plain lines.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::ExpenseRecord;
use crate::reports::SummaryStats;

use super::report::truncate;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "#")]
    row: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Subcategory")]
    subcategory: String,
    #[tabled(rename = "Payment Method")]
    payment_method: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Format positioned records as a table; positions are shown 1-based
pub fn format_expense_table<'a, I>(rows: I, date_format: &str, currency_symbol: &str) -> String
where
    I: IntoIterator<Item = (usize, &'a ExpenseRecord)>,
{
    let rows: Vec<ExpenseRow> = rows
        .into_iter()
        .map(|(index, record)| ExpenseRow {
            row: index + 1,
            date: record.date.format(date_format),
            category: record.category.clone(),
            subcategory: record.subcategory.clone(),
            payment_method: record.payment_method.clone(),
            amount: record.amount.format_with_symbol(currency_symbol),
            description: truncate(&record.description, 30),
        })
        .collect();

    if rows.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::single(0), Alignment::right())
        .modify(Columns::single(5), Alignment::right());
    format!("{}\n", table)
}

/// Format the headline metrics of a view
pub fn format_summary(stats: &SummaryStats, currency_symbol: &str, date_format: &str) -> String {
    let (total, average, highest) = stats.formatted(currency_symbol);

    let mut output = String::new();
    output.push_str(&format!("Expenses:        {}\n", stats.count));
    output.push_str(&format!("Total Expenses:  {}\n", total));
    output.push_str(&format!("Average Expense: {}\n", average));
    match &stats.max_record {
        Some(record) => output.push_str(&format!(
            "Highest Expense: {} ({}, {})\n",
            highest,
            record.category,
            record.date.format(date_format)
        )),
        None => output.push_str(&format!("Highest Expense: {}\n", highest)),
    }
    output
}
