//! Filter flags shared by the list, stats and report commands

use chrono::NaiveDate;
use clap::Args;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::FilterSpec;

/// Sidebar-style filters. A flag that is absent does not constrain; a
/// selection flag given with no values selects nothing.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Earliest date to include (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Latest date to include (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Categories to include (repeat or comma-separate)
    #[arg(long = "category", num_args = 0.., value_delimiter = ',')]
    pub categories: Option<Vec<String>>,

    /// Subcategories to include
    #[arg(long = "subcategory", num_args = 0.., value_delimiter = ',')]
    pub subcategories: Option<Vec<String>>,

    /// Payment methods to include
    #[arg(long = "payment-method", num_args = 0.., value_delimiter = ',')]
    pub payment_methods: Option<Vec<String>>,
}

impl FilterArgs {
    /// Build the filter; a missing bound leaves that side of the range open
    pub fn to_spec(&self) -> ExpenseResult<FilterSpec> {
        let mut spec = FilterSpec::all();

        match (self.from, self.to) {
            (None, None) => {}
            (from, to) => {
                let from = from.unwrap_or(NaiveDate::MIN);
                let to = to.unwrap_or(NaiveDate::MAX);
                if from > to {
                    return Err(ExpenseError::Validation(format!(
                        "--from {} is after --to {}",
                        from, to
                    )));
                }
                spec = spec.with_date_range(from, to);
            }
        }

        if let Some(categories) = &self.categories {
            spec = spec.with_categories(trimmed(categories));
        }
        if let Some(subcategories) = &self.subcategories {
            spec = spec.with_subcategories(trimmed(subcategories));
        }
        if let Some(methods) = &self.payment_methods {
            spec = spec.with_payment_methods(trimmed(methods));
        }

        Ok(spec)
    }
}

fn trimmed(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}
