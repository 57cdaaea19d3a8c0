//! Summary statistics
//!
//! The three headline metrics of a view: total, average and highest expense.

use serde::Serialize;

use crate::models::{ExpenseRecord, Money};

/// Total, average and largest record of a view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryStats {
    /// Sum of amounts (zero for an empty view)
    pub total: Money,
    /// Mean amount rounded to the cent; `None` for an empty view
    pub average: Option<Money>,
    /// First record carrying the largest amount; `None` iff the view is empty
    pub max_record: Option<ExpenseRecord>,
    /// Number of records summarized
    pub count: usize,
}

impl SummaryStats {
    pub fn is_empty(&self) -> bool {
        self.max_record.is_none()
    }

    /// Largest amount, zero for an empty view
    pub fn max_amount(&self) -> Money {
        self.max_record
            .as_ref()
            .map(|r| r.amount)
            .unwrap_or_default()
    }

    /// The three metrics as display strings, e.g. `("$65.00", "$21.67", "$30.00")`
    pub fn formatted(&self, currency_symbol: &str) -> (String, String, String) {
        (
            self.total.format_with_symbol(currency_symbol),
            self.average
                .unwrap_or_default()
                .format_with_symbol(currency_symbol),
            self.max_amount().format_with_symbol(currency_symbol),
        )
    }
}

/// Compute total, average and max over a view in one pass
pub fn summarize<'a, I>(records: I) -> SummaryStats
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let mut total = Money::zero();
    let mut count = 0usize;
    let mut max_record: Option<&ExpenseRecord> = None;

    for record in records {
        total += record.amount;
        count += 1;
        // Strictly greater keeps the first record on ties
        if max_record.map_or(true, |m| record.amount > m.amount) {
            max_record = Some(record);
        }
    }

    SummaryStats {
        total,
        average: total.mean_of(count),
        max_record: max_record.cloned(),
        count,
    }
}
