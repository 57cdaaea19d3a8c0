//! Month × day pivot
//!
//! Heatmap input: amounts summed per (month, day-of-month). Months from
//! different years share a row, so "January" covers every January in the view.

use chrono::{Datelike, Month};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{ExpenseRecord, Money};

/// Full English month name for a month number (1..=12)
pub fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("")
}

/// One populated pivot cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PivotCell {
    pub month: String,
    pub day: u32,
    pub total: Money,
}

/// Sparse pivot of sums keyed by (month, day)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthDayPivot {
    // Keyed by month number so iteration is in calendar order
    cells: BTreeMap<(u32, u32), Money>,
}

impl MonthDayPivot {
    /// Sum for a cell; absent cells read as zero
    pub fn get(&self, month_name_or_number: impl AsMonth, day: u32) -> Money {
        month_name_or_number
            .month_number()
            .and_then(|m| self.cells.get(&(m, day)).copied())
            .unwrap_or_default()
    }

    /// Populated cells in calendar order
    pub fn cells(&self) -> Vec<PivotCell> {
        self.cells
            .iter()
            .map(|(&(month, day), &total)| PivotCell {
                month: month_name(month).to_string(),
                day,
                total,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn total(&self) -> Money {
        self.cells.values().sum()
    }

    /// Expand into a dense grid with zero fill
    pub fn to_grid(&self) -> HeatmapGrid {
        let mut months: Vec<u32> = self.cells.keys().map(|&(m, _)| m).collect();
        months.dedup();

        let values = months
            .iter()
            .map(|&m| {
                (1..=31)
                    .map(|d| self.cells.get(&(m, d)).copied().unwrap_or_default())
                    .collect()
            })
            .collect();

        HeatmapGrid {
            months: months.iter().map(|&m| month_name(m).to_string()).collect(),
            values,
        }
    }
}

/// Anything that names a month: a number 1..=12 or an English month name
pub trait AsMonth {
    fn month_number(&self) -> Option<u32>;
}

impl AsMonth for u32 {
    fn month_number(&self) -> Option<u32> {
        (1..=12).contains(self).then_some(*self)
    }
}

impl AsMonth for &str {
    fn month_number(&self) -> Option<u32> {
        self.parse::<Month>().ok().map(|m| m.number_from_month())
    }
}

/// Dense months × days (1..=31) grid; rows are the months present, in
/// calendar order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeatmapGrid {
    pub months: Vec<String>,
    /// `values[row][day - 1]`
    pub values: Vec<Vec<Money>>,
}

impl HeatmapGrid {
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Largest cell value, for scaling shades
    pub fn max_cell(&self) -> Money {
        self.values
            .iter()
            .flatten()
            .copied()
            .max()
            .unwrap_or_default()
    }
}

/// Pivot a view by (month, day); records with invalid dates are skipped
pub fn month_day_pivot<'a, I>(records: I) -> MonthDayPivot
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let mut cells = BTreeMap::new();
    for record in records {
        if let Some(date) = record.date.valid() {
            *cells
                .entry((date.month(), date.day()))
                .or_insert_with(Money::zero) += record.amount;
        }
    }
    MonthDayPivot { cells }
}
