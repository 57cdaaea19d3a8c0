//! Expense trends over time
//!
//! Line and scatter chart inputs. Only valid-dated records contribute.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{ExpenseRecord, Money};

/// One point of a trend line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub amount: Money,
}

/// Per-record points sorted by date; records sharing a date keep view order
pub fn trend_series<'a, I>(records: I) -> Vec<TrendPoint>
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let mut points: Vec<TrendPoint> = records
        .into_iter()
        .filter_map(|r| {
            r.date.valid().map(|date| TrendPoint {
                date,
                amount: r.amount,
            })
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

/// One point per distinct date, amounts summed, in date order
pub fn daily_totals<'a, I>(records: I) -> Vec<TrendPoint>
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let mut by_date: BTreeMap<NaiveDate, Money> = BTreeMap::new();
    for record in records {
        if let Some(date) = record.date.valid() {
            *by_date.entry(date).or_default() += record.amount;
        }
    }
    by_date
        .into_iter()
        .map(|(date, amount)| TrendPoint { date, amount })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseDate;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn sample() -> Vec<ExpenseRecord> {
        vec![
            ExpenseRecord::new(date(2, 1), "Transport", Money::from_cents(1500)),
            ExpenseRecord::new(date(1, 5), "Food", Money::from_cents(2000)),
            ExpenseRecord::new(ExpenseDate::parse("??"), "Food", Money::from_cents(100)),
            ExpenseRecord::new(date(1, 5), "Fun", Money::from_cents(700)),
        ]
    }

    #[test]
    fn test_trend_series_sorted_and_stable() {
        let points = trend_series(&sample());
        let amounts: Vec<i64> = points.iter().map(|p| p.amount.cents()).collect();
        assert_eq!(amounts, vec![2000, 700, 1500]);
        assert_eq!(points[0].date, date(1, 5));
    }

    #[test]
    fn test_daily_totals() {
        let totals = daily_totals(&sample());
        assert_eq!(
            totals,
            vec![
                TrendPoint {
                    date: date(1, 5),
                    amount: Money::from_cents(2700)
                },
                TrendPoint {
                    date: date(2, 1),
                    amount: Money::from_cents(1500)
                },
            ]
        );
    }

    #[test]
    fn test_empty() {
        assert!(trend_series(&Vec::<ExpenseRecord>::new()).is_empty());
        assert!(daily_totals(&Vec::<ExpenseRecord>::new()).is_empty());
    }
}
