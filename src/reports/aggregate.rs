//! Grouped sums
//!
//! Chart inputs for bar, donut and treemap views: amounts summed per distinct
//! value (or value pair) of the chosen fields.

use serde::Serialize;
use std::collections::HashMap;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseRecord, FieldSelector, Money};

/// One group of an aggregation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupTotal {
    /// One value per grouping dimension, in the order requested
    pub key: Vec<String>,
    pub total: Money,
    /// Number of records in the group (always at least one)
    pub count: usize,
}

impl GroupTotal {
    /// The key joined for display, e.g. "Food / Groceries"
    pub fn label(&self) -> String {
        self.key
            .iter()
            .map(|k| if k.is_empty() { "(none)" } else { k.as_str() })
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

/// Result of [`group_sum`]: groups in first-seen order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateResult {
    pub dimensions: Vec<FieldSelector>,
    pub groups: Vec<GroupTotal>,
}

impl AggregateResult {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GroupTotal> {
        self.groups.iter()
    }

    /// Sum over all groups
    pub fn total(&self) -> Money {
        self.groups.iter().map(|g| g.total).sum()
    }

    /// Total for one key, if that group exists
    pub fn get(&self, key: &[&str]) -> Option<Money> {
        self.groups
            .iter()
            .find(|g| g.key.iter().map(String::as_str).eq(key.iter().copied()))
            .map(|g| g.total)
    }

    /// Each group's percentage of the grand total (0.0 when the total is zero)
    pub fn shares(&self) -> Vec<(&GroupTotal, f64)> {
        let total = self.total();
        self.groups
            .iter()
            .map(|g| {
                let pct = if total.is_zero() {
                    0.0
                } else {
                    g.total.cents() as f64 / total.cents() as f64 * 100.0
                };
                (g, pct)
            })
            .collect()
    }

    /// Groups ordered by total, largest first; ties keep first-seen order
    pub fn ranked(&self) -> Vec<&GroupTotal> {
        let mut ranked: Vec<&GroupTotal> = self.groups.iter().collect();
        ranked.sort_by(|a, b| b.total.cmp(&a.total));
        ranked
    }
}

/// Sum amounts grouped by one or two fields.
///
/// Groups appear in the order their key is first seen. A group exists only
/// if at least one record carries its key.
pub fn group_sum<'a, I>(records: I, by: &[FieldSelector]) -> ExpenseResult<AggregateResult>
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    if by.is_empty() || by.len() > 2 {
        return Err(ExpenseError::Validation(format!(
            "group_sum takes one or two fields, got {}",
            by.len()
        )));
    }
    if by.len() == 2 && by[0] == by[1] {
        return Err(ExpenseError::Validation(format!(
            "cannot group by '{}' twice",
            by[0]
        )));
    }

    let mut index: HashMap<Vec<String>, usize> = HashMap::new();
    let mut groups: Vec<GroupTotal> = Vec::new();

    for record in records {
        let key: Vec<String> = by.iter().map(|f| record.field(*f).to_string()).collect();
        match index.get(&key) {
            Some(&i) => {
                groups[i].total += record.amount;
                groups[i].count += 1;
            }
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(GroupTotal {
                    key,
                    total: record.amount,
                    count: 1,
                });
            }
        }
    }

    Ok(AggregateResult {
        dimensions: by.to_vec(),
        groups,
    })
}
