//! CSV Export functionality
//!
//! Exports dashboard metrics and chart inputs to one long-format CSV table
//! (spreadsheet-compatible): one row per chart entry.

use crate::error::{ExpenseError, ExpenseResult};
use crate::reports::{AggregateResult, ChartKind, Dashboard};
use std::io::Write;

const HEADER: [&str; 6] = ["Chart", "Key", "Subkey", "Amount", "Count", "Percentage"];

fn export_err(e: impl ToString) -> ExpenseError {
    ExpenseError::Export(e.to_string())
}

/// Export a dashboard to CSV
pub fn export_dashboard_csv<W: Write>(dashboard: &Dashboard<'_>, writer: W) -> ExpenseResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(HEADER).map_err(export_err)?;

    let stats = &dashboard.summary;
    let count = stats.count.to_string();
    let total = stats.total.to_plain_string();
    csv.write_record(["summary", "total", "", total.as_str(), count.as_str(), ""])
        .map_err(export_err)?;
    if let Some(average) = stats.average {
        let average = average.to_plain_string();
        csv.write_record(["summary", "average", "", average.as_str(), count.as_str(), ""])
            .map_err(export_err)?;
    }
    if let Some(max) = &stats.max_record {
        let amount = max.amount.to_plain_string();
        csv.write_record(["summary", "max", max.category.as_str(), amount.as_str(), "1", ""])
            .map_err(export_err)?;
    }

    write_groups(&mut csv, ChartKind::Bar, &dashboard.by_category)?;
    write_groups(&mut csv, ChartKind::Treemap, &dashboard.by_subcategory)?;
    write_groups(&mut csv, ChartKind::PaymentMethods, &dashboard.by_payment_method)?;

    let line = ChartKind::Line.to_string();
    for point in &dashboard.trend {
        let date = point.date.to_string();
        let amount = point.amount.to_plain_string();
        csv.write_record([line.as_str(), date.as_str(), "", amount.as_str(), "1", ""])
            .map_err(export_err)?;
    }

    let heatmap = ChartKind::Heatmap.to_string();
    for cell in dashboard.pivot.cells() {
        let day = cell.day.to_string();
        let amount = cell.total.to_plain_string();
        csv.write_record([heatmap.as_str(), cell.month.as_str(), day.as_str(), amount.as_str(), "", ""])
            .map_err(export_err)?;
    }

    csv.flush().map_err(export_err)?;
    Ok(())
}

fn write_groups<W: Write>(
    csv: &mut csv::Writer<W>,
    kind: ChartKind,
    groups: &AggregateResult,
) -> ExpenseResult<()> {
    let chart = kind.to_string();
    for (group, pct) in groups.shares() {
        let key = group.key.first().map(String::as_str).unwrap_or("");
        let subkey = group.key.get(1).map(String::as_str).unwrap_or("");
        let total = group.total.to_plain_string();
        let count = group.count.to_string();
        let pct = format!("{:.2}", pct);
        csv.write_record([
            chart.as_str(),
            key,
            subkey,
            total.as_str(),
            count.as_str(),
            pct.as_str(),
        ])
        .map_err(export_err)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCollection, ExpenseRecord, FilterSpec, Money};
    use chrono::NaiveDate;

    fn collection() -> ExpenseCollection {
        let mut collection = ExpenseCollection::new();
        for (m, d, category, sub, cents) in [
            (1, 5, "Food", "Groceries, bulk", 2000),
            (1, 10, "Food", "Dining", 3000),
            (2, 1, "Transport", "Bus", 1500),
        ] {
            collection
                .append(
                    ExpenseRecord::new(
                        NaiveDate::from_ymd_opt(2024, m, d).unwrap(),
                        category,
                        Money::from_cents(cents),
                    )
                    .with_subcategory(sub)
                    .with_payment_method("Card"),
                )
                .unwrap();
        }
        collection
    }

    fn export(collection: &ExpenseCollection) -> Vec<csv::StringRecord> {
        let dashboard = Dashboard::generate(collection, &FilterSpec::all()).unwrap();
        let mut output = Vec::new();
        export_dashboard_csv(&dashboard, &mut output).unwrap();
        let mut reader = csv::Reader::from_reader(output.as_slice());
        assert_eq!(reader.headers().unwrap(), &csv::StringRecord::from(HEADER.to_vec()));
        reader.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn test_summary_rows() {
        let rows = export(&collection());
        let head = |i: usize| rows[i].iter().take(4).collect::<Vec<_>>();
        assert_eq!(head(0), vec!["summary", "total", "", "65.00"]);
        assert_eq!(head(1), vec!["summary", "average", "", "21.67"]);
        assert_eq!(head(2), vec!["summary", "max", "Food", "30.00"]);
    }

    #[test]
    fn test_group_rows_are_quoted_safely() {
        let rows = export(&collection());
        let treemap: Vec<_> = rows.iter().filter(|r| &r[0] == "treemap").collect();
        assert_eq!(treemap.len(), 3);
        assert_eq!(&treemap[0][2], "Groceries, bulk");

        let bar: Vec<_> = rows.iter().filter(|r| &r[0] == "bar").collect();
        assert_eq!(&bar[0][1], "Food");
        assert_eq!(Money::parse(&bar[0][3]), Ok(Money::from_cents(5000)));
        assert_eq!(&bar[0][4], "2");
    }

    #[test]
    fn test_trend_and_heatmap_rows() {
        let rows = export(&collection());
        assert_eq!(rows.iter().filter(|r| &r[0] == "line").count(), 3);

        let heatmap: Vec<_> = rows.iter().filter(|r| &r[0] == "heatmap").collect();
        assert_eq!(heatmap.len(), 3);
        assert_eq!(&heatmap[2][1], "February");
        assert_eq!(&heatmap[2][2], "1");
    }

    #[test]
    fn test_zero_amount_heatmap_cell_is_kept() {
        let mut collection = collection();
        collection
            .append(ExpenseRecord::new(
                NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
                "Gifts",
                Money::zero(),
            ))
            .unwrap();

        let rows = export(&collection);
        let heatmap: Vec<_> = rows.iter().filter(|r| &r[0] == "heatmap").collect();
        assert_eq!(heatmap.len(), 4);
        let march = heatmap.last().unwrap();
        assert_eq!(march.iter().take(4).collect::<Vec<_>>(), vec!["heatmap", "March", "7", "0.00"]);
    }

    #[test]
    fn test_empty_dashboard_has_total_only() {
        let rows = export(&ExpenseCollection::new());
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][3], "0.00");
    }
}
