//! YAML Export functionality
//!
//! Exports a dashboard to YAML for human-readable reports.

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::json::DashboardExport;
use crate::reports::Dashboard;
use std::io::Write;

/// Export a dashboard to YAML
pub fn export_dashboard_yaml<W: Write>(dashboard: &Dashboard<'_>, writer: &mut W) -> ExpenseResult<()> {
    let export = DashboardExport::from_dashboard(dashboard);

    // Add a header comment
    writeln!(writer, "# Expense Tracker Dashboard Export")
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    writeln!(writer, "# App Version: {}", export.app_version)
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    writeln!(writer, "# Amounts are in cents.").map_err(|e| ExpenseError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| ExpenseError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| ExpenseError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCollection, ExpenseRecord, FilterSpec, Money};
    use chrono::NaiveDate;

    #[test]
    fn test_yaml_export() {
        let mut collection = ExpenseCollection::new();
        collection
            .append(
                ExpenseRecord::new(
                    NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
                    "Food",
                    Money::from_cents(1234),
                )
                .with_payment_method("Card"),
            )
            .unwrap();
        let dashboard = Dashboard::generate(&collection, &FilterSpec::all()).unwrap();

        let mut output = Vec::new();
        export_dashboard_yaml(&dashboard, &mut output).unwrap();
        let yaml = String::from_utf8(output).unwrap();

        assert!(yaml.starts_with("# Expense Tracker Dashboard Export"));

        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(value["schema_version"].as_str(), Some("1.0.0"));
        assert_eq!(value["summary"]["total"].as_i64(), Some(1234));
        assert_eq!(value["charts"]["heatmap"]["months"][0].as_str(), Some("March"));
        assert_eq!(value["metadata"]["shown_records"].as_u64(), Some(1));
    }
}
