//! Export module for the expense tracker
//!
//! Writes a dashboard in machine- or human-readable formats:
//! - CSV: one long-format table of metrics and chart rows
//! - JSON: versioned snapshot of filter, metrics, charts and records
//! - YAML: the same snapshot, with a comment header

pub mod csv;
pub mod json;
pub mod yaml;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::error::{ExpenseError, ExpenseResult};
use crate::reports::Dashboard;

pub use self::csv::export_dashboard_csv;
pub use json::{export_dashboard_json, DashboardExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_dashboard_yaml;

/// Output format of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Csv,
    Json,
    Yaml,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportFormat::Text => "text",
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
            ReportFormat::Yaml => "yaml",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ReportFormat {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            "yaml" | "yml" => Ok(ReportFormat::Yaml),
            other => Err(ExpenseError::Validation(format!(
                "Unknown report format '{}' (expected text, csv, json or yaml)",
                other
            ))),
        }
    }
}

/// Write a dashboard in the given format
pub fn write_dashboard<W: Write>(
    dashboard: &Dashboard<'_>,
    format: ReportFormat,
    currency_symbol: &str,
    top: usize,
    writer: &mut W,
) -> ExpenseResult<()> {
    match format {
        ReportFormat::Text => writer
            .write_all(dashboard.format_terminal(currency_symbol, top).as_bytes())
            .map_err(|e| ExpenseError::Export(e.to_string())),
        ReportFormat::Csv => export_dashboard_csv(dashboard, writer),
        ReportFormat::Json => {
            export_dashboard_json(dashboard, writer, true)?;
            writeln!(writer).map_err(|e| ExpenseError::Export(e.to_string()))
        }
        ReportFormat::Yaml => export_dashboard_yaml(dashboard, writer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCollection, FilterSpec};

    #[test]
    fn test_report_format_from_str() {
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert_eq!("yml".parse::<ReportFormat>().unwrap(), ReportFormat::Yaml);
        assert!("pdf".parse::<ReportFormat>().is_err());
        assert_eq!(ReportFormat::default().to_string(), "text");
    }

    #[test]
    fn test_write_every_format() {
        let collection = ExpenseCollection::new();
        let dashboard = Dashboard::generate(&collection, &FilterSpec::all()).unwrap();
        for format in [
            ReportFormat::Text,
            ReportFormat::Csv,
            ReportFormat::Json,
            ReportFormat::Yaml,
        ] {
            let mut output = Vec::new();
            write_dashboard(&dashboard, format, "$", 10, &mut output).unwrap();
            assert!(!output.is_empty(), "{} produced no output", format);
        }
    }
}
