//! JSON Export functionality
//!
//! Exports a dashboard (filter, metrics and chart inputs) to JSON with
//! schema versioning. Amounts are integer cents.

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseRecord, FilterSpec, Money};
use crate::reports::{AggregateResult, Dashboard, HeatmapGrid, SummaryStats, TrendPoint};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Serializable snapshot of a dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DashboardExport<'d> {
    /// Schema version for compatibility checking
    pub schema_version: &'static str,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: &'static str,

    pub filter: &'d FilterSpec,

    pub metadata: ExportMetadata,

    pub summary: &'d SummaryStats,

    pub charts: ChartExport<'d>,

    /// The filtered records, in collection order
    pub expenses: Vec<&'d ExpenseRecord>,
}

/// Counts and bounds for reference
#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    /// Records in the unfiltered collection
    pub total_records: usize,

    /// Records shown after filtering
    pub shown_records: usize,

    /// Earliest valid date in the view
    pub earliest_expense: Option<String>,

    /// Latest valid date in the view
    pub latest_expense: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartExport<'d> {
    pub by_category: &'d AggregateResult,
    pub by_subcategory: &'d AggregateResult,
    pub by_payment_method: &'d AggregateResult,
    pub trend: &'d [TrendPoint],
    pub heatmap: &'d HeatmapGrid,
}

impl<'d> DashboardExport<'d> {
    pub fn from_dashboard(dashboard: &'d Dashboard<'_>) -> Self {
        let dates = dashboard.view.iter().filter_map(|r| r.date.valid());
        let earliest_expense = dates.clone().min().map(|d| d.to_string());
        let latest_expense = dates.max().map(|d| d.to_string());

        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            filter: &dashboard.filter,
            metadata: ExportMetadata {
                total_records: dashboard.total_records,
                shown_records: dashboard.view.len(),
                earliest_expense,
                latest_expense,
            },
            summary: &dashboard.summary,
            charts: ChartExport {
                by_category: &dashboard.by_category,
                by_subcategory: &dashboard.by_subcategory,
                by_payment_method: &dashboard.by_payment_method,
                trend: &dashboard.trend,
                heatmap: &dashboard.heatmap,
            },
            expenses: dashboard.view.records().to_vec(),
        }
    }

    /// Total of the exported view
    pub fn total(&self) -> Money {
        self.summary.total
    }
}

/// Export a dashboard to JSON
pub fn export_dashboard_json<W: Write>(
    dashboard: &Dashboard<'_>,
    writer: &mut W,
    pretty: bool,
) -> ExpenseResult<()> {
    let export = DashboardExport::from_dashboard(dashboard);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| ExpenseError::Export(e.to_string()))?;

    Ok(())
}
