//! Dashboard
//!
//! One filtered view with every chart input and the summary metrics, the
//! way the dashboard page shows them together.

use serde::Serialize;
use std::fmt;

use crate::display::report::{format_bar, format_share, separator, shade, truncate};
use crate::error::ExpenseResult;
use crate::models::{ExpenseCollection, FieldSelector, FilterSpec};
use crate::services::{filter, ExpenseView};

use super::aggregate::{group_sum, AggregateResult};
use super::pivot::{month_day_pivot, HeatmapGrid, MonthDayPivot};
use super::summary::{summarize, SummaryStats};
use super::trend::{trend_series, TrendPoint};

const WIDTH: usize = 60;

/// The charts a dashboard renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Spending by category
    Bar,
    /// Share of spending by category
    Donut,
    /// Category and subcategory breakdown
    Treemap,
    /// Spending by payment method
    PaymentMethods,
    /// Expense trend over time
    Line,
    /// Month × day spending
    Heatmap,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        ChartKind::Bar,
        ChartKind::Donut,
        ChartKind::Treemap,
        ChartKind::PaymentMethods,
        ChartKind::Line,
        ChartKind::Heatmap,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Bar => "Spending by Category",
            ChartKind::Donut => "Category Distribution",
            ChartKind::Treemap => "Category Breakdown",
            ChartKind::PaymentMethods => "Spending by Payment Method",
            ChartKind::Line => "Expense Trends",
            ChartKind::Heatmap => "Monthly Heatmap",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartKind::Bar => "bar",
            ChartKind::Donut => "donut",
            ChartKind::Treemap => "treemap",
            ChartKind::PaymentMethods => "payment_methods",
            ChartKind::Line => "line",
            ChartKind::Heatmap => "heatmap",
        };
        write!(f, "{}", name)
    }
}

/// Borrowed input for one chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartData<'d> {
    Groups(&'d AggregateResult),
    Trend(&'d [TrendPoint]),
    Heatmap(&'d HeatmapGrid),
}

/// Filtered view plus every chart input and the summary metrics
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard<'a> {
    #[serde(skip)]
    pub view: ExpenseView<'a>,
    pub filter: FilterSpec,
    /// Records in the unfiltered collection
    pub total_records: usize,
    pub summary: SummaryStats,
    pub by_category: AggregateResult,
    pub by_subcategory: AggregateResult,
    pub by_payment_method: AggregateResult,
    pub trend: Vec<TrendPoint>,
    /// Populated (month, day) cells, including cells that sum to zero
    #[serde(skip)]
    pub pivot: MonthDayPivot,
    pub heatmap: HeatmapGrid,
}

impl<'a> Dashboard<'a> {
    /// Filter a collection and compute every chart input from the view
    pub fn generate(collection: &'a ExpenseCollection, spec: &FilterSpec) -> ExpenseResult<Self> {
        let view = filter(collection, spec);

        let by_category = group_sum(&view, &[FieldSelector::Category])?;
        let by_subcategory =
            group_sum(&view, &[FieldSelector::Category, FieldSelector::Subcategory])?;
        let by_payment_method = group_sum(&view, &[FieldSelector::PaymentMethod])?;
        let trend = trend_series(&view);
        let pivot = month_day_pivot(&view);
        let heatmap = pivot.to_grid();
        let summary = summarize(&view);

        tracing::debug!(
            shown = view.len(),
            total = collection.len(),
            "generated dashboard"
        );

        Ok(Self {
            view,
            filter: spec.clone(),
            total_records: collection.len(),
            summary,
            by_category,
            by_subcategory,
            by_payment_method,
            trend,
            pivot,
            heatmap,
        })
    }

    /// Input for one chart; bar and donut share the category grouping
    pub fn chart(&self, kind: ChartKind) -> ChartData<'_> {
        match kind {
            ChartKind::Bar | ChartKind::Donut => ChartData::Groups(&self.by_category),
            ChartKind::Treemap => ChartData::Groups(&self.by_subcategory),
            ChartKind::PaymentMethods => ChartData::Groups(&self.by_payment_method),
            ChartKind::Line => ChartData::Trend(&self.trend),
            ChartKind::Heatmap => ChartData::Heatmap(&self.heatmap),
        }
    }

    /// Records excluded by the filter
    pub fn hidden_records(&self) -> usize {
        self.total_records - self.view.len()
    }

    /// Format the dashboard for terminal display
    pub fn format_terminal(&self, currency_symbol: &str, top: usize) -> String {
        let mut output = String::new();
        let (total, average, highest) = self.summary.formatted(currency_symbol);

        output.push_str("Expense Dashboard\n");
        output.push_str(&"=".repeat(WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "Showing {} of {} expenses\n",
            self.view.len(),
            self.total_records
        ));
        output.push_str(&format!("Total Expenses: {}\n", total));
        output.push_str(&format!("Average Expense: {}\n", average));
        output.push_str(&format!("Highest Expense: {}\n", highest));

        for (kind, groups) in [
            (ChartKind::Bar, &self.by_category),
            (ChartKind::Treemap, &self.by_subcategory),
            (ChartKind::PaymentMethods, &self.by_payment_method),
        ] {
            output.push('\n');
            output.push_str(kind.title());
            output.push('\n');
            output.push_str(&separator(WIDTH));
            output.push('\n');
            if groups.is_empty() {
                output.push_str("  (no data)\n");
                continue;
            }
            let mut shares = groups.shares();
            shares.sort_by(|a, b| b.0.total.cmp(&a.0.total));
            for (group, pct) in shares.into_iter().take(top) {
                output.push_str(&format!(
                    "  {:<32} {:>14} {:>7}\n",
                    truncate(&group.label(), 32),
                    group.total.format_with_symbol(currency_symbol),
                    format_share(pct)
                ));
            }
            if groups.len() > top {
                output.push_str(&format!("  ... and {} more\n", groups.len() - top));
            }
        }

        output.push('\n');
        output.push_str(ChartKind::Line.title());
        output.push('\n');
        output.push_str(&separator(WIDTH));
        output.push('\n');
        let daily = super::trend::daily_totals(&self.view);
        let peak = daily.iter().map(|p| p.amount).max().unwrap_or_default();
        if daily.is_empty() {
            output.push_str("  (no dated expenses)\n");
        }
        for point in &daily {
            output.push_str(&format!(
                "  {}  {:>14}  {}\n",
                point.date,
                point.amount.format_with_symbol(currency_symbol),
                format_bar(point.amount, peak, 20)
            ));
        }

        output.push('\n');
        output.push_str(ChartKind::Heatmap.title());
        output.push('\n');
        output.push_str(&separator(WIDTH));
        output.push('\n');
        if self.heatmap.is_empty() {
            output.push_str("  (no dated expenses)\n");
        } else {
            let peak = self.heatmap.max_cell();
            output.push_str(&format!("  {:<10} ", ""));
            output.extend((1..=31u8).map(|day| char::from(b'0' + day % 10)));
            output.push('\n');
            for (month, row) in self.heatmap.months.iter().zip(&self.heatmap.values) {
                output.push_str(&format!("  {:<10} ", month));
                output.extend(row.iter().map(|&cell| shade(cell, peak)));
                output.push('\n');
            }
        }

        output
    }
}
