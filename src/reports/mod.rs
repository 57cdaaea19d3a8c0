//! Reports module for the expense tracker
//!
//! Aggregations over a filtered view: grouped sums for bar, donut and
//! treemap charts, the month × day pivot, trend series, summary metrics and
//! the dashboard bundling them.

pub mod aggregate;
pub mod dashboard;
pub mod pivot;
pub mod summary;
pub mod trend;

pub use aggregate::{group_sum, AggregateResult, GroupTotal};
pub use dashboard::{ChartData, ChartKind, Dashboard};
pub use pivot::{month_day_pivot, month_name, HeatmapGrid, MonthDayPivot, PivotCell};
pub use summary::{summarize, SummaryStats};
pub use trend::{daily_totals, trend_series, TrendPoint};
