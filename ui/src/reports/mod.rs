pub mod client;
pub mod figures;
pub mod metrics;

pub use client::{ReportFigure, ReportMetrics, ReportsClient, ReportsError, ReportsSnapshot};
pub use figures::{missing_figure_caption, select_figure};
pub use metrics::{metrics_view, MetricsTable, MetricsView};
