//! Shared UI crate for Snapjudge. Cross-platform logic and views live here.

pub mod core;
pub mod predict;
pub mod reports;
pub mod upload;
pub mod views;

pub mod components {
    // Presentational pieces fed by the pure render models.
    pub mod metrics_table;
    pub mod report_figure;
    pub mod topk_list;

    pub use metrics_table::MetricsPanel;
    pub use report_figure::ReportFigurePanel;
    pub use topk_list::TopKList;
}
