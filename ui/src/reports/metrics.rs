//! Render model for the benchmark metrics table.
//!
//! Two independent notions of "best" are computed: the model with the
//! highest accuracy is flagged best overall (a column-level marker), and
//! within each metric row the single highest value is flagged best for that
//! metric. They may disagree.

use crate::core::config::model_display_name;

use super::client::{ModelMetrics, ReportMetrics};

pub const NO_METRICS_MESSAGE: &str = "No benchmark metrics available.";

const METRIC_ROWS: [(&str, fn(&ModelMetrics) -> Option<f64>); 4] = [
    ("Accuracy", |m| m.test_accuracy),
    ("Precision", |m| m.test_precision_macro),
    ("Recall", |m| m.test_recall_macro),
    ("F1", |m| m.test_f1_macro),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsView {
    /// A single explanatory line instead of a table.
    Message(String),
    Table(MetricsTable),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsTable {
    pub columns: Vec<MetricsColumn>,
    pub rows: Vec<MetricsRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsColumn {
    pub model_id: String,
    pub label: String,
    pub best_overall: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsRow {
    pub label: &'static str,
    pub cells: Vec<MetricsCell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsCell {
    /// Formatted percent value ("84.20"); `None` renders as a placeholder.
    pub value: Option<String>,
    pub best_in_row: bool,
}

pub fn metrics_view(metrics: Option<&ReportMetrics>) -> MetricsView {
    match metrics {
        None => MetricsView::Message(NO_METRICS_MESSAGE.to_string()),
        Some(ReportMetrics::Status { status, message }) => {
            if status == "missing" || status == "invalid" {
                let text = message
                    .as_deref()
                    .filter(|text| !text.is_empty())
                    .unwrap_or(NO_METRICS_MESSAGE);
                MetricsView::Message(text.to_string())
            } else {
                MetricsView::Message(NO_METRICS_MESSAGE.to_string())
            }
        }
        Some(ReportMetrics::Table { models }) if models.is_empty() => {
            MetricsView::Message(NO_METRICS_MESSAGE.to_string())
        }
        Some(ReportMetrics::Table { models }) => MetricsView::Table(build_table(models)),
    }
}

fn build_table(models: &[ModelMetrics]) -> MetricsTable {
    let best_overall = best_overall_index(models);

    let columns = models
        .iter()
        .enumerate()
        .map(|(index, model)| MetricsColumn {
            model_id: model.model.clone(),
            label: model_display_name(&model.model).to_string(),
            best_overall: index == best_overall,
        })
        .collect();

    let rows = METRIC_ROWS
        .iter()
        .map(|(label, metric)| {
            let best_in_row = best_row_index(models, *metric);
            let cells = models
                .iter()
                .enumerate()
                .map(|(index, model)| {
                    let value = metric(model);
                    MetricsCell {
                        value: value.map(|v| format!("{:.2}", v * 100.0)),
                        best_in_row: best_in_row == Some(index) && value.is_some(),
                    }
                })
                .collect();
            MetricsRow { label, cells }
        })
        .collect();

    MetricsTable { columns, rows }
}

/// Highest accuracy wins; missing accuracy counts as zero; first index wins
/// ties.
fn best_overall_index(models: &[ModelMetrics]) -> usize {
    let mut best = 0;
    for (index, model) in models.iter().enumerate() {
        let candidate = model.test_accuracy.unwrap_or(0.0);
        let incumbent = models[best].test_accuracy.unwrap_or(0.0);
        if candidate > incumbent {
            best = index;
        }
    }
    best
}

fn best_row_index(models: &[ModelMetrics], metric: fn(&ModelMetrics) -> Option<f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, model) in models.iter().enumerate() {
        if let Some(value) = metric(model) {
            match best {
                Some((_, incumbent)) if value <= incumbent => {}
                _ => best = Some((index, value)),
            }
        }
    }
    best.map(|(index, _)| index)
}
