//! Figure selection keyed by model id.
//!
//! Figures are precomputed confusion matrices; the snapshot's URLs embed
//! the owning model id, so a model change only re-runs this match against
//! the cached list and never re-fetches.

use crate::core::config::model_display_name;

use super::client::ReportFigure;

pub fn select_figure<'a>(model_id: &str, figures: &'a [ReportFigure]) -> Option<&'a ReportFigure> {
    let suffix = format!("confusion_matrix_{model_id}.png");
    figures.iter().find(|figure| figure.url.contains(&suffix))
}

pub fn missing_figure_caption(model_id: &str) -> String {
    format!("No confusion matrix for {}.", model_display_name(model_id))
}
