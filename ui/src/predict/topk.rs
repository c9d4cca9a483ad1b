//! Render model for the ranked top-K list.

use crate::core::format;

use super::types::TopKPrediction;

/// One bar row, ready for the component: bar widths are normalised to the
/// leading probability so the top entry always fills the track, while the
/// percent label keeps the absolute confidence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopKRow {
    pub class_name: String,
    pub percent_label: String,
    pub bar_width_pct: String,
}

pub fn topk_rows(entries: &[TopKPrediction]) -> Vec<TopKRow> {
    // Server order is descending, so the first entry carries the maximum.
    let max = entries
        .first()
        .map(|entry| entry.probability)
        .filter(|probability| *probability > 0.0)
        .unwrap_or(1.0);

    entries
        .iter()
        .map(|entry| TopKRow {
            class_name: entry.class_name.clone(),
            percent_label: format::format_percent(entry.probability),
            bar_width_pct: format!("{:.1}", entry.probability / max * 100.0),
        })
        .collect()
}
