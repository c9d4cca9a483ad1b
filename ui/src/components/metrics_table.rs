use dioxus::prelude::*;

use crate::reports::{MetricsTable, MetricsView};

#[component]
pub fn MetricsPanel(view: MetricsView) -> Element {
    rsx! {
        div { class: "metrics-container",
            {match view {
                MetricsView::Message(message) => rsx! {
                    p { class: "metrics-message", "{message}" }
                },
                MetricsView::Table(table) => render_table(table),
            }}
        }
    }
}

fn render_table(table: MetricsTable) -> Element {
    rsx! {
        table { class: "metrics-table", aria_label: "Benchmark metrics by model",
            thead {
                tr {
                    th { "Metric" }
                    for column in table.columns.iter() {
                        th {
                            span { class: "model-badge",
                                span { class: if column.best_overall {
                                        "model-dot model-dot--best"
                                    } else {
                                        "model-dot model-dot--other"
                                    },
                                }
                                "{column.label}"
                            }
                        }
                    }
                }
            }
            tbody {
                for row in table.rows.iter() {
                    tr {
                        td { "{row.label}" }
                        for cell in row.cells.iter() {
                            td {
                                if let Some(value) = cell.value.as_ref() {
                                    span { class: if cell.best_in_row {
                                            "metric-val metric-val--best"
                                        } else {
                                            "metric-val"
                                        },
                                        "{value}"
                                    }
                                    span { class: "metric-unit", "%" }
                                } else {
                                    span { class: "metric-val", "—" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
