use dioxus::prelude::*;

use crate::predict::{topk_rows, TopKPrediction};

#[component]
pub fn TopKList(entries: Vec<TopKPrediction>) -> Element {
    let rows = topk_rows(&entries);

    rsx! {
        ul { class: "topk-list",
            for row in rows.into_iter() {
                li { class: "topk-row",
                    div { class: "topk-label",
                        span { class: "topk-name", "{row.class_name}" }
                        span { class: "topk-pct", "{row.percent_label}" }
                    }
                    div { class: "topk-bar-track",
                        div {
                            class: "topk-bar",
                            style: "width: {row.bar_width_pct}%",
                        }
                    }
                }
            }
        }
    }
}
