use dioxus::prelude::*;

use crate::reports::{missing_figure_caption, select_figure, ReportFigure};

/// Shows the cached figure matching the selected model, or a model-specific
/// "no figure" caption with the image cleared.
#[component]
pub fn ReportFigurePanel(model_id: String, figures: Vec<ReportFigure>) -> Element {
    let selected = select_figure(&model_id, &figures).cloned();

    rsx! {
        figure { class: "report-figure",
            {match selected {
                Some(figure) => rsx! {
                    img {
                        class: "report-figure__image",
                        src: "{figure.url}",
                        alt: "{figure.name}",
                    }
                    figcaption { class: "report-figure__caption", "{figure.name}" }
                },
                None => rsx! {
                    figcaption { class: "report-figure__caption report-figure__caption--empty",
                        "{missing_figure_caption(&model_id)}"
                    }
                },
            }}
        }
    }
}
