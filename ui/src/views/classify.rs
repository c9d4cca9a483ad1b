//! The single classification page: upload slot, prediction result panel,
//! and the benchmark reports panel.

use std::sync::Arc;

use dioxus::html::{FileEngine, HasFileData};
use dioxus::prelude::*;

use crate::components::{MetricsPanel, ReportFigurePanel, TopKList};
use crate::core::config;
use crate::core::format;
use crate::core::http::FetchTransport;
use crate::core::platform;
use crate::predict::{PredictionClient, PredictionError, PredictionResponse};
use crate::reports::{metrics_view, MetricsView, ReportsClient};
use crate::upload::{CommitOutcome, FileCandidate, SelectionController, ValidationError};

const FILE_INPUT_ID: &str = "file-input";

#[cfg(debug_assertions)]
fn log_prediction(model_id: &str, inference_ms: f64) {
    // Lightweight trace for diagnosing backend latency in dev builds.
    println!("[predict] {model_id} responded in {inference_ms:.2} ms");
}

#[component]
pub fn Classify() -> Element {
    let controller = use_signal(SelectionController::default);
    let error_banner = use_signal(|| Option::<String>::None);
    let busy = use_signal(|| false);
    let result = use_signal(|| Option::<PredictionResponse>::None);
    let model_id = use_signal(|| config::DEFAULT_MODEL_ID.to_string());
    let top_k = use_signal(|| config::DEFAULT_TOP_K.to_string());
    let drag_active = use_signal(|| false);

    // One fetch per session; the snapshot is cached for the page's lifetime
    // and model changes only re-run figure selection against it.
    let reports = use_resource(|| async move { ReportsClient::new(FetchTransport).load().await });

    // Clipboard paste feeds the same selection pipeline as browse and drop.
    #[cfg(target_arch = "wasm32")]
    {
        use crate::core::clipboard::{self, PasteEvent};
        use futures_util::StreamExt;

        let paste = use_coroutine(move |mut rx: UnboundedReceiver<PasteEvent>| {
            let mut error_signal = error_banner;
            async move {
                while let Some(event) = rx.next().await {
                    match event {
                        PasteEvent::Image { name, mime, bytes } => {
                            let candidate = FileCandidate {
                                name,
                                declared_mime: mime,
                                size_bytes: bytes.len() as u64,
                            };
                            run_selection(candidate, bytes, controller, error_banner).await;
                        }
                        PasteEvent::Unreadable => {
                            error_signal.set(Some(
                                "Clipboard image could not be read. Try copying it again."
                                    .to_string(),
                            ));
                        }
                    }
                }
            }
        });
        use_hook(move || clipboard::install_paste_listener(paste.tx()));
    }

    let pick_dropped_file = move |engine: Option<Arc<dyn FileEngine>>| {
        let Some(engine) = engine else {
            return;
        };
        spawn(async move {
            select_from_engine(engine, controller, error_banner).await;
        });
    };

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }

        let record = controller.with(|c| c.current().cloned());
        if record.is_none() {
            let mut error_signal = error_banner;
            error_signal.set(Some(PredictionError::NoSelection.user_message()));
            return;
        }

        let model = model_id();
        let requested_k = top_k()
            .trim()
            .parse::<u32>()
            .unwrap_or(config::DEFAULT_TOP_K)
            .clamp(config::TOP_K_MIN, config::TOP_K_MAX);

        let mut busy_signal = busy;
        let mut error_signal = error_banner;
        let mut result_signal = result;
        busy_signal.set(true);
        error_signal.set(None);

        spawn(async move {
            let client = PredictionClient::new(FetchTransport);
            match client.submit(record.as_ref(), &model, requested_k).await {
                Ok(response) => {
                    #[cfg(debug_assertions)]
                    log_prediction(&response.model_id, response.inference_ms);
                    result_signal.set(Some(response));
                }
                Err(err) => error_signal.set(Some(err.user_message())),
            }
            busy_signal.set(false);
        });
    };

    let selection = controller.with(|c| c.current().cloned());
    let prediction = result();
    let max_upload_mb = config::MAX_UPLOAD_BYTES / (1024 * 1024);
    let reports_snapshot = reports();

    rsx! {
        section { class: "page page-classify",
            h1 { "Snapjudge" }
            p { "Classify a PNG or JPEG with the trained CIFAR-10 models and compare their benchmark reports." }

            div { class: "classify__panels",
                form { class: "upload-form", id: "predict-form", onsubmit: on_submit,
                    div { class: "upload-form__controls",
                        label { r#for: "model-id", "Model" }
                        select {
                            id: "model-id",
                            value: "{model_id}",
                            onchange: {
                                let mut model_signal = model_id;
                                move |evt: FormEvent| model_signal.set(evt.value())
                            },
                            for (id, label) in config::MODEL_CHOICES.iter() {
                                option { value: "{id}", selected: *id == model_id(), "{label}" }
                            }
                        }

                        label { r#for: "top-k", "Top-K" }
                        input {
                            id: "top-k",
                            r#type: "number",
                            min: "{config::TOP_K_MIN}",
                            max: "{config::TOP_K_MAX}",
                            value: "{top_k}",
                            oninput: {
                                let mut top_k_signal = top_k;
                                move |evt: FormEvent| top_k_signal.set(evt.value())
                            },
                        }
                    }

                    div {
                        class: if drag_active() { "dropzone dropzone--active" } else { "dropzone" },
                        id: "dropzone",
                        tabindex: 0,
                        role: "button",
                        aria_label: "Upload an image",
                        onclick: move |_| platform::open_file_dialog(FILE_INPUT_ID),
                        onkeydown: move |evt| {
                            let key = evt.key().to_string().to_lowercase();
                            if key == "enter" || key == " " || key == "space" || key == "spacebar" {
                                evt.prevent_default();
                                platform::open_file_dialog(FILE_INPUT_ID);
                            }
                        },
                        ondragenter: {
                            let mut drag_signal = drag_active;
                            move |evt: DragEvent| {
                                evt.prevent_default();
                                drag_signal.set(true);
                            }
                        },
                        ondragover: {
                            let mut drag_signal = drag_active;
                            move |evt: DragEvent| {
                                evt.prevent_default();
                                drag_signal.set(true);
                            }
                        },
                        ondragleave: {
                            let mut drag_signal = drag_active;
                            move |evt: DragEvent| {
                                evt.prevent_default();
                                drag_signal.set(false);
                            }
                        },
                        ondrop: {
                            let mut drag_signal = drag_active;
                            move |evt: DragEvent| {
                                evt.prevent_default();
                                drag_signal.set(false);
                                pick_dropped_file(evt.files());
                            }
                        },

                        p { class: "dropzone__hint",
                            "Drop a PNG or JPEG here, click to browse, or paste from the clipboard (max {max_upload_mb} MB)."
                        }

                        if let Some(record) = selection.as_ref() {
                            div { class: "dropzone__preview",
                                img {
                                    class: "dropzone__preview-image",
                                    src: "{record.preview_data_url}",
                                    alt: "Selected image preview",
                                }
                                span { class: "dropzone__file-name",
                                    "{record.display_name} ({format::format_size(record.size_bytes)})"
                                }
                            }
                        }
                    }

                    input {
                        id: FILE_INPUT_ID,
                        class: "upload-form__input",
                        r#type: "file",
                        accept: ".png,.jpg,.jpeg",
                        onchange: move |evt: FormEvent| {
                            pick_dropped_file(evt.files());
                            // Allow picking the same file again.
                            platform::reset_file_input(FILE_INPUT_ID);
                        },
                    }

                    button {
                        r#type: "submit",
                        class: "button button--primary upload-form__submit",
                        id: "predict-btn",
                        disabled: busy(),
                        if busy() { "Running..." } else { "Run Inference" }
                    }

                    if let Some(message) = error_banner() {
                        div { class: "error-banner", role: "alert", "⚠️ {message}" }
                    }
                }

                section { class: "result-panel",
                    if let Some(prediction) = prediction.as_ref() {
                        div { class: "result-panel__content",
                            h2 { class: "result-panel__class", "{prediction.predicted_class}" }
                            p { class: "result-panel__confidence",
                                "{format::format_percent(prediction.confidence)} confidence · {prediction.model_id}"
                            }
                            span { class: "result-panel__latency",
                                "{format::format_ms(prediction.inference_ms)}"
                            }
                            TopKList { entries: prediction.top_k.clone() }
                        }
                    } else {
                        p { class: "result-panel__empty",
                            "Run an inference to see the ranked predictions."
                        }
                    }
                }
            }

            section { class: "reports",
                h2 { "Benchmark reports" }
                {match reports_snapshot {
                    None => rsx! {
                        p { class: "metrics-message", "Loading benchmark metrics…" }
                    },
                    Some(Ok(snapshot)) => rsx! {
                        MetricsPanel { view: metrics_view(snapshot.metrics.as_ref()) }
                        ReportFigurePanel {
                            model_id: model_id(),
                            figures: snapshot.figures.clone(),
                        }
                    },
                    Some(Err(err)) => rsx! {
                        MetricsPanel { view: MetricsView::Message(err.to_string()) }
                        figure { class: "report-figure",
                            figcaption { class: "report-figure__caption report-figure__caption--empty",
                                "Figure unavailable."
                            }
                        }
                    },
                }}
            }
        }
    }
}

/// Pull the first file out of a browse/drop file engine and run it through
/// the selection pipeline. A drop without files is a silent no-op.
async fn select_from_engine(
    engine: Arc<dyn FileEngine>,
    controller: Signal<SelectionController>,
    error_banner: Signal<Option<String>>,
) {
    let Some(name) = engine.files().into_iter().next() else {
        return;
    };

    match engine.read_file(&name).await {
        Some(bytes) => {
            let candidate = FileCandidate {
                // Browse/drop sources rarely expose a MIME type here; the
                // validator falls back to extension sniffing.
                name,
                declared_mime: String::new(),
                size_bytes: bytes.len() as u64,
            };
            run_selection(candidate, bytes, controller, error_banner).await;
        }
        None => {
            let mut error_signal = error_banner;
            error_signal.set(Some(ValidationError::Unreadable.to_string()));
        }
    }
}

/// Validate, preview, and commit one candidate. Only the newest in-flight
/// attempt may commit; a stale success is dropped silently, while a preview
/// failure is always surfaced so the user knows their latest action failed.
async fn run_selection(
    candidate: FileCandidate,
    bytes: Vec<u8>,
    mut controller: Signal<SelectionController>,
    mut error_banner: Signal<Option<String>>,
) {
    let ticket = match controller.with_mut(|c| c.begin(&candidate)) {
        Ok(ticket) => ticket,
        Err(err) => {
            error_banner.set(Some(err.to_string()));
            return;
        }
    };

    match crate::upload::preview::prepare(ticket.validated(), bytes).await {
        Ok(prepared) => {
            if controller.with_mut(|c| c.commit(ticket, prepared)) == CommitOutcome::Committed {
                error_banner.set(None);
            }
        }
        Err(err) => error_banner.set(Some(err.to_string())),
    }
}
