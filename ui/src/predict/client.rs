//! Upload/predict request pipeline: multipart build, bounded retry, and
//! error normalisation into a single result shape.

use thiserror::Error;

use crate::core::config;
use crate::core::http::{HttpResponse, Transport, UploadForm};
use crate::upload::SelectionRecord;

use super::types::PredictionResponse;

/// Retry policy: one retry, transport failures only. HTTP error responses
/// are final on the first attempt.
const MAX_ATTEMPTS: u32 = 2;

/// The browser's generic network-failure message. Indistinguishable from a
/// dozen unrelated causes, so it is rewritten into something actionable.
const GENERIC_FETCH_FAILURE: &str = "Failed to fetch";
const FETCH_FAILURE_HINT: &str =
    "Upload failed while sending the image. Please select the image again and retry.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("Select an image before running inference.")]
    NoSelection,
    #[error("{0}")]
    Transport(String),
    #[error("{detail}")]
    Http { status: u16, detail: String },
    #[error("{0}")]
    Malformed(String),
}

impl PredictionError {
    /// Banner text for the user; applies the "Failed to fetch" rewrite.
    pub fn user_message(&self) -> String {
        match self {
            PredictionError::Transport(message) if message == GENERIC_FETCH_FAILURE => {
                FETCH_FAILURE_HINT.to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Tolerant decode of an HTTP error body: structured `{detail}` payloads,
/// plain-text bodies, or nothing usable at all.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ErrorBody {
    Structured(String),
    Raw(String),
}

fn decode_error_body(body: &str) -> Option<ErrorBody> {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        // Structured but without a usable detail field: fall through to the
        // generic message rather than echoing raw JSON.
        Ok(value) => value
            .get("detail")
            .and_then(|detail| detail.as_str())
            .map(|detail| ErrorBody::Structured(detail.to_string())),
        Err(_) => Some(ErrorBody::Raw(body.to_string())),
    }
}

fn error_detail(status: u16, body: &str) -> String {
    match decode_error_body(body) {
        Some(ErrorBody::Structured(detail)) => detail,
        Some(ErrorBody::Raw(text)) => text,
        None => format!("Prediction failed ({status})."),
    }
}

pub struct PredictionClient<T: Transport> {
    transport: T,
}

impl<T: Transport> PredictionClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Submit the committed selection. Fails with `NoSelection` before any
    /// network call when nothing is committed.
    pub async fn submit(
        &self,
        record: Option<&SelectionRecord>,
        model_id: &str,
        top_k: u32,
    ) -> Result<PredictionResponse, PredictionError> {
        let record = record.ok_or(PredictionError::NoSelection)?;

        let form = UploadForm {
            file_name: &record.display_name,
            mime: record.mime.as_str(),
            bytes: &record.bytes,
            fields: vec![
                ("model_id", model_id.to_string()),
                ("top_k", top_k.to_string()),
            ],
        };

        let response = self.post_with_retry(&form).await?;
        if !response.is_success() {
            return Err(PredictionError::Http {
                status: response.status,
                detail: error_detail(response.status, &response.body),
            });
        }

        serde_json::from_str(&response.body)
            .map_err(|err| PredictionError::Malformed(err.to_string()))
    }

    async fn post_with_retry(
        &self,
        form: &UploadForm<'_>,
    ) -> Result<HttpResponse, PredictionError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self
                .transport
                .post_upload(config::PREDICT_ENDPOINT, form)
                .await
            {
                Ok(response) => return Ok(response),
                Err(_) if attempt < MAX_ATTEMPTS => continue,
                // Exhausted: the latest failure is the one surfaced.
                Err(err) => return Err(PredictionError::Transport(err.message)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::http::TransportError;
    use crate::upload::ImageMime;

    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    struct ScriptedTransport {
        responses: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
        post_calls: Cell<u32>,
    }

    impl ScriptedTransport {
        fn new(responses: Vec<Result<HttpResponse, TransportError>>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
                post_calls: Cell::new(0),
            }
        }
    }

    impl Transport for ScriptedTransport {
        async fn post_upload(
            &self,
            _url: &str,
            _form: &UploadForm<'_>,
        ) -> Result<HttpResponse, TransportError> {
            self.post_calls.set(self.post_calls.get() + 1);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::new("script exhausted")))
        }

        async fn get(&self, _url: &str) -> Result<HttpResponse, TransportError> {
            Err(TransportError::new("unexpected get"))
        }
    }

    fn record() -> SelectionRecord {
        SelectionRecord {
            bytes: vec![1, 2, 3],
            display_name: "photo.png".into(),
            size_bytes: 3,
            preview_data_url: "data:image/png;base64,AQID".into(),
            mime: ImageMime::Png,
        }
    }

    fn ok_body() -> String {
        serde_json::json!({
            "model_id": "cnnv2",
            "predicted_class": "cat",
            "confidence": 0.91,
            "top_k": [
                {"class_name": "cat", "probability": 0.91},
                {"class_name": "dog", "probability": 0.05},
            ],
            "inference_ms": 4.2,
            "request_id": "req-1",
        })
        .to_string()
    }

    #[test]
    fn no_selection_fails_without_a_network_call() {
        let transport = ScriptedTransport::new(vec![]);
        let client = PredictionClient::new(transport);

        let err = block_on(client.submit(None, "cnnv2", 5)).unwrap_err();
        assert_eq!(err, PredictionError::NoSelection);
        assert_eq!(client.transport.post_calls.get(), 0);
    }

    #[test]
    fn success_payload_is_returned_undisturbed() {
        let transport = ScriptedTransport::new(vec![Ok(HttpResponse {
            status: 200,
            body: ok_body(),
        })]);
        let client = PredictionClient::new(transport);

        let result = block_on(client.submit(Some(&record()), "cnnv2", 5)).unwrap();
        assert_eq!(result.predicted_class, "cat");
        assert_eq!(result.top_k.len(), 2);
        assert_eq!(result.top_k[0].class_name, "cat");
        assert_eq!(result.request_id.as_deref(), Some("req-1"));
    }

    #[test]
    fn retries_once_on_transport_failure() {
        let transport = ScriptedTransport::new(vec![
            Err(TransportError::new("connection reset")),
            Ok(HttpResponse {
                status: 200,
                body: ok_body(),
            }),
        ]);
        let client = PredictionClient::new(transport);

        let result = block_on(client.submit(Some(&record()), "cnnv2", 5));
        assert!(result.is_ok());
        assert_eq!(client.transport.post_calls.get(), 2);
    }

    #[test]
    fn second_transport_failure_is_surfaced() {
        let transport = ScriptedTransport::new(vec![
            Err(TransportError::new("first failure")),
            Err(TransportError::new("second failure")),
        ]);
        let client = PredictionClient::new(transport);

        let err = block_on(client.submit(Some(&record()), "cnnv2", 5)).unwrap_err();
        assert_eq!(err, PredictionError::Transport("second failure".into()));
        assert_eq!(client.transport.post_calls.get(), 2);
    }

    #[test]
    fn http_errors_are_not_retried() {
        let transport = ScriptedTransport::new(vec![Ok(HttpResponse {
            status: 500,
            body: String::new(),
        })]);
        let client = PredictionClient::new(transport);

        let err = block_on(client.submit(Some(&record()), "cnnv2", 5)).unwrap_err();
        assert_eq!(
            err,
            PredictionError::Http {
                status: 500,
                detail: "Prediction failed (500).".into()
            }
        );
        assert_eq!(client.transport.post_calls.get(), 1);
    }

    #[test]
    fn structured_detail_is_surfaced() {
        let transport = ScriptedTransport::new(vec![Ok(HttpResponse {
            status: 500,
            body: r#"{"detail":"model unavailable"}"#.into(),
        })]);
        let client = PredictionClient::new(transport);

        let err = block_on(client.submit(Some(&record()), "cnnv2", 5)).unwrap_err();
        assert_eq!(err.user_message(), "model unavailable");
    }

    #[test]
    fn plain_text_bodies_are_surfaced_verbatim() {
        let transport = ScriptedTransport::new(vec![Ok(HttpResponse {
            status: 500,
            body: "internal error".into(),
        })]);
        let client = PredictionClient::new(transport);

        let err = block_on(client.submit(Some(&record()), "cnnv2", 5)).unwrap_err();
        assert_eq!(err.user_message(), "internal error");
    }

    #[test]
    fn json_without_detail_falls_back_to_generic() {
        assert_eq!(
            error_detail(503, r#"{"error":"nope"}"#),
            "Prediction failed (503)."
        );
    }

    #[test]
    fn generic_fetch_failure_is_rewritten() {
        let err = PredictionError::Transport("Failed to fetch".into());
        assert_eq!(err.user_message(), FETCH_FAILURE_HINT);

        let other = PredictionError::Transport("connection reset".into());
        assert_eq!(other.user_message(), "connection reset");
    }

    #[test]
    fn malformed_success_payload_is_reported() {
        let transport = ScriptedTransport::new(vec![Ok(HttpResponse {
            status: 200,
            body: "not json".into(),
        })]);
        let client = PredictionClient::new(transport);

        let err = block_on(client.submit(Some(&record()), "cnnv2", 5)).unwrap_err();
        assert!(matches!(err, PredictionError::Malformed(_)));
    }
}
