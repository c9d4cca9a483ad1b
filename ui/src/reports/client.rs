//! Benchmark report fetch: one request per session, cached snapshot.

use serde::Deserialize;
use thiserror::Error;

use crate::core::config;
use crate::core::http::Transport;

const GENERIC_FAILURE: &str = "Failed loading reports.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportsError {
    #[error("{0}")]
    Transport(String),
    #[error("{detail}")]
    Http { status: u16, detail: String },
    #[error("{0}")]
    Malformed(String),
}

/// Per-model benchmark row. Missing numeric fields are valid and render as
/// "no value", never as zero.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelMetrics {
    pub model: String,
    #[serde(default)]
    pub test_accuracy: Option<f64>,
    #[serde(default)]
    pub test_precision_macro: Option<f64>,
    #[serde(default)]
    pub test_recall_macro: Option<f64>,
    #[serde(default)]
    pub test_f1_macro: Option<f64>,
}

/// The metrics payload is either a status message (artifacts missing or
/// invalid on the server) or a per-model table. Status must be tried first:
/// a table payload never carries a `status` field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ReportMetrics {
    Status {
        status: String,
        #[serde(default)]
        message: Option<String>,
    },
    Table {
        #[serde(default)]
        models: Vec<ModelMetrics>,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportFigure {
    pub name: String,
    pub url: String,
}

/// Fetched once at startup and treated as read-only for the session; a
/// fresh page load is the only refresh path.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportsSnapshot {
    #[serde(default)]
    pub metrics: Option<ReportMetrics>,
    #[serde(default)]
    pub figures: Vec<ReportFigure>,
}

pub struct ReportsClient<T: Transport> {
    transport: T,
}

impl<T: Transport> ReportsClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub async fn load(&self) -> Result<ReportsSnapshot, ReportsError> {
        let response = self
            .transport
            .get(config::REPORTS_ENDPOINT)
            .await
            .map_err(|err| ReportsError::Transport(err.message))?;

        if !response.is_success() {
            return Err(ReportsError::Http {
                status: response.status,
                detail: error_detail(&response.body),
            });
        }

        serde_json::from_str(&response.body)
            .map_err(|err| ReportsError::Malformed(err.to_string()))
    }
}

fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("detail")
                .and_then(|detail| detail.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::http::{HttpResponse, TransportError, UploadForm};

    use futures::executor::block_on;
    use std::cell::RefCell;

    struct OneShotTransport {
        response: RefCell<Option<Result<HttpResponse, TransportError>>>,
    }

    impl OneShotTransport {
        fn new(response: Result<HttpResponse, TransportError>) -> Self {
            Self {
                response: RefCell::new(Some(response)),
            }
        }
    }

    impl Transport for OneShotTransport {
        async fn post_upload(
            &self,
            _url: &str,
            _form: &UploadForm<'_>,
        ) -> Result<HttpResponse, TransportError> {
            Err(TransportError::new("unexpected post"))
        }

        async fn get(&self, _url: &str) -> Result<HttpResponse, TransportError> {
            self.response
                .borrow_mut()
                .take()
                .unwrap_or_else(|| Err(TransportError::new("already consumed")))
        }
    }

    #[test]
    fn decodes_a_model_table() {
        let body = serde_json::json!({
            "metrics": {"models": [
                {"model": "baseline", "test_accuracy": 0.71},
                {"model": "cnnv2", "test_accuracy": 0.84, "test_f1_macro": 0.83},
            ]},
            "figures": [
                {"name": "Confusion Matrix CNNV2", "url": "/reports-assets/figures/confusion_matrix_cnnv2.png"},
            ],
        })
        .to_string();
        let client = ReportsClient::new(OneShotTransport::new(Ok(HttpResponse {
            status: 200,
            body,
        })));

        let snapshot = block_on(client.load()).unwrap();
        match snapshot.metrics.unwrap() {
            ReportMetrics::Table { models } => {
                assert_eq!(models.len(), 2);
                assert_eq!(models[1].model, "cnnv2");
                assert_eq!(models[0].test_f1_macro, None);
            }
            other => panic!("expected table, got {other:?}"),
        }
        assert_eq!(snapshot.figures.len(), 1);
    }

    #[test]
    fn decodes_a_status_payload() {
        let body = r#"{"metrics":{"status":"missing","message":"No results yet."},"figures":[]}"#;
        let client = ReportsClient::new(OneShotTransport::new(Ok(HttpResponse {
            status: 200,
            body: body.into(),
        })));

        let snapshot = block_on(client.load()).unwrap();
        assert_eq!(
            snapshot.metrics.unwrap(),
            ReportMetrics::Status {
                status: "missing".into(),
                message: Some("No results yet.".into()),
            }
        );
    }

    #[test]
    fn http_error_surfaces_server_detail() {
        let client = ReportsClient::new(OneShotTransport::new(Ok(HttpResponse {
            status: 503,
            body: r#"{"detail":"reports are warming up"}"#.into(),
        })));

        let err = block_on(client.load()).unwrap_err();
        assert_eq!(err.to_string(), "reports are warming up");
    }

    #[test]
    fn http_error_without_detail_gets_generic_message() {
        let client = ReportsClient::new(OneShotTransport::new(Ok(HttpResponse {
            status: 500,
            body: "<html>oops</html>".into(),
        })));

        let err = block_on(client.load()).unwrap_err();
        assert_eq!(err.to_string(), GENERIC_FAILURE);
    }

    #[test]
    fn malformed_success_body_is_reported() {
        let client = ReportsClient::new(OneShotTransport::new(Ok(HttpResponse {
            status: 200,
            body: "not json".into(),
        })));

        let err = block_on(client.load()).unwrap_err();
        assert!(matches!(err, ReportsError::Malformed(_)));
    }
}
