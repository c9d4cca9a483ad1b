//! Wire types for the predict endpoint. Field names match the service
//! contract; payloads are returned to the caller undisturbed.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopKPrediction {
    pub class_name: String,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub model_id: String,
    pub predicted_class: String,
    pub confidence: f64,
    /// Rank-ordered by the server; order is authoritative.
    pub top_k: Vec<TopKPrediction>,
    pub inference_ms: f64,
    #[serde(default)]
    pub request_id: Option<String>,
}
