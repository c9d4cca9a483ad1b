//! Service-contract constants for the classification backend.

pub const PREDICT_ENDPOINT: &str = "/api/v1/predict";
pub const REPORTS_ENDPOINT: &str = "/api/v1/reports";

/// Model choices offered by the selector, as `(wire id, display label)`.
pub const MODEL_CHOICES: [(&str, &str); 2] = [
    ("cnnv2", "CNN V2"),
    ("baseline", "Baseline CNN"),
];

pub const DEFAULT_MODEL_ID: &str = "cnnv2";

/// The service validates `top_k` with `1 <= top_k <= 10`.
pub const TOP_K_MIN: u32 = 1;
pub const TOP_K_MAX: u32 = 10;
pub const DEFAULT_TOP_K: u32 = 5;

/// Upload cap enforced server-side (HTTP 413); shown in the dropzone hint.
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Human label for a model id; unknown ids pass through verbatim.
pub fn model_display_name(model_id: &str) -> &str {
    MODEL_CHOICES
        .iter()
        .find(|(id, _)| *id == model_id)
        .map(|(_, label)| *label)
        .unwrap_or(model_id)
}
