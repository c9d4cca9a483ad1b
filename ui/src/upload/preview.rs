//! Preview generation: render the selected bytes to a data URL and verify
//! they actually decode as an image before anything is committed.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::validate::{ImageMime, ValidatedUpload, ValidationError};

/// Result of a successful preview cycle, ready to commit.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedPreview {
    pub bytes: Vec<u8>,
    pub preview_data_url: String,
}

pub fn data_url(mime: ImageMime, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime.as_str(), STANDARD.encode(bytes))
}

/// Render and pre-flight a validated upload. A payload that passed type
/// validation can still be corrupt or truncated; that failure surfaces as
/// `PreviewFailed` rather than a commit of an unrenderable selection.
pub async fn prepare(
    validated: &ValidatedUpload,
    bytes: Vec<u8>,
) -> Result<PreparedPreview, ValidationError> {
    let preview_data_url = data_url(validated.mime, &bytes);
    preflight_decode(&preview_data_url, &bytes).await?;
    Ok(PreparedPreview {
        bytes,
        preview_data_url,
    })
}

#[cfg(target_arch = "wasm32")]
async fn preflight_decode(preview_data_url: &str, _bytes: &[u8]) -> Result<(), ValidationError> {
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlImageElement;

    let image = HtmlImageElement::new().map_err(|_| ValidationError::PreviewFailed)?;
    image.set_src(preview_data_url);
    JsFuture::from(image.decode())
        .await
        .map(|_| ())
        .map_err(|_| ValidationError::PreviewFailed)
}

#[cfg(not(target_arch = "wasm32"))]
async fn preflight_decode(_preview_data_url: &str, bytes: &[u8]) -> Result<(), ValidationError> {
    image::load_from_memory(bytes)
        .map(|_| ())
        .map_err(|_| ValidationError::PreviewFailed)
}
