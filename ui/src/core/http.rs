//! Thin HTTP seam between the clients and the browser's `fetch`.
//!
//! The clients are generic over [`Transport`] so the retry and
//! error-normalisation pipeline can be exercised natively with a scripted
//! transport; the real [`FetchTransport`] only exists in the browser build.

use std::fmt;
use std::future::Future;

/// Raw response as the clients see it: status plus the body read as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A failure before any HTTP response arrived (connectivity, DNS, abort).
/// HTTP error statuses are *not* transport errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Multipart upload described portably; the wasm transport turns it into a
/// `FormData` with a `Blob` part named `file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadForm<'a> {
    pub file_name: &'a str,
    pub mime: &'a str,
    pub bytes: &'a [u8],
    pub fields: Vec<(&'static str, String)>,
}

pub trait Transport {
    fn post_upload(
        &self,
        url: &str,
        form: &UploadForm<'_>,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>>;

    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, TransportError>>;
}

/// Browser transport over `window.fetch`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

#[cfg(target_arch = "wasm32")]
mod imp {
    use super::{HttpResponse, Transport, TransportError, UploadForm};

    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Blob, BlobPropertyBag, FormData, RequestInit, Response};

    impl Transport for super::FetchTransport {
        async fn post_upload(
            &self,
            url: &str,
            form: &UploadForm<'_>,
        ) -> Result<HttpResponse, TransportError> {
            let form_data = build_form_data(form)?;
            let init = RequestInit::new();
            init.set_method("POST");
            init.set_body(&form_data);
            perform(url, &init).await
        }

        async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
            let init = RequestInit::new();
            init.set_method("GET");
            perform(url, &init).await
        }
    }

    fn build_form_data(form: &UploadForm<'_>) -> Result<FormData, TransportError> {
        let array = js_sys::Uint8Array::from(form.bytes);
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let opts = BlobPropertyBag::new();
        opts.set_type(form.mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| TransportError::new("Unable to build upload blob"))?;

        let form_data =
            FormData::new().map_err(|_| TransportError::new("Unable to build form data"))?;
        form_data
            .append_with_blob_and_filename("file", &blob, form.file_name)
            .map_err(|_| TransportError::new("Unable to attach upload"))?;
        for (name, value) in &form.fields {
            form_data
                .append_with_str(name, value)
                .map_err(|_| TransportError::new("Unable to attach form field"))?;
        }
        Ok(form_data)
    }

    async fn perform(url: &str, init: &RequestInit) -> Result<HttpResponse, TransportError> {
        let window =
            web_sys::window().ok_or_else(|| TransportError::new("window unavailable"))?;

        let response_value = JsFuture::from(window.fetch_with_str_and_init(url, init))
            .await
            .map_err(|err| TransportError::new(js_error_message(&err)))?;
        let response: Response = response_value
            .dyn_into()
            .map_err(|_| TransportError::new("fetch returned a non-Response value"))?;

        let status = response.status();
        let body_promise = response
            .text()
            .map_err(|err| TransportError::new(js_error_message(&err)))?;
        let body = JsFuture::from(body_promise)
            .await
            .map_err(|err| TransportError::new(js_error_message(&err)))?
            .as_string()
            .unwrap_or_default();

        Ok(HttpResponse { status, body })
    }

    /// Extract the browser's message (e.g. the literal "Failed to fetch")
    /// from a rejected fetch promise.
    fn js_error_message(err: &JsValue) -> String {
        if let Some(error) = err.dyn_ref::<js_sys::Error>() {
            return String::from(error.message());
        }
        err.as_string()
            .unwrap_or_else(|| "Network request failed".to_string())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use super::{HttpResponse, Transport, TransportError, UploadForm};

    // Server-side rendering compiles the views but never drives the network
    // from outside the browser.
    impl Transport for super::FetchTransport {
        async fn post_upload(
            &self,
            _url: &str,
            _form: &UploadForm<'_>,
        ) -> Result<HttpResponse, TransportError> {
            Err(TransportError::new(
                "network transport is only available in the browser",
            ))
        }

        async fn get(&self, _url: &str) -> Result<HttpResponse, TransportError> {
            Err(TransportError::new(
                "network transport is only available in the browser",
            ))
        }
    }
}
