//! Small DOM helpers with no-op fallbacks outside the browser.

/// Forward a dropzone activation to the hidden file input.
#[cfg(target_arch = "wasm32")]
pub fn open_file_dialog(input_id: &str) {
    use wasm_bindgen::JsCast;

    let element = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(input_id));
    if let Some(input) = element.and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok()) {
        input.click();
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn open_file_dialog(_input_id: &str) {}

/// Clear the file input's value so picking the same file again still fires
/// a change event.
#[cfg(target_arch = "wasm32")]
pub fn reset_file_input(input_id: &str) {
    use wasm_bindgen::JsCast;

    let element = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(input_id));
    if let Some(input) = element.and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok()) {
        input.set_value("");
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn reset_file_input(_input_id: &str) {}
