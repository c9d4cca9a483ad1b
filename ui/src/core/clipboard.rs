//! Window-level paste listener for clipboard image intake.
//!
//! Clipboard sources often carry a MIME type but a blank or generic file
//! name, so the event forwards both and leaves normalisation to the
//! validator.

use futures_channel::mpsc::UnboundedSender;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{ClipboardEvent, File};

#[derive(Debug, Clone)]
pub enum PasteEvent {
    Image {
        name: String,
        mime: String,
        bytes: Vec<u8>,
    },
    Unreadable,
}

/// Attach a `paste` listener to the window for the lifetime of the session.
/// Non-image pastes are left alone so text fields keep working.
pub fn install_paste_listener(sender: UnboundedSender<PasteEvent>) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let closure = Closure::<dyn FnMut(ClipboardEvent)>::new(move |event: ClipboardEvent| {
        let Some(data) = event.clipboard_data() else {
            return;
        };

        let items = data.items();
        for index in 0..items.length() {
            let Some(item) = items.get(index) else {
                continue;
            };
            if item.kind() != "file" || !item.type_().starts_with("image/") {
                continue;
            }

            event.prevent_default();
            match item.get_as_file() {
                Ok(Some(file)) => forward_file(file, sender.clone()),
                _ => {
                    let _ = sender.unbounded_send(PasteEvent::Unreadable);
                }
            }
            return;
        }
    });

    if window
        .add_event_listener_with_callback("paste", closure.as_ref().unchecked_ref())
        .is_ok()
    {
        // The listener lives for the whole session; installed exactly once.
        closure.forget();
    }
}

fn forward_file(file: File, sender: UnboundedSender<PasteEvent>) {
    wasm_bindgen_futures::spawn_local(async move {
        let event = match JsFuture::from(file.array_buffer()).await {
            Ok(buffer) => {
                let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
                PasteEvent::Image {
                    name: file.name(),
                    mime: file.type_(),
                    bytes,
                }
            }
            Err(_) => PasteEvent::Unreadable,
        };
        let _ = sender.unbounded_send(event);
    });
}
