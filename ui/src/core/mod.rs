pub mod config;
pub mod format;
pub mod http;
pub mod platform;

#[cfg(target_arch = "wasm32")]
pub mod clipboard;
