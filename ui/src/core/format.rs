//! Formatting helpers for presenting predictions and file info.

pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

pub fn format_ms(value: f64) -> String {
    format!("{value:.2} ms")
}

pub fn format_size(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}
