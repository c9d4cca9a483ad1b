mod classify;
pub use classify::Classify;
