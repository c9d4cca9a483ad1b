pub mod client;
pub mod topk;
pub mod types;

pub use client::{PredictionClient, PredictionError};
pub use topk::{topk_rows, TopKRow};
pub use types::{PredictionResponse, TopKPrediction};
