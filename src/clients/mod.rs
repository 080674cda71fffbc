mod client;
mod error;
mod http;
mod response;

// Re-export public types
pub use client::InferenceApi;
pub use error::InferenceError;
pub use http::{HttpInferenceClient, DEFAULT_BASE_URL};
pub use response::{ClassPrediction, HealthStatus, PredictionResult};
