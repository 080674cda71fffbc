//! Wire entities for the two inference endpoints and the pure response
//! interpretation they share. Keeping interpretation separate from the HTTP
//! transport makes the error contract testable without a live server.

use serde::{Deserialize, Serialize};

use super::error::InferenceError;

/// Fallback when a failure body carries no `error` field
const GENERIC_PREDICT_FAILURE: &str = "Prediction failed";

/// `GET /health` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub model_loaded: bool,
}

impl HealthStatus {
    /// Whether the remote model is loaded and ready for requests
    pub fn is_ready(&self) -> bool {
        self.status == "healthy" && self.model_loaded
    }
}

/// One entry of the ranked class list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassPrediction {
    #[serde(rename = "class")]
    pub label: String,
    /// Probability in [0, 1]
    pub probability: f64,
    pub description: String,
}

/// Successful `POST /predict` body
///
/// `all_predictions` arrives sorted descending by probability and its first
/// entry matches `predicted_class`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Base64-encoded PNG/JPEG bytes of the analyzed image
    pub image: String,
    pub predicted_class: String,
    /// Confidence in [0, 1]
    pub confidence: f64,
    pub description: String,
    pub all_predictions: Vec<ClassPrediction>,
}

/// Interpret a predict response once status and body are known
pub fn interpret_predict_response(
    success: bool,
    body: &str,
) -> Result<PredictionResult, InferenceError> {
    if !success {
        return Err(InferenceError::Api(error_message_from_body(body)));
    }

    serde_json::from_str(body).map_err(|e| InferenceError::MalformedResponse(e.to_string()))
}

/// Parse a health response body
pub fn parse_health_body(body: &str) -> Result<HealthStatus, InferenceError> {
    serde_json::from_str(body).map_err(|e| InferenceError::MalformedResponse(e.to_string()))
}

/// Pull the `error` field out of a failure body. The field is optional and
/// the body may not even be JSON - both fall back to a generic message.
fn error_message_from_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("error")?.as_str().map(str::to_string))
        .unwrap_or_else(|| GENERIC_PREDICT_FAILURE.to_string())
}
