use crate::pipeline::SelectedFile;

use super::error::InferenceError;
use super::response::{HealthStatus, PredictionResult};

/// Trait for the inference server API
///
/// The controller only talks to the server through this seam, so tests can
/// substitute a mock and the HTTP transport stays in one place.
pub trait InferenceApi: Send + Sync {
    /// Best-effort readiness probe, used for a one-time startup notice
    fn check_health(&self) -> Result<HealthStatus, InferenceError>;

    /// Upload the selected image and await its classification. May take
    /// arbitrarily long; callers must not issue a second concurrent predict.
    fn predict(&self, file: &SelectedFile) -> Result<PredictionResult, InferenceError>;
}
