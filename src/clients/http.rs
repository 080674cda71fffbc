use log::{error, warn};

use crate::pipeline::SelectedFile;

use super::client::InferenceApi;
use super::error::InferenceError;
use super::response::{self, HealthStatus, PredictionResult};

/// Default address of the inference server's development deployment
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// HTTP client for the inference server
pub struct HttpInferenceClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl HttpInferenceClient {
    /// Create a client against the given base URL.
    ///
    /// The predict call has no timeout: the request waits indefinitely for
    /// the server, matching the single-flight submission contract.
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(Option::<std::time::Duration>::None)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client, using defaults: {}", e);
                reqwest::blocking::Client::new()
            });

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }

    fn predict_url(&self) -> String {
        format!("{}/predict", self.base_url)
    }

    /// Build the multipart form with the single `file` field
    fn build_form(
        &self,
        file: &SelectedFile,
    ) -> Result<reqwest::blocking::multipart::Form, InferenceError> {
        let part = reqwest::blocking::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| {
                InferenceError::Transport(format!("Failed to create file part: {}", e))
            })?;

        Ok(reqwest::blocking::multipart::Form::new().part("file", part))
    }
}

impl Default for HttpInferenceClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl InferenceApi for HttpInferenceClient {
    fn check_health(&self) -> Result<HealthStatus, InferenceError> {
        let response = self
            .http
            .get(self.health_url())
            .send()
            .map_err(|e| InferenceError::Transport(e.to_string()))?;

        let body = response
            .text()
            .map_err(|e| InferenceError::Transport(e.to_string()))?;

        response::parse_health_body(&body)
    }

    fn predict(&self, file: &SelectedFile) -> Result<PredictionResult, InferenceError> {
        let form = self.build_form(file)?;

        let response = self
            .http
            .post(self.predict_url())
            .multipart(form)
            .send()
            .map_err(|e| {
                error!("Predict request failed: {}", e);
                InferenceError::Transport(e.to_string())
            })?;

        let success = response.status().is_success();
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| InferenceError::Transport(e.to_string()))?;

        if !success {
            error!("Predict returned failure status {}", status);
        }

        response::interpret_predict_response(success, &body)
    }
}
