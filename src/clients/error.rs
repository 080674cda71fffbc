#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InferenceError {
    /// No response at all from the predict endpoint
    #[error("No response from inference server: {0}")]
    Transport(String),
    /// The server answered with a failure status; message comes from the
    /// body's `error` field or a generic fallback
    #[error("Inference server error: {0}")]
    Api(String),
    /// A success response whose body did not parse
    #[error("Malformed inference response: {0}")]
    MalformedResponse(String),
}

impl InferenceError {
    /// Returns a user-friendly error message suitable for display in the UI
    pub fn user_message(&self) -> String {
        match self {
            InferenceError::Transport(_) => {
                "Could not reach the analysis server. Please try again.".to_string()
            }
            InferenceError::Api(msg) => {
                format!("Analysis failed: {}", msg)
            }
            InferenceError::MalformedResponse(_) => {
                "The analysis server returned an unexpected response. Please try again."
                    .to_string()
            }
        }
    }
}
