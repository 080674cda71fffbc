//! Typesafe events for the pipeline module.
//!
//! These events are emitted from the controller as a single tagged stream
//! that any frontend can subscribe to and map onto its own view updates.

use serde::{Deserialize, Serialize};

use crate::render::ResultView;

use super::selection::FilePreview;

/// Pipeline state change event - single event stream for all transitions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum PipelineStateChanged {
    /// One-time informational notice (e.g. the remote model is ready)
    #[serde(rename = "notice")]
    Notice { message: String },
    /// A selection passed validation; preview is ready for display
    #[serde(rename = "fileAccepted")]
    FileAccepted { preview: FilePreview },
    /// A candidate was refused; pipeline state is untouched
    #[serde(rename = "fileRejected")]
    FileRejected {
        /// Technical rejection reason for debugging
        reason: String,
        /// User-friendly message
        #[serde(rename = "userMessage")]
        user_message: String,
    },
    /// The predict request was dispatched
    #[serde(rename = "submitting")]
    Submitting,
    /// Progress indicator update (cosmetic staging, see the progress module)
    #[serde(rename = "progress")]
    Progress {
        /// Active stage name, or None after a reset
        stage: Option<String>,
        percent: u8,
        message: String,
    },
    /// Analysis finished; the rendered result is ready
    #[serde(rename = "completed")]
    Completed { view: ResultView },
    /// The predict request failed; selection retained for retry
    #[serde(rename = "failed")]
    Failed {
        /// Technical error message for debugging
        #[serde(rename = "errorMessage")]
        error_message: String,
        /// User-friendly error message
        #[serde(rename = "userMessage")]
        user_message: String,
    },
    /// Selection and result were cleared
    #[serde(rename = "reset")]
    Reset,
}
