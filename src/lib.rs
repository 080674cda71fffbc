//! Terrasight - client pipeline for satellite land classification.
//!
//! Wires file selection, validation and preview to a remote inference
//! server (health check + multipart predict upload), renders the ranked
//! classification result, and drives a cosmetic staged progress indicator,
//! all through one explicit state machine.
//!
//! The interactive entry point is [`pipeline::Controller`]: feed it
//! [`pipeline::PipelineCommand`]s and subscribe to its
//! [`pipeline::PipelineStateChanged`] event stream. For non-interactive use
//! there is [`classify_file`].

pub mod clients;
pub mod error;
pub mod pipeline;
pub mod progress;
pub mod render;

pub use error::Error;

use std::path::Path;

use clients::{InferenceApi, PredictionResult};
use pipeline::SelectedFile;

/// One-shot classification of an on-disk image, outside the interactive
/// pipeline: read, validate and predict in a single call.
pub fn classify_file(
    api: &dyn InferenceApi,
    path: &Path,
) -> Result<PredictionResult, Error> {
    let file = SelectedFile::select_path(path)?;
    Ok(api.predict(&file)?)
}
