use crate::clients::{InferenceError, PredictionResult};

use super::selection::FileCandidate;
use super::state_manager::PipelineEvent;

/// Commands for driving the classification pipeline
/// These are sent through channels for zero-overhead internal communication
#[derive(Debug, Clone)]
pub enum PipelineCommand {
    /// A file was picked (click-to-browse or drag-drop); it is validated
    /// before it may touch pipeline state
    Select(FileCandidate),
    /// Analyze the current selection
    Submit,
    /// Clear selection and result, back to the empty state
    Reset,
    /// Internal: the predict worker finished (success or failure)
    Finish(Result<PredictionResult, InferenceError>),
}

impl From<&PipelineCommand> for PipelineEvent {
    fn from(command: &PipelineCommand) -> Self {
        match command {
            PipelineCommand::Select(_) => PipelineEvent::Select,
            PipelineCommand::Submit => PipelineEvent::Submit,
            PipelineCommand::Reset => PipelineEvent::Reset,
            PipelineCommand::Finish(Ok(_)) => PipelineEvent::Succeed,
            PipelineCommand::Finish(Err(_)) => PipelineEvent::Fail,
        }
    }
}
