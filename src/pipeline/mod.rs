mod commands;
mod controller;
mod events;
mod selection;
mod state_manager;

// Public exports
pub use commands::PipelineCommand;
pub use controller::Controller;
pub use events::PipelineStateChanged;
pub use selection::{
    format_file_size, FileCandidate, FilePreview, RejectionReason, SelectedFile,
    ACCEPTED_MIME_TYPES, MAX_FILE_SIZE_BYTES,
};
pub use state_manager::{
    PipelineAction, PipelineEvent, PipelineState, PipelineStateManager, TransitionRejection,
    TransitionResult,
};
