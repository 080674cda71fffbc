use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{debug, error, info, warn};
use tokio::sync::mpsc::{
    unbounded_channel, UnboundedReceiver, UnboundedSender, WeakUnboundedSender,
};

use crate::clients::{InferenceApi, InferenceError, PredictionResult};
use crate::progress::{ProgressReporter, ProgressSnapshot, ProgressStage};
use crate::render;

use super::commands::PipelineCommand;
use super::events::PipelineStateChanged;
use super::selection::{FileCandidate, SelectedFile};
use super::state_manager::{
    PipelineAction, PipelineEvent, PipelineStateManager, TransitionResult,
};

/// Cosmetic pacing between the pre-network progress stages
const DEFAULT_STAGE_PACING: Duration = Duration::from_millis(400);

/// Startup notice shown once when the remote model reports ready
const MODEL_READY_NOTICE: &str =
    "AI Model loaded successfully! Ready for satellite image analysis.";

/// Session data owned by the control loop
#[derive(Default)]
struct Session {
    file: Option<SelectedFile>,
    result: Option<PredictionResult>,
}

/// Drives the upload -> predict -> render pipeline.
///
/// Consumes commands from a channel one at a time; the predict request runs
/// on a worker thread so commands arriving while it is in flight are rejected
/// by the state machine instead of queued behind it.
pub struct Controller {
    command_rx: UnboundedReceiver<PipelineCommand>,
    /// Weak handle for predict workers only, so the loop still observes
    /// closure once every external sender is dropped
    command_tx: WeakUnboundedSender<PipelineCommand>,
    state_manager: Arc<PipelineStateManager>,
    api: Arc<dyn InferenceApi>,
    events: UnboundedSender<PipelineStateChanged>,
    stage_pacing: Duration,
}

impl Controller {
    /// Create a controller and the sender used to feed it commands
    pub fn new(
        api: Arc<dyn InferenceApi>,
        events: UnboundedSender<PipelineStateChanged>,
    ) -> (Self, UnboundedSender<PipelineCommand>) {
        let (command_tx, command_rx) = unbounded_channel();

        let controller = Controller {
            command_rx,
            command_tx: command_tx.downgrade(),
            state_manager: Arc::new(PipelineStateManager::new()),
            api,
            events,
            stage_pacing: DEFAULT_STAGE_PACING,
        };

        (controller, command_tx)
    }

    /// Override the cosmetic stage pacing (tests zero it out)
    pub fn with_stage_pacing(mut self, pacing: Duration) -> Self {
        self.stage_pacing = pacing;
        self
    }

    /// Shared handle to the state machine, for read access from outside
    pub fn state_manager(&self) -> Arc<PipelineStateManager> {
        Arc::clone(&self.state_manager)
    }

    /// Main control loop - consumes self, runs until every command sender is
    /// dropped. An in-flight predict keeps the loop alive just long enough
    /// for its completion to be processed.
    pub fn run(mut self) {
        self.check_server_health();

        let mut session = Session::default();

        while let Some(command) = self.command_rx.blocking_recv() {
            self.handle_command(command, &mut session);
        }
    }

    fn handle_command(&self, command: PipelineCommand, session: &mut Session) {
        // Selection is validated before it may touch pipeline state
        let command = match command {
            PipelineCommand::Select(candidate) => {
                self.handle_select(candidate, session);
                return;
            }
            other => other,
        };

        match self.state_manager.transition((&command).into()) {
            Ok(TransitionResult::Changed {
                action: Some(action),
                ..
            })
            | Ok(TransitionResult::Unchanged {
                action: Some(action),
            }) => self.execute_action(action, command, session),
            Ok(_) => {}
            Err(rejection) => match command {
                // A submit racing an in-flight request is an expected no-op
                PipelineCommand::Submit => debug!("{}", rejection),
                _ => warn!("{}", rejection),
            },
        }
    }

    fn handle_select(&self, candidate: FileCandidate, session: &mut Session) {
        let file = match SelectedFile::select(candidate) {
            Ok(file) => file,
            Err(reason) => {
                warn!("File rejected: {}", reason);
                self.emit(PipelineStateChanged::FileRejected {
                    reason: reason.to_string(),
                    user_message: reason.user_message(),
                });
                return;
            }
        };

        match self.state_manager.transition(PipelineEvent::Select) {
            Ok(TransitionResult::Changed { .. }) | Ok(TransitionResult::Unchanged { .. }) => {
                info!("File selected: {} ({} bytes)", file.name, file.size_bytes);
                let preview = file.preview();
                session.file = Some(file);
                self.emit(PipelineStateChanged::FileAccepted { preview });
            }
            Err(rejection) => warn!("{}", rejection),
        }
    }

    /// Execute action returned by the state machine
    fn execute_action(
        &self,
        action: PipelineAction,
        command: PipelineCommand,
        session: &mut Session,
    ) {
        match action {
            PipelineAction::StartPredict => self.start_predict(session),
            PipelineAction::PublishResult => {
                if let PipelineCommand::Finish(Ok(result)) = command {
                    self.publish_result(result, session);
                }
            }
            PipelineAction::ReportFailure => {
                if let PipelineCommand::Finish(Err(e)) = command {
                    self.report_failure(&e);
                }
            }
            PipelineAction::ClearSession => {
                if session.result.take().is_some() {
                    debug!("Discarding previous analysis result");
                }
                *session = Session::default();
                self.emit(PipelineStateChanged::Reset);
            }
            // Selection never reaches the generic path, see handle_select
            PipelineAction::ReplaceSelection => {}
        }
    }

    fn start_predict(&self, session: &mut Session) {
        let Some(file) = session.file.clone() else {
            // Submitting with no selection should be unreachable; recover
            error!("Submit with no selected file, resetting pipeline");
            self.state_manager.reset();
            return;
        };

        // The worker gets a strong sender so its completion is delivered
        // even when every external sender has already gone away
        let Some(command_tx) = self.command_tx.upgrade() else {
            debug!("Command channel closed, skipping predict");
            self.state_manager.reset();
            return;
        };

        self.emit(PipelineStateChanged::Submitting);

        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        let pacing = self.stage_pacing;

        thread::spawn(move || {
            let mut progress = ProgressReporter::new();

            send_progress(&events, progress.enter(ProgressStage::Uploading));
            thread::sleep(pacing);
            send_progress(&events, progress.enter(ProgressStage::Processing));
            thread::sleep(pacing);
            // The Analyzing stage spans the actual network wait
            send_progress(&events, progress.enter(ProgressStage::Analyzing));

            let outcome = api.predict(&file);

            match &outcome {
                Ok(_) => send_progress(&events, progress.enter(ProgressStage::Complete)),
                Err(e) => {
                    error!("Prediction failed: {}", e);
                    send_progress(&events, progress.reset());
                }
            }

            if command_tx.send(PipelineCommand::Finish(outcome)).is_err() {
                warn!("Controller stopped before predict completion");
            }
        });
    }

    fn publish_result(&self, result: PredictionResult, session: &mut Session) {
        let view = render::render(&result);
        info!(
            "Analysis complete: {} ({}%)",
            view.predicted_class, view.confidence_percent
        );
        session.result = Some(result);
        self.emit(PipelineStateChanged::Completed { view });
    }

    fn report_failure(&self, error: &InferenceError) {
        error!("Analysis failed: {}", error);
        self.emit(PipelineStateChanged::Failed {
            error_message: error.to_string(),
            user_message: error.user_message(),
        });
    }

    /// Best-effort startup probe. Failures are logged and swallowed; they
    /// never affect pipeline state or block usage.
    fn check_server_health(&self) {
        let api = Arc::clone(&self.api);
        let events = self.events.clone();

        thread::spawn(move || match api.check_health() {
            Ok(health) if health.is_ready() => {
                let _ = events.send(PipelineStateChanged::Notice {
                    message: MODEL_READY_NOTICE.to_string(),
                });
            }
            Ok(health) => debug!(
                "Inference server not ready: status={} model_loaded={}",
                health.status, health.model_loaded
            ),
            Err(e) => error!("Health check failed: {}", e),
        });
    }

    fn emit(&self, event: PipelineStateChanged) {
        if self.events.send(event).is_err() {
            debug!("No event listener attached");
        }
    }
}

fn send_progress(events: &UnboundedSender<PipelineStateChanged>, snapshot: ProgressSnapshot) {
    let _ = events.send(PipelineStateChanged::Progress {
        stage: snapshot.stage.map(|stage| stage.to_string()),
        percent: snapshot.percent,
        message: snapshot.message,
    });
}
