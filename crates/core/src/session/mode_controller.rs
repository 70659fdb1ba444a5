use crate::masking::domain::mask_algorithm::MaskAlgorithm;
use crate::session::mode_command::ModeCommand;
use crate::session::recorder::Recorder;
use crate::session::session_state::SessionState;
use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;

/// What the live loop should do after a command has been applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// Applies keyboard commands to the session state.
///
/// Every transition happens synchronously, so its effect is visible to the
/// next frame processed.
pub struct ModeController {
    state: SessionState,
}

impl ModeController {
    pub fn new(recorder: Recorder) -> Self {
        Self {
            state: SessionState::new(recorder),
        }
    }

    /// Overrides the initial mask selection.
    pub fn with_mask(mut self, algorithm: MaskAlgorithm, enabled: bool) -> Self {
        self.state.mask_algorithm = algorithm;
        self.state.mask_enabled = enabled;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Routes a key press. Unbound keys are ignored.
    pub fn handle_key(&mut self, key: char, metadata: &VideoMetadata) -> LoopControl {
        match ModeCommand::from_key(key) {
            Some(command) => self.apply(command, metadata),
            None => LoopControl::Continue,
        }
    }

    /// `metadata` sizes the output stream when recording is switched on.
    pub fn apply(&mut self, command: ModeCommand, metadata: &VideoMetadata) -> LoopControl {
        match command {
            ModeCommand::SelectGaussian => self.select(MaskAlgorithm::Gaussian),
            ModeCommand::SelectMosaic => self.select(MaskAlgorithm::Mosaic),
            ModeCommand::ToggleMask => {
                self.state.mask_enabled = !self.state.mask_enabled;
                log::info!(
                    "Masking {}",
                    if self.state.mask_enabled { "enabled" } else { "disabled" }
                );
            }
            ModeCommand::ToggleRecording => {
                if self.state.is_recording() {
                    self.stop_recording();
                } else {
                    self.start_recording(metadata);
                }
            }
            ModeCommand::Quit => {
                self.stop_recording();
                return LoopControl::Quit;
            }
        }
        LoopControl::Continue
    }

    /// Appends a composited frame while recording is on.
    pub fn record(&mut self, frame: &Frame) {
        self.state.recorder.append(frame);
    }

    /// Releases the output stream if one is open. Safe to call repeatedly.
    pub fn shutdown(&mut self) {
        self.stop_recording();
    }

    fn select(&mut self, algorithm: MaskAlgorithm) {
        self.state.mask_algorithm = algorithm;
        self.state.mask_enabled = true;
        log::info!("Mask mode: {}", algorithm.label());
    }

    fn start_recording(&mut self, metadata: &VideoMetadata) {
        match self.state.recorder.start(metadata) {
            Ok(path) => log::info!("Recording started: {}", path.display()),
            Err(e) => log::warn!("Recording not started: {e}"),
        }
    }

    fn stop_recording(&mut self) {
        if let Some(path) = self.state.recorder.stop() {
            log::info!("Recording saved: {}", path.display());
        }
    }
}
