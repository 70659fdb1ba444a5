use crate::masking::domain::mask_algorithm::MaskAlgorithm;
use crate::session::recorder::Recorder;

/// Control variables that govern how each frame is processed.
///
/// Recording is reported from the recorder itself, so there is no separate
/// flag that could disagree with whether an output stream is open.
pub struct SessionState {
    pub(super) mask_algorithm: MaskAlgorithm,
    pub(super) mask_enabled: bool,
    pub(super) recorder: Recorder,
}

impl SessionState {
    /// Initial state: gaussian masking enabled, not recording.
    pub fn new(recorder: Recorder) -> Self {
        Self {
            mask_algorithm: MaskAlgorithm::Gaussian,
            mask_enabled: true,
            recorder,
        }
    }

    pub fn mask_algorithm(&self) -> MaskAlgorithm {
        self.mask_algorithm
    }

    pub fn mask_enabled(&self) -> bool {
        self.mask_enabled
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    /// `Mask: <GAUSSIAN|MOSAIC|OFF> | Rec: <REC|OFF>`
    pub fn status_line(&self) -> String {
        let mask = if self.mask_enabled {
            self.mask_algorithm.label()
        } else {
            "OFF"
        };
        let rec = if self.is_recording() { "REC" } else { "OFF" };
        format!("Mask: {mask} | Rec: {rec}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::recorder::WriterFactory;
    use crate::video::infrastructure::ffmpeg_writer::FfmpegWriter;
    use rstest::rstest;

    fn state() -> SessionState {
        let factory: WriterFactory = Box::new(|| Box::new(FfmpegWriter::new()));
        SessionState::new(Recorder::new("unused", factory))
    }

    #[test]
    fn test_initial_state() {
        let state = state();
        assert_eq!(state.mask_algorithm(), MaskAlgorithm::Gaussian);
        assert!(state.mask_enabled());
        assert!(!state.is_recording());
    }

    #[rstest]
    #[case(MaskAlgorithm::Gaussian, true, "Mask: GAUSSIAN | Rec: OFF")]
    #[case(MaskAlgorithm::Mosaic, true, "Mask: MOSAIC | Rec: OFF")]
    #[case(MaskAlgorithm::Mosaic, false, "Mask: OFF | Rec: OFF")]
    fn test_status_line(
        #[case] algorithm: MaskAlgorithm,
        #[case] enabled: bool,
        #[case] expected: &str,
    ) {
        let mut state = state();
        state.mask_algorithm = algorithm;
        state.mask_enabled = enabled;
        assert_eq!(state.status_line(), expected);
    }
}
