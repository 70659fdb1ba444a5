use std::time::Instant;

use ndarray::s;

use crate::detection::domain::face_detector::FaceDetector;
use crate::masking::domain::mask_sizing::MaskSizing;
use crate::masking::domain::region_masker::RegionMasker;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::session::session_state::SessionState;
use crate::shared::constants::{NO_FACE_ORIGIN, NO_FACE_TEXT, STATUS_MARGIN};
use crate::shared::frame::Frame;
use crate::video::domain::text_overlay::{TextOverlay, TextStyle};

/// Per-frame processing: mirror, detect, and mask faces in place.
pub struct FramePipeline {
    detector: Box<dyn FaceDetector>,
    masker: Box<dyn RegionMasker>,
    overlay: Box<dyn TextOverlay>,
    mirror: bool,
}

impl FramePipeline {
    pub fn new(
        detector: Box<dyn FaceDetector>,
        masker: Box<dyn RegionMasker>,
        overlay: Box<dyn TextOverlay>,
    ) -> Self {
        Self {
            detector,
            masker,
            overlay,
            mirror: true,
        }
    }

    /// Disables the horizontal flip applied to every frame.
    pub fn with_mirror(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    /// Runs detection and masking on `frame`, returning the number of
    /// faces detected.
    ///
    /// With no faces the "no face" notice is drawn. Boxes that clip to
    /// nothing are skipped.
    pub fn process(
        &mut self,
        frame: &mut Frame,
        state: &SessionState,
        logger: &mut dyn PipelineLogger,
    ) -> Result<usize, Box<dyn std::error::Error>> {
        if self.mirror {
            frame.mirror_horizontal();
        }

        let t = Instant::now();
        let faces = self.detector.detect(frame)?;
        logger.timing("detect", t.elapsed().as_secs_f64() * 1000.0);
        logger.metric("faces", faces.len() as f64);

        if faces.is_empty() {
            self.overlay
                .draw_text(frame, NO_FACE_TEXT, NO_FACE_ORIGIN, TextStyle::NO_FACE)?;
            return Ok(0);
        }

        if !state.mask_enabled() {
            return Ok(faces.len());
        }

        let t = Instant::now();
        let algorithm = state.mask_algorithm();
        let (width, height) = (frame.width(), frame.height());
        let mut pixels = frame.as_ndarray_mut();
        for face in &faces {
            let Some(roi) = face.clamp_to(width, height) else {
                continue;
            };
            let mut region =
                pixels.slice_mut(s![roi.y..roi.y + roi.h, roi.x..roi.x + roi.w, ..]);
            let masked = self
                .masker
                .mask(region.view(), algorithm, MaskSizing::face(face.width))?;
            region.assign(&masked);
        }
        logger.timing("mask", t.elapsed().as_secs_f64() * 1000.0);

        Ok(faces.len())
    }

    /// Draws the mode status line in the bottom-left corner.
    pub fn draw_status(
        &self,
        frame: &mut Frame,
        state: &SessionState,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let style = if state.is_recording() {
            TextStyle::STATUS_RECORDING
        } else {
            TextStyle::STATUS
        };
        let origin = (STATUS_MARGIN.0, frame.height() as i32 - STATUS_MARGIN.1);
        self.overlay
            .draw_text(frame, &state.status_line(), origin, style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::masking::domain::mask_algorithm::MaskAlgorithm;
    use crate::masking::infrastructure::cpu_region_masker::CpuRegionMasker;
    use crate::pipeline::pipeline_logger::NullPipelineLogger;
    use crate::session::mode_command::ModeCommand;
    use crate::session::mode_controller::ModeController;
    use crate::session::recorder::{Recorder, WriterFactory};
    use crate::shared::face_box::FaceBox;
    use crate::shared::video_metadata::VideoMetadata;
    use crate::video::infrastructure::ffmpeg_writer::FfmpegWriter;
    use ndarray::{Array3, ArrayView3};
    use std::sync::{Arc, Mutex};

    struct FixedDetector {
        faces: Vec<FaceBox>,
    }

    impl FaceDetector for FixedDetector {
        fn detect(&mut self, _frame: &Frame) -> Result<Vec<FaceBox>, Box<dyn std::error::Error>> {
            Ok(self.faces.clone())
        }
    }

    struct FailingDetector;

    impl FaceDetector for FailingDetector {
        fn detect(&mut self, _frame: &Frame) -> Result<Vec<FaceBox>, Box<dyn std::error::Error>> {
            Err("classifier crashed".into())
        }
    }

    /// Fills each region with zeros and records the shape and sizing it saw.
    struct RecordingMasker {
        calls: MaskCalls,
    }

    impl RegionMasker for RecordingMasker {
        fn mask(
            &self,
            region: ArrayView3<'_, u8>,
            algorithm: MaskAlgorithm,
            sizing: MaskSizing,
        ) -> Result<Array3<u8>, Box<dyn std::error::Error>> {
            let (h, w, _) = region.dim();
            self.calls.lock().unwrap().push(((h, w), algorithm, sizing));
            Ok(Array3::zeros(region.raw_dim()))
        }
    }

    struct FailingMasker;

    impl RegionMasker for FailingMasker {
        fn mask(
            &self,
            _region: ArrayView3<'_, u8>,
            _algorithm: MaskAlgorithm,
            _sizing: MaskSizing,
        ) -> Result<Array3<u8>, Box<dyn std::error::Error>> {
            Err("blur backend unavailable".into())
        }
    }

    type TextCalls = Arc<Mutex<Vec<(String, (i32, i32), TextStyle)>>>;

    struct RecordingOverlay {
        calls: TextCalls,
    }

    impl TextOverlay for RecordingOverlay {
        fn draw_text(
            &self,
            _frame: &mut Frame,
            text: &str,
            origin: (i32, i32),
            style: TextStyle,
        ) -> Result<(), Box<dyn std::error::Error>> {
            self.calls
                .lock()
                .unwrap()
                .push((text.to_string(), origin, style));
            Ok(())
        }
    }

    type MaskCalls = Arc<Mutex<Vec<((usize, usize), MaskAlgorithm, MaskSizing)>>>;

    fn pipeline(faces: Vec<FaceBox>) -> (FramePipeline, MaskCalls, TextCalls) {
        let mask_calls = MaskCalls::default();
        let text_calls = TextCalls::default();
        let pipeline = FramePipeline::new(
            Box::new(FixedDetector { faces }),
            Box::new(RecordingMasker {
                calls: mask_calls.clone(),
            }),
            Box::new(RecordingOverlay {
                calls: text_calls.clone(),
            }),
        );
        (pipeline, mask_calls, text_calls)
    }

    fn controller() -> ModeController {
        let factory: WriterFactory = Box::new(|| Box::new(FfmpegWriter::new()));
        ModeController::new(Recorder::new("unused", factory))
    }

    fn metadata() -> VideoMetadata {
        VideoMetadata {
            width: 40,
            height: 30,
            fps: 30.0,
        }
    }

    fn gradient_frame(w: u32, h: u32) -> Frame {
        let data = (0..w * h * 3).map(|i| (i % 251) as u8 + 1).collect();
        Frame::new(data, w, h, 3, 0)
    }

    #[test]
    fn test_no_faces_draws_notice_and_leaves_pixels() {
        let (mut pipeline, mask_calls, text_calls) = pipeline(vec![]);
        let controller = controller();
        let mut frame = gradient_frame(40, 30);
        let mut expected = frame.clone();
        expected.mirror_horizontal();

        let count = pipeline
            .process(&mut frame, controller.state(), &mut NullPipelineLogger)
            .unwrap();

        assert_eq!(count, 0);
        assert_eq!(frame.data(), expected.data());
        assert!(mask_calls.lock().unwrap().is_empty());
        let calls = text_calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "No Face Found!");
        assert_eq!(calls[0].1, (20, 50));
        assert_eq!(calls[0].2, TextStyle::NO_FACE);
    }

    #[test]
    fn test_face_region_is_masked_in_place() {
        let (mut pipeline, mask_calls, text_calls) =
            pipeline(vec![FaceBox::new(10, 5, 12, 8)]);
        let controller = controller();
        let mut frame = gradient_frame(40, 30);

        pipeline
            .process(&mut frame, controller.state(), &mut NullPipelineLogger)
            .unwrap();

        let view = frame.as_ndarray();
        for y in 0..30 {
            for x in 0..40 {
                let inside = (5..13).contains(&y) && (10..22).contains(&x);
                let pixel = view[[y, x, 0]];
                assert_eq!(pixel == 0, inside, "pixel ({x}, {y})");
            }
        }
        let calls = mask_calls.lock().unwrap();
        assert_eq!(
            calls[0],
            ((8, 12), MaskAlgorithm::Gaussian, MaskSizing::Face { width: 12 })
        );
        assert!(text_calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_negative_origin_is_clamped_before_masking() {
        let (mut pipeline, mask_calls, _) = pipeline(vec![FaceBox::new(-5, -3, 10, 10)]);
        let controller = controller();
        let mut frame = gradient_frame(40, 30);

        pipeline
            .process(&mut frame, controller.state(), &mut NullPipelineLogger)
            .unwrap();

        let calls = mask_calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, (10, 10));
        assert_eq!(frame.as_ndarray()[[0, 0, 0]], 0);
    }

    #[test]
    fn test_zero_area_boxes_never_reach_masker() {
        let (mut pipeline, mask_calls, text_calls) = pipeline(vec![
            FaceBox::new(40, 10, 10, 10),
            FaceBox::new(5, 30, 10, 10),
            FaceBox::new(3, 3, 0, 5),
        ]);
        let controller = controller();
        let mut frame = gradient_frame(40, 30);
        let mut expected = frame.clone();
        expected.mirror_horizontal();

        let count = pipeline
            .process(&mut frame, controller.state(), &mut NullPipelineLogger)
            .unwrap();

        assert_eq!(count, 3);
        assert!(mask_calls.lock().unwrap().is_empty());
        assert!(text_calls.lock().unwrap().is_empty());
        assert_eq!(frame.data(), expected.data());
    }

    #[test]
    fn test_disabled_masking_skips_masker() {
        let (mut pipeline, mask_calls, _) = pipeline(vec![FaceBox::new(0, 0, 10, 10)]);
        let mut controller = controller();
        controller.apply(ModeCommand::ToggleMask, &metadata());
        let mut frame = gradient_frame(40, 30);

        pipeline
            .process(&mut frame, controller.state(), &mut NullPipelineLogger)
            .unwrap();

        assert!(mask_calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_selected_algorithm_is_used() {
        let (mut pipeline, mask_calls, _) = pipeline(vec![FaceBox::new(0, 0, 10, 10)]);
        let mut controller = controller();
        controller.apply(ModeCommand::SelectMosaic, &metadata());
        let mut frame = gradient_frame(40, 30);

        pipeline
            .process(&mut frame, controller.state(), &mut NullPipelineLogger)
            .unwrap();

        assert_eq!(mask_calls.lock().unwrap()[0].1, MaskAlgorithm::Mosaic);
    }

    #[test]
    fn test_mirror_can_be_disabled() {
        let (pipeline, _, _) = pipeline(vec![]);
        let mut pipeline = pipeline.with_mirror(false);
        let controller = controller();
        let mut frame = gradient_frame(40, 30);
        let original = frame.clone();

        pipeline
            .process(&mut frame, controller.state(), &mut NullPipelineLogger)
            .unwrap();

        assert_eq!(frame.data(), original.data());
    }

    #[test]
    fn test_detector_error_propagates() {
        let mut pipeline = FramePipeline::new(
            Box::new(FailingDetector),
            Box::new(CpuRegionMasker::new()),
            Box::new(RecordingOverlay {
                calls: TextCalls::default(),
            }),
        );
        let controller = controller();
        let mut frame = gradient_frame(40, 30);

        let err = pipeline
            .process(&mut frame, controller.state(), &mut NullPipelineLogger)
            .unwrap_err();
        assert!(err.to_string().contains("classifier crashed"));
    }

    #[test]
    fn test_masker_error_propagates() {
        let mut pipeline = FramePipeline::new(
            Box::new(FixedDetector {
                faces: vec![FaceBox::new(4, 4, 10, 10)],
            }),
            Box::new(FailingMasker),
            Box::new(RecordingOverlay {
                calls: TextCalls::default(),
            }),
        );
        let controller = controller();
        let mut frame = gradient_frame(40, 30);

        let err = pipeline
            .process(&mut frame, controller.state(), &mut NullPipelineLogger)
            .unwrap_err();
        assert!(err.to_string().contains("blur backend unavailable"));
    }

    #[test]
    fn test_real_masker_changes_face_only() {
        let mut pipeline = FramePipeline::new(
            Box::new(FixedDetector {
                faces: vec![FaceBox::new(8, 6, 16, 16)],
            }),
            Box::new(CpuRegionMasker::new()),
            Box::new(RecordingOverlay {
                calls: TextCalls::default(),
            }),
        )
        .with_mirror(false);
        let controller = controller();
        let mut frame = gradient_frame(40, 30);
        let original = frame.clone();

        pipeline
            .process(&mut frame, controller.state(), &mut NullPipelineLogger)
            .unwrap();

        let before = original.as_ndarray();
        let after = frame.as_ndarray();
        assert_eq!(
            before.slice(s![.., 30.., ..]),
            after.slice(s![.., 30.., ..])
        );
        assert_ne!(
            before.slice(s![6..22, 8..24, ..]),
            after.slice(s![6..22, 8..24, ..])
        );
    }

    #[test]
    fn test_status_line_position_and_colour() {
        let (pipeline, _, text_calls) = pipeline(vec![]);
        let controller = controller();
        let mut frame = gradient_frame(40, 30);

        pipeline.draw_status(&mut frame, controller.state()).unwrap();

        let calls = text_calls.lock().unwrap();
        assert_eq!(calls[0].0, "Mask: GAUSSIAN | Rec: OFF");
        assert_eq!(calls[0].1, (10, 20));
        assert_eq!(calls[0].2, TextStyle::STATUS);
    }
}
