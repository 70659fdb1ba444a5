use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::pipeline::frame_pipeline::FramePipeline;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::session::mode_controller::{LoopControl, ModeController};
use crate::shared::constants::KEY_WAIT_MS;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::frame_source::FrameSource;
use crate::video::domain::preview_surface::PreviewSurface;

/// Why the live loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The user pressed the quit key.
    Quit,
    /// Ctrl+C or the preview window was closed.
    Cancelled,
    /// The camera stopped delivering frames.
    EndOfStream,
}

/// Result of a completed live session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub frames: usize,
    pub reason: StopReason,
}

/// Runs the capture, mask, record, present, and keyboard cycle until the
/// user quits or the camera stops.
///
/// Each frame is handled start to finish before the next is read. Devices
/// are released on every exit path: the output stream first, then the
/// camera, then the preview window.
pub struct LiveMaskUseCase {
    source: Box<dyn FrameSource>,
    pipeline: FramePipeline,
    controller: ModeController,
    preview: Box<dyn PreviewSurface>,
    logger: Box<dyn PipelineLogger>,
    cancel: Arc<AtomicBool>,
    key_wait_ms: i32,
}

impl LiveMaskUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        pipeline: FramePipeline,
        controller: ModeController,
        preview: Box<dyn PreviewSurface>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            source,
            pipeline,
            controller,
            preview,
            logger,
            cancel: Arc::new(AtomicBool::new(false)),
            key_wait_ms: KEY_WAIT_MS,
        }
    }

    /// Shares a flag that, once set, ends the loop at the next key poll.
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_key_wait_ms(mut self, key_wait_ms: i32) -> Self {
        self.key_wait_ms = key_wait_ms.max(1);
        self
    }

    pub fn controller(&self) -> &ModeController {
        &self.controller
    }

    /// Runs the loop to completion and tears the devices down.
    ///
    /// A detector, masker, overlay, or display failure ends the loop with that
    /// error, after teardown.
    pub fn execute(&mut self) -> Result<SessionSummary, Box<dyn std::error::Error>> {
        let mut frames = 0;
        let result = self.run_loop(&mut frames);
        self.teardown();
        self.logger.summary();
        result.map(|reason| SessionSummary { frames, reason })
    }

    fn run_loop(&mut self, frames: &mut usize) -> Result<StopReason, Box<dyn std::error::Error>> {
        loop {
            let t = Instant::now();
            let mut frame = match self.source.read() {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    log::warn!("Camera returned no frame, stopping");
                    return Ok(StopReason::EndOfStream);
                }
                Err(e) => {
                    log::warn!("Frame capture failed, stopping: {e}");
                    return Ok(StopReason::EndOfStream);
                }
            };
            self.logger
                .timing("capture", t.elapsed().as_secs_f64() * 1000.0);

            self.pipeline
                .process(&mut frame, self.controller.state(), self.logger.as_mut())?;

            if self.controller.state().is_recording() {
                let t = Instant::now();
                self.controller.record(&frame);
                self.logger
                    .timing("record", t.elapsed().as_secs_f64() * 1000.0);
            }

            self.pipeline
                .draw_status(&mut frame, self.controller.state())?;

            let t = Instant::now();
            self.preview.present(&frame)?;
            self.logger
                .timing("present", t.elapsed().as_secs_f64() * 1000.0);

            *frames += 1;
            self.logger.progress(*frames);

            let key = self.preview.poll_key(self.key_wait_ms)?;
            if self.cancel.load(Ordering::SeqCst) {
                self.logger.info("Interrupted, stopping");
                return Ok(StopReason::Cancelled);
            }
            if !self.preview.is_open() {
                self.logger.info("Preview window closed, stopping");
                return Ok(StopReason::Cancelled);
            }
            if let Some(key) = key {
                let metadata = VideoMetadata {
                    width: frame.width(),
                    height: frame.height(),
                    fps: self.source.metadata().fps,
                };
                if self.controller.handle_key(key, &metadata) == LoopControl::Quit {
                    return Ok(StopReason::Quit);
                }
            }
        }
    }

    fn teardown(&mut self) {
        self.controller.shutdown();
        self.source.release();
        self.preview.close();
    }
}
