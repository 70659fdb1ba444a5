use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};

use crate::shared::frame::Frame;
use crate::shared::startup_error::StartupError;
use crate::shared::video_metadata::{VideoMetadata, DEFAULT_FPS};
use crate::video::domain::frame_source::FrameSource;

use super::mat_conversion::mat_to_frame;

/// Live camera capture through OpenCV's `VideoCapture`.
///
/// Frames are delivered as RGB; the device's native BGR layout is converted
/// on read. The device is released on `release` or drop, whichever is first.
pub struct OpencvCamera {
    capture: VideoCapture,
    metadata: VideoMetadata,
    buffer: Mat,
    next_index: usize,
    released: bool,
}

impl OpencvCamera {
    /// Opens camera `index` and reads its native resolution and frame rate.
    pub fn open(index: i32) -> Result<Self, StartupError> {
        let camera_error = |reason: String| StartupError::Camera { index, reason };

        let capture = VideoCapture::new(index, videoio::CAP_ANY)
            .map_err(|e| camera_error(e.to_string()))?;
        if !capture.is_opened().map_err(|e| camera_error(e.to_string()))? {
            return Err(camera_error("device could not be opened".into()));
        }

        let width = capture.get(videoio::CAP_PROP_FRAME_WIDTH).unwrap_or(0.0);
        let height = capture.get(videoio::CAP_PROP_FRAME_HEIGHT).unwrap_or(0.0);
        let fps = match capture.get(videoio::CAP_PROP_FPS) {
            Ok(fps) if fps > 0.0 => fps,
            _ => DEFAULT_FPS,
        };
        let metadata = VideoMetadata {
            width: width.max(0.0) as u32,
            height: height.max(0.0) as u32,
            fps,
        };
        log::info!(
            "Opened camera {index}: {}x{} @ {:.1} fps",
            metadata.width,
            metadata.height,
            metadata.fps
        );

        Ok(Self {
            capture,
            metadata,
            buffer: Mat::default(),
            next_index: 0,
            released: false,
        })
    }
}

impl FrameSource for OpencvCamera {
    fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    fn read(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        if self.released {
            return Ok(None);
        }
        if !self.capture.read(&mut self.buffer)? || self.buffer.empty() {
            return Ok(None);
        }

        let frame = mat_to_frame(&self.buffer, self.next_index)?;
        self.next_index += 1;

        // Some backends only report the real size once streaming starts.
        if self.metadata.width != frame.width() || self.metadata.height != frame.height() {
            self.metadata.width = frame.width();
            self.metadata.height = frame.height();
        }
        Ok(Some(frame))
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.capture.release() {
            log::warn!("Failed to release camera: {e}");
        }
        self.released = true;
        log::debug!("Camera released after {} frames", self.next_index);
    }
}

impl Drop for OpencvCamera {
    fn drop(&mut self) {
        self.release();
    }
}
