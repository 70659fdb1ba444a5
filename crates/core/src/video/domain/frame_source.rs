use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;

/// A live, lazily-read sequence of frames (typically a camera).
///
/// The sequence has no natural end; it stops when a read fails or yields
/// no data, which `read` reports as `Ok(None)` or an error. Callers treat
/// both as end-of-stream.
pub trait FrameSource: Send {
    fn metadata(&self) -> &VideoMetadata;

    fn read(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;

    /// Releases the device. Must be safe to call more than once.
    fn release(&mut self);
}
