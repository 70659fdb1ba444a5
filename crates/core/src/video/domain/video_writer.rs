use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;

/// Output stream for one recording session.
///
/// `open` sizes the stream from `metadata`; every frame passed to `write`
/// must match that size.
pub trait VideoWriter: Send {
    fn open(
        &mut self,
        path: &Path,
        metadata: &VideoMetadata,
    ) -> Result<(), Box<dyn std::error::Error>>;

    fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Flushes pending packets and finalises the container. A closed
    /// writer may be closed again.
    fn close(&mut self) -> Result<(), Box<dyn std::error::Error>>;
}
