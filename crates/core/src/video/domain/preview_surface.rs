use crate::shared::frame::Frame;

/// A single on-screen preview with keyboard input.
pub trait PreviewSurface: Send {
    fn present(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Waits up to `wait_ms` milliseconds for a key press.
    ///
    /// Returns `Ok(None)` on timeout; the wait is never fatal.
    fn poll_key(&mut self, wait_ms: i32) -> Result<Option<char>, Box<dyn std::error::Error>>;

    /// False once the user has closed the window.
    fn is_open(&self) -> bool {
        true
    }

    fn close(&mut self);
}
