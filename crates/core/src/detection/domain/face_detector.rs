use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

/// Domain interface for face localisation.
///
/// Receives a single-channel intensity frame. Finding no faces is a normal
/// outcome and returns an empty vec, never an error. Errors are reserved for
/// the detector itself failing.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceBox>, Box<dyn std::error::Error>>;
}
