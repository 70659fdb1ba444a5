use std::path::Path;

use opencv::core::{Rect, Size, Vector};
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;

use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::constants::{DETECTOR_MIN_NEIGHBORS, DETECTOR_SCALE_FACTOR};
use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;
use crate::shared::startup_error::StartupError;
use crate::video::infrastructure::mat_conversion::frame_to_mat;

/// Sensitivity knobs handed to the cascade on every call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CascadeParams {
    pub scale_factor: f64,
    pub min_neighbors: i32,
    /// Smallest face edge in pixels; 0 lets the cascade decide.
    pub min_size: i32,
}

impl Default for CascadeParams {
    fn default() -> Self {
        Self {
            scale_factor: DETECTOR_SCALE_FACTOR,
            min_neighbors: DETECTOR_MIN_NEIGHBORS,
            min_size: 0,
        }
    }
}

/// Haar/LBP cascade face detector backed by OpenCV's `CascadeClassifier`.
pub struct CascadeFaceDetector {
    classifier: CascadeClassifier,
    params: CascadeParams,
    hits: Vector<Rect>,
}

impl CascadeFaceDetector {
    /// Load a cascade XML file.
    ///
    /// Fails if the file is missing or OpenCV loads it as an empty
    /// classifier (wrong format, truncated file).
    pub fn new(cascade_path: &Path, params: CascadeParams) -> Result<Self, StartupError> {
        let detector_error = |reason: String| StartupError::Detector {
            path: cascade_path.to_path_buf(),
            reason,
        };

        if !cascade_path.is_file() {
            return Err(detector_error("file not found".into()));
        }
        let path_str = cascade_path
            .to_str()
            .ok_or_else(|| detector_error("path is not valid UTF-8".into()))?;

        let classifier =
            CascadeClassifier::new(path_str).map_err(|e| detector_error(e.to_string()))?;
        if classifier.empty().map_err(|e| detector_error(e.to_string()))? {
            return Err(detector_error("not a valid cascade classifier".into()));
        }

        log::info!(
            "Loaded cascade {} (scale_factor={}, min_neighbors={})",
            cascade_path.display(),
            params.scale_factor,
            params.min_neighbors
        );

        Ok(Self {
            classifier,
            params,
            hits: Vector::new(),
        })
    }
}

impl FaceDetector for CascadeFaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceBox>, Box<dyn std::error::Error>> {
        let gray = if frame.channels() == 1 {
            frame_to_mat(frame)?
        } else {
            frame_to_mat(&frame.to_intensity())?
        };

        self.hits.clear();
        let min = self.params.min_size.max(0);
        self.classifier.detect_multi_scale(
            &gray,
            &mut self.hits,
            self.params.scale_factor,
            self.params.min_neighbors,
            0,
            Size::new(min, min),
            Size::default(),
        )?;

        Ok(self
            .hits
            .iter()
            .map(|r| FaceBox::new(r.x, r.y, r.width, r.height))
            .collect())
    }
}
