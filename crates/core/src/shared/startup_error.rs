use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures before the first frame is processed.
///
/// Each variant maps to its own process exit status so supervisors can
/// tell a missing model apart from a missing camera.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("failed to load face detector from {}: {reason}", path.display())]
    Detector { path: PathBuf, reason: String },
    #[error("could not open camera {index}: {reason}")]
    Camera { index: i32, reason: String },
    #[error("{0}")]
    InvalidArgument(String),
}

impl StartupError {
    pub fn exit_code(&self) -> i32 {
        match self {
            StartupError::InvalidArgument(_) => 1,
            StartupError::Detector { .. } => 2,
            StartupError::Camera { .. } => 3,
        }
    }
}
