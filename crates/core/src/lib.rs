//! Live face detection and privacy masking for camera streams.
//!
//! Bounded contexts follow a `domain` (traits and value types) /
//! `infrastructure` (OpenCV, ffmpeg and CPU adapters) split.

pub mod detection;
pub mod masking;
pub mod pipeline;
pub mod session;
pub mod shared;
pub mod video;
