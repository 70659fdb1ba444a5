pub const CASCADE_FILE_NAME: &str = "haarcascade_frontalface_default.xml";

/// Detector scale step between pyramid levels.
pub const DETECTOR_SCALE_FACTOR: f64 = 1.2;
/// Neighbouring candidates a detection needs to be kept.
pub const DETECTOR_MIN_NEIGHBORS: i32 = 4;

pub const DEFAULT_OUTPUT_DIR: &str = "recordings";
pub const RECORDING_PREFIX: &str = "recording";
pub const RECORDING_EXTENSION: &str = "mp4";

pub const WINDOW_TITLE: &str = "Face Mask";

/// Keyboard poll wait per frame, in milliseconds.
pub const KEY_WAIT_MS: i32 = 1;

pub const NO_FACE_TEXT: &str = "No Face Found!";
pub const NO_FACE_ORIGIN: (i32, i32) = (20, 50);
/// Status line offset from the bottom-left corner.
pub const STATUS_MARGIN: (i32, i32) = (10, 10);
