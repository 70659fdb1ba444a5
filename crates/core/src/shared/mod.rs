pub mod constants;
pub mod face_box;
pub mod frame;
pub mod startup_error;
pub mod video_metadata;
