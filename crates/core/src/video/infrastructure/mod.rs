pub mod ffmpeg_writer;
pub mod mat_conversion;
pub mod opencv_camera;
pub mod opencv_preview;
pub mod opencv_text_overlay;
