pub mod frame_source;
pub mod preview_surface;
pub mod text_overlay;
pub mod video_writer;
