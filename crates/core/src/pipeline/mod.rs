pub mod frame_pipeline;
pub mod live_mask_use_case;
pub mod pipeline_logger;
