use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;

use facecloak_core::detection::infrastructure::cascade_face_detector::{
    CascadeFaceDetector, CascadeParams,
};
use facecloak_core::detection::infrastructure::cascade_resolver;
use facecloak_core::masking::domain::mask_algorithm::MaskAlgorithm;
use facecloak_core::masking::infrastructure::cpu_region_masker::CpuRegionMasker;
use facecloak_core::pipeline::frame_pipeline::FramePipeline;
use facecloak_core::pipeline::live_mask_use_case::LiveMaskUseCase;
use facecloak_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use facecloak_core::session::mode_controller::ModeController;
use facecloak_core::session::recorder::{Recorder, WriterFactory};
use facecloak_core::shared::constants::{
    CASCADE_FILE_NAME, DEFAULT_OUTPUT_DIR, DETECTOR_MIN_NEIGHBORS, DETECTOR_SCALE_FACTOR,
    KEY_WAIT_MS, WINDOW_TITLE,
};
use facecloak_core::shared::startup_error::StartupError;
use facecloak_core::video::infrastructure::ffmpeg_writer::FfmpegWriter;
use facecloak_core::video::infrastructure::opencv_camera::OpencvCamera;
use facecloak_core::video::infrastructure::opencv_preview::OpencvPreview;
use facecloak_core::video::infrastructure::opencv_text_overlay::OpencvTextOverlay;

/// Live webcam face masking.
///
/// Keys: g = gaussian, m = mosaic, b = toggle masking, r = toggle
/// recording, q = quit.
#[derive(Parser)]
#[command(name = "facecloak", version)]
struct Cli {
    /// Capture device index.
    #[arg(long, default_value_t = 0)]
    camera: i32,

    /// Haar cascade XML file (searched for if omitted).
    #[arg(long)]
    cascade: Option<PathBuf>,

    /// Directory for recordings (created if absent).
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Initial mask: gaussian or mosaic.
    #[arg(long, default_value = "gaussian")]
    mask: String,

    /// Start with masking disabled.
    #[arg(long)]
    no_mask: bool,

    /// Detector scale step between pyramid levels (> 1.0).
    #[arg(long, default_value_t = DETECTOR_SCALE_FACTOR)]
    scale_factor: f64,

    /// Neighbouring detections required to keep a face.
    #[arg(long, default_value_t = DETECTOR_MIN_NEIGHBORS)]
    min_neighbors: i32,

    /// Smallest face edge in pixels (0 = detector default).
    #[arg(long, default_value_t = 0)]
    min_face_size: i32,

    /// Keyboard poll wait per frame, in milliseconds.
    #[arg(long, default_value_t = KEY_WAIT_MS)]
    key_wait_ms: i32,

    /// Do not mirror the camera image.
    #[arg(long)]
    no_mirror: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        let code = e
            .downcast_ref::<StartupError>()
            .map(StartupError::exit_code)
            .unwrap_or(1);
        process::exit(code);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let algorithm = validate(&cli)?;

    let cancel = Arc::new(AtomicBool::new(false));
    let flag = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
        log::warn!("Ctrl+C handler not installed: {e}");
    }

    let cascade_path =
        cascade_resolver::resolve(CASCADE_FILE_NAME, cli.cascade.as_deref()).map_err(|e| {
            StartupError::Detector {
                path: e.primary_path(),
                reason: e.to_string(),
            }
        })?;
    let detector = CascadeFaceDetector::new(
        &cascade_path,
        CascadeParams {
            scale_factor: cli.scale_factor,
            min_neighbors: cli.min_neighbors,
            min_size: cli.min_face_size,
        },
    )?;

    let camera = OpencvCamera::open(cli.camera)?;
    let preview = OpencvPreview::new(WINDOW_TITLE)?;

    let pipeline = FramePipeline::new(
        Box::new(detector),
        Box::new(CpuRegionMasker::new()),
        Box::new(OpencvTextOverlay::new()),
    )
    .with_mirror(!cli.no_mirror);

    let factory: WriterFactory = Box::new(|| Box::new(FfmpegWriter::new()));
    let controller = ModeController::new(Recorder::new(&cli.output_dir, factory))
        .with_mask(algorithm, !cli.no_mask);

    log::info!("Keys: g gaussian, m mosaic, b toggle mask, r toggle recording, q quit");
    let mut use_case = LiveMaskUseCase::new(
        Box::new(camera),
        pipeline,
        controller,
        Box::new(preview),
        Box::new(StdoutPipelineLogger::default()),
    )
    .with_cancel_flag(cancel)
    .with_key_wait_ms(cli.key_wait_ms);

    let summary = use_case.execute()?;
    log::info!(
        "Stopped after {} frames ({:?})",
        summary.frames,
        summary.reason
    );
    Ok(())
}

fn validate(cli: &Cli) -> Result<MaskAlgorithm, StartupError> {
    let algorithm = cli
        .mask
        .parse::<MaskAlgorithm>()
        .map_err(StartupError::InvalidArgument)?;
    if cli.scale_factor.is_nan() || cli.scale_factor <= 1.0 {
        return Err(StartupError::InvalidArgument(format!(
            "Scale factor must be greater than 1.0, got {}",
            cli.scale_factor
        )));
    }
    if cli.min_neighbors < 0 {
        return Err(StartupError::InvalidArgument(format!(
            "Min neighbors must be non-negative, got {}",
            cli.min_neighbors
        )));
    }
    if cli.min_face_size < 0 {
        return Err(StartupError::InvalidArgument(format!(
            "Min face size must be non-negative, got {}",
            cli.min_face_size
        )));
    }
    if cli.key_wait_ms < 1 {
        return Err(StartupError::InvalidArgument(format!(
            "Key wait must be at least 1 ms, got {}",
            cli.key_wait_ms
        )));
    }
    Ok(algorithm)
}
