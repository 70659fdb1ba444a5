use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::shared::constants::{RECORDING_EXTENSION, RECORDING_PREFIX};
use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::video_writer::VideoWriter;

/// Builds a fresh, unopened writer for each recording session.
pub type WriterFactory = Box<dyn Fn() -> Box<dyn VideoWriter> + Send>;

#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("cannot create output directory {dir}: {source}")]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot open output stream {path}: {reason}")]
    Open { path: PathBuf, reason: String },
}

/// An open output stream and where it is being written.
struct ActiveRecording {
    writer: Box<dyn VideoWriter>,
    path: PathBuf,
    frames: usize,
}

/// Owns the output stream for the current recording session, if any.
///
/// The stream exists exactly while recording is on: a failed start leaves
/// nothing behind, and stopping always drops the handle even when
/// finalisation reports an error.
pub struct Recorder {
    output_dir: PathBuf,
    writer_factory: WriterFactory,
    active: Option<ActiveRecording>,
}

impl Recorder {
    pub fn new(output_dir: impl Into<PathBuf>, writer_factory: WriterFactory) -> Self {
        Self {
            output_dir: output_dir.into(),
            writer_factory,
            active: None,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    /// Path of the file currently being written.
    pub fn current_path(&self) -> Option<&Path> {
        self.active.as_ref().map(|a| a.path.as_path())
    }

    /// Opens a new timestamped output file sized and timed from `metadata`.
    ///
    /// Starting while already recording returns the current path.
    pub fn start(&mut self, metadata: &VideoMetadata) -> Result<PathBuf, RecordingError> {
        if let Some(active) = &self.active {
            return Ok(active.path.clone());
        }

        std::fs::create_dir_all(&self.output_dir).map_err(|source| {
            RecordingError::CreateDir {
                dir: self.output_dir.clone(),
                source,
            }
        })?;

        let now = chrono::Local::now().naive_local();
        let path = next_recording_path(&self.output_dir, now);

        let mut writer = (self.writer_factory)();
        writer
            .open(&path, metadata)
            .map_err(|e| RecordingError::Open {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        log::debug!(
            "Opened {} at {}x{} @ {} fps",
            path.display(),
            metadata.width,
            metadata.height,
            metadata.effective_fps()
        );
        self.active = Some(ActiveRecording {
            writer,
            path: path.clone(),
            frames: 0,
        });
        Ok(path)
    }

    /// Appends a frame to the open stream. A failed append ends the
    /// recording. Does nothing while not recording.
    pub fn append(&mut self, frame: &Frame) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        match active.writer.write(frame) {
            Ok(()) => active.frames += 1,
            Err(e) => {
                log::warn!(
                    "Write to {} failed, stopping recording: {e}",
                    active.path.display()
                );
                self.stop();
            }
        }
    }

    /// Finalises and releases the output stream, returning its path.
    pub fn stop(&mut self) -> Option<PathBuf> {
        let mut active = self.active.take()?;
        if let Err(e) = active.writer.close() {
            log::warn!("Failed to finalise {}: {e}", active.path.display());
        }
        log::debug!("{} frames written to {}", active.frames, active.path.display());
        Some(active.path)
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        self.stop();
    }
}

/// `recording_<YYYYMMDD>_<HHMMSS>.<ext>` inside `dir`, with a `_<n>` suffix
/// when a file of that name already exists.
pub fn next_recording_path(dir: &Path, timestamp: NaiveDateTime) -> PathBuf {
    let stem = format!(
        "{RECORDING_PREFIX}_{}",
        timestamp.format("%Y%m%d_%H%M%S")
    );
    let candidate = dir.join(format!("{stem}.{RECORDING_EXTENSION}"));
    if !candidate.exists() {
        return candidate;
    }
    (1..)
        .map(|n| dir.join(format!("{stem}_{n}.{RECORDING_EXTENSION}")))
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}
