use std::collections::HashMap;
use std::time::Instant;

/// Frames between progress lines when no throttle is given.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 300;

/// Observer for live-loop events: per-stage timings, per-frame metrics,
/// and status messages.
///
/// The loop never knows how many frames will arrive, so progress is a
/// running count rather than a fraction.
pub trait PipelineLogger: Send {
    /// Report that `frames` frames have been processed so far.
    fn progress(&mut self, frames: usize);

    /// Record how long a named stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a per-frame metric (e.g. face count).
    fn metric(&mut self, name: &str, value: f64);

    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards everything. Used by tests.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _frames: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Running count, sum, and maximum of one series of samples.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct SampleStats {
    count: usize,
    sum: f64,
    max: f64,
}

impl SampleStats {
    fn record(&mut self, value: f64) {
        if self.count == 0 || value > self.max {
            self.max = value;
        }
        self.count += 1;
        self.sum += value;
    }

    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Aggregates stage timings and metrics, and writes them through the
/// `log` facade.
///
/// Only running aggregates are kept, so a session of any length uses a
/// fixed amount of memory per stage. A progress line is emitted every
/// `interval` frames.
pub struct StdoutPipelineLogger {
    interval: usize,
    timings: HashMap<String, SampleStats>,
    metrics: HashMap<String, SampleStats>,
    start_time: Instant,
    frames: usize,
}

impl StdoutPipelineLogger {
    pub fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            frames: 0,
        }
    }

    /// Returns the formatted summary, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Session summary ({} frames, {:.1}s):",
            self.frames,
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = self.timings.iter().collect();
        stages.sort_by(|a, b| a.0.cmp(b.0));
        for (stage, stats) in stages {
            lines.push(format!(
                "  {stage:10}: avg {:6.2}ms  max {:7.2}ms  total {:8.0}ms",
                stats.mean(),
                stats.max,
                stats.sum
            ));
        }

        let mut names: Vec<_> = self.metrics.iter().collect();
        names.sort_by(|a, b| a.0.cmp(b.0));
        for (name, stats) in names {
            lines.push(format!(
                "  {name}: avg {:.2}, peak {:.0}",
                stats.mean(),
                stats.max
            ));
        }

        if self.frames > 0 && elapsed_ms > 0.0 {
            let fps = self.frames as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Throughput: {fps:.1} fps"));
        }

        Some(lines.join("\n"))
    }
}

/// Adds `value` to the series for `key`, allocating the key only the first
/// time it is seen.
fn record(series: &mut HashMap<String, SampleStats>, key: &str, value: f64) {
    match series.get_mut(key) {
        Some(stats) => stats.record(value),
        None => {
            let mut stats = SampleStats::default();
            stats.record(value);
            series.insert(key.to_string(), stats);
        }
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRESS_INTERVAL)
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn progress(&mut self, frames: usize) {
        self.frames = frames;
        if frames > 0 && frames % self.interval == 0 {
            let secs = self.start_time.elapsed().as_secs_f64();
            let fps = if secs > 0.0 { frames as f64 / secs } else { 0.0 };
            log::info!("Processed {frames} frames ({fps:.1} fps)");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        record(&mut self.timings, stage, duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        record(&mut self.metrics, name, value);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_null_logger_accepts_everything() {
        let mut logger = NullPipelineLogger;
        logger.progress(1);
        logger.timing("detect", 5.0);
        logger.metric("faces", 1.0);
        logger.info("hello");
        logger.summary();
    }

    #[test]
    fn test_timing_aggregates_per_stage() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.timing("detect", 20.0);
        logger.timing("detect", 30.0);
        logger.timing("mask", 5.0);

        let detect = logger.timings.get("detect").unwrap();
        assert_eq!(detect.count, 2);
        assert_relative_eq!(detect.sum, 50.0);
        assert_relative_eq!(detect.max, 30.0);
        assert_eq!(logger.timings.get("mask").unwrap().count, 1);
        assert!(logger.timings.get("present").is_none());
    }

    #[test]
    fn test_metric_average_and_peak() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.metric("faces", 1.0);
        logger.metric("faces", 2.0);
        logger.metric("faces", 0.0);

        let faces = logger.metrics.get("faces").unwrap();
        assert_relative_eq!(faces.mean(), 1.0);
        assert_relative_eq!(faces.max, 2.0);
    }

    #[test]
    fn test_long_session_keeps_one_entry_per_stage() {
        let mut logger = StdoutPipelineLogger::new(DEFAULT_PROGRESS_INTERVAL);
        for i in 0..100_000 {
            logger.timing("capture", 1.0);
            logger.timing("detect", (i % 7) as f64);
            logger.metric("faces", 1.0);
            logger.info("still running");
        }

        assert_eq!(logger.timings.len(), 2);
        assert_eq!(logger.metrics.len(), 1);
        let detect = logger.timings.get("detect").unwrap();
        assert_eq!(detect.count, 100_000);
        assert_relative_eq!(detect.max, 6.0);
    }

    #[test]
    fn test_negative_samples_set_max_from_first_value() {
        let mut stats = SampleStats::default();
        stats.record(-3.0);
        stats.record(-5.0);
        assert_relative_eq!(stats.max, -3.0);
        assert_relative_eq!(SampleStats::default().mean(), 0.0);
    }

    #[test]
    fn test_summary_lists_stages_and_metrics() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.progress(4);
        logger.timing("detect", 10.0);
        logger.timing("capture", 2.0);
        logger.metric("faces", 3.0);
        logger.metric("faces", 1.0);

        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("4 frames"));
        assert!(summary.contains("detect"));
        assert!(summary.contains("capture"));
        assert!(summary.contains("faces: avg 2.00, peak 3"));
        assert!(summary.contains("fps"));
    }

    #[test]
    fn test_empty_summary_returns_none() {
        let logger = StdoutPipelineLogger::default();
        assert!(logger.summary_string().is_none());
    }

    #[test]
    fn test_progress_tracks_latest_count() {
        let mut logger = StdoutPipelineLogger::new(3);
        for i in 1..=7 {
            logger.progress(i);
        }
        assert_eq!(logger.frames, 7);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let logger = StdoutPipelineLogger::new(0);
        assert_eq!(logger.interval, 1);
    }
}
