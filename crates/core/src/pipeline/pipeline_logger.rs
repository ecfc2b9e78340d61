use std::collections::HashMap;
use std::time::Instant;

use crate::detection::domain::face_detector::DetectorError;

/// Cross-cutting logger for frame analysis events.
///
/// The analysis worker owns one and reports every frame outcome to it, so
/// callers can observe throughput and failures without touching the
/// worker loop.
pub trait PipelineLogger: Send {
    /// A frame was fully evaluated.
    fn frame_evaluated(&mut self, frame_index: usize, is_valid: bool);

    /// The detector failed; the frame was skipped.
    fn detector_failed(&mut self, frame_index: usize, error: &DetectorError);

    /// A detection finished after shutdown and was discarded.
    fn late_result(&mut self, frame_index: usize);

    /// Record how long a named stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-session summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn frame_evaluated(&mut self, _frame_index: usize, _is_valid: bool) {}
    fn detector_failed(&mut self, _frame_index: usize, _error: &DetectorError) {}
    fn late_result(&mut self, _frame_index: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Counts frame outcomes and stage timings and reports them through the
/// `log` crate at the end of a session.
pub struct StatsPipelineLogger {
    valid_frames: usize,
    invalid_frames: usize,
    failed_frames: usize,
    late_results: usize,
    timings: HashMap<String, Vec<f64>>,
    start_time: Instant,
}

impl StatsPipelineLogger {
    pub fn new() -> Self {
        Self {
            valid_frames: 0,
            invalid_frames: 0,
            failed_frames: 0,
            late_results: 0,
            timings: HashMap::new(),
            start_time: Instant::now(),
        }
    }

    pub fn evaluated_frames(&self) -> usize {
        self.valid_frames + self.invalid_frames
    }

    pub fn valid_frames(&self) -> usize {
        self.valid_frames
    }

    pub fn failed_frames(&self) -> usize {
        self.failed_frames
    }

    pub fn late_results(&self) -> usize {
        self.late_results
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    /// Returns the formatted summary string, or `None` if nothing happened.
    pub fn summary_string(&self) -> Option<String> {
        let evaluated = self.evaluated_frames();
        if evaluated == 0 && self.failed_frames == 0 && self.late_results == 0 {
            return None;
        }

        let elapsed_s = self.start_time.elapsed().as_secs_f64();
        let mut lines = vec![format!(
            "Analysis summary ({evaluated} frames evaluated, {:.1}s):",
            elapsed_s
        )];
        lines.push(format!(
            "  valid: {}  invalid: {}  detector failures: {}  late results: {}",
            self.valid_frames, self.invalid_frames, self.failed_frames, self.late_results
        ));

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = if durations.is_empty() {
                0.0
            } else {
                total_ms / durations.len() as f64
            };
            lines.push(format!("  {stage:12}: avg {avg_ms:6.1}ms  total {total_ms:7.0}ms"));
        }

        Some(lines.join("\n"))
    }
}

impl Default for StatsPipelineLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineLogger for StatsPipelineLogger {
    fn frame_evaluated(&mut self, frame_index: usize, is_valid: bool) {
        if is_valid {
            self.valid_frames += 1;
        } else {
            self.invalid_frames += 1;
        }
        log::trace!("Frame {frame_index}: valid={is_valid}");
    }

    fn detector_failed(&mut self, frame_index: usize, error: &DetectorError) {
        self.failed_frames += 1;
        log::warn!("Face detector failed on frame {frame_index}: {error}");
    }

    fn late_result(&mut self, frame_index: usize) {
        self.late_results += 1;
        log::debug!("Discarding detection for frame {frame_index} after stop");
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
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
