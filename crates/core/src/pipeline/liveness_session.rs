use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;

use crate::analysis::domain::frame_analyzer::FrameAnalyzer;
use crate::detection::domain::face_detector::FaceDetector;
use crate::notification::domain::notification_debouncer::{NoticeDecision, NotificationDebouncer};
use crate::overlay::domain::overlay_state::OverlayState;
use crate::pipeline::capture_gate::CaptureGate;
use crate::pipeline::frame_submitter::FrameSubmitter;
use crate::pipeline::infrastructure::frame_analysis_worker::{
    FrameAnalysisWorker, FrameReport, WorkerParts,
};
use crate::pipeline::latest_slot::{latest_slot, SlotSender};
use crate::pipeline::pipeline_logger::{PipelineLogger, StatsPipelineLogger};
use crate::pipeline::ui_sink::UiSink;
use crate::shared::config::LivenessConfig;
use crate::shared::constants::SHUTDOWN_GRACE;
use crate::shared::frame::Frame;

/// UI-thread owner of a running liveness check.
///
/// Frames go in through a [`FrameSubmitter`] on any thread; the analysis
/// worker evaluates the latest one and leaves a report in a single-slot
/// channel. [`LivenessSession::pump`] is the only place UI-visible state
/// changes: it applies the newest report to the overlay, pushes validity to
/// the sink and drives the notification debouncer.
pub struct LivenessSession<S: UiSink> {
    sink: S,
    overlay: Arc<OverlayState>,
    debouncer: NotificationDebouncer,
    validity: Arc<AtomicBool>,
    stopped: Arc<AtomicBool>,
    dropped: Arc<AtomicUsize>,
    frames: SlotSender<Frame>,
    reports: Receiver<FrameReport>,
    worker: FrameAnalysisWorker,
}

impl<S: UiSink> LivenessSession<S> {
    pub fn start(
        detector: Box<dyn FaceDetector>,
        config: &LivenessConfig,
        overlay: Arc<OverlayState>,
        sink: S,
    ) -> std::io::Result<Self> {
        Self::start_with_logger(
            detector,
            config,
            overlay,
            sink,
            Box::new(StatsPipelineLogger::new()),
        )
    }

    pub fn start_with_logger(
        detector: Box<dyn FaceDetector>,
        config: &LivenessConfig,
        overlay: Arc<OverlayState>,
        sink: S,
        logger: Box<dyn PipelineLogger>,
    ) -> std::io::Result<Self> {
        let (frames, frame_rx) = latest_slot();
        let (report_tx, reports) = latest_slot();
        let stopped = Arc::new(AtomicBool::new(false));

        let worker = FrameAnalysisWorker::spawn(WorkerParts {
            detector,
            analyzer: FrameAnalyzer::new(config),
            logger,
            overlay: overlay.clone(),
            frame_rx,
            report_tx,
            stopped: stopped.clone(),
        })?;
        log::info!(
            "Liveness session started (debounce {}ms, max repeats {})",
            config.debounce_ms,
            config.max_message_repeats
        );

        Ok(Self {
            sink,
            overlay,
            debouncer: NotificationDebouncer::from_config(config),
            validity: Arc::new(AtomicBool::new(false)),
            stopped,
            dropped: Arc::new(AtomicUsize::new(0)),
            frames,
            reports,
            worker,
        })
    }

    /// Handler to register with the frame source.
    pub fn frame_submitter(&self) -> FrameSubmitter {
        FrameSubmitter::new(
            self.frames.clone(),
            self.stopped.clone(),
            self.dropped.clone(),
        )
    }

    pub fn capture_gate(&self) -> CaptureGate {
        CaptureGate::new(self.validity.clone(), self.stopped.clone())
    }

    pub fn overlay(&self) -> &Arc<OverlayState> {
        &self.overlay
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn is_valid(&self) -> bool {
        self.validity.load(Ordering::Acquire)
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Frames replaced in the input slot before the worker reached them.
    pub fn dropped_frames(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }

    /// When the next debounced notification becomes due, if one is pending.
    pub fn next_notice_due(&self) -> Option<Instant> {
        self.debouncer.next_due()
    }

    /// Applies any waiting report and shows a due notification.
    /// Returns the number of reports applied.
    pub fn pump(&mut self, now: Instant) -> usize {
        if self.is_stopped() {
            return 0;
        }

        let mut applied = 0;
        while let Ok(report) = self.reports.try_recv() {
            self.apply(report, now);
            applied += 1;
        }

        if let Some(message) = self.debouncer.poll(now) {
            self.sink.show_message(&message);
        }
        applied
    }

    /// Blocks up to `timeout` for the next report, then pumps.
    pub fn wait_and_pump(&mut self, timeout: Duration) -> usize {
        if self.is_stopped() {
            return 0;
        }
        match self.reports.recv_timeout(timeout) {
            Ok(report) => {
                let now = Instant::now();
                self.apply(report, now);
                1 + self.pump(now)
            }
            Err(_) => self.pump(Instant::now()),
        }
    }

    fn apply(&mut self, report: FrameReport, now: Instant) {
        let evaluation = report.evaluation;

        self.overlay.replace(evaluation.annotations);
        self.sink.on_overlay_changed(&self.overlay);

        self.validity.store(evaluation.is_valid, Ordering::Release);
        self.sink.on_validity(evaluation.is_valid);

        for notice in evaluation.notices {
            match self.debouncer.submit(notice.message(), now) {
                NoticeDecision::Scheduled => {
                    log::debug!("Frame {}: scheduled \"{notice}\"", report.frame_index)
                }
                decision => {
                    log::trace!("Frame {}: {decision:?} \"{notice}\"", report.frame_index)
                }
            }
        }
    }

    /// Shuts the session down. Safe to call repeatedly.
    ///
    /// Validity is forced to `false` before waiting on the worker so the
    /// capture button cannot be enabled while teardown is in progress. The
    /// wait is bounded by [`SHUTDOWN_GRACE`]; a detection still running after
    /// that is discarded when it returns, and the worker then releases its
    /// frame and closes the detector.
    pub fn stop(&mut self) {
        if self.stopped.swap(true, Ordering::AcqRel) {
            return;
        }

        self.validity.store(false, Ordering::Release);
        self.sink.on_validity(false);
        self.debouncer.cancel();

        self.frames.drain();
        if let Some(logger) = self.worker.shutdown(SHUTDOWN_GRACE) {
            logger.summary();
        }
        while self.reports.try_recv().is_ok() {}

        self.overlay.clear();
        self.sink.on_overlay_changed(&self.overlay);
        log::info!(
            "Liveness session stopped ({} frame(s) dropped)",
            self.dropped_frames()
        );
    }
}

impl<S: UiSink> Drop for LivenessSession<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
