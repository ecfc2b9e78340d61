use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};

use crate::analysis::domain::frame_analyzer::{FrameAnalyzer, FrameEvaluation};
use crate::analysis::domain::frame_context::FrameContext;
use crate::detection::domain::face_detector::FaceDetector;
use crate::overlay::domain::overlay_state::OverlayState;
use crate::pipeline::latest_slot::SlotSender;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::constants::SHUTDOWN_GRACE;
use crate::shared::frame::Frame;

/// Evaluation of one frame, handed from the worker to the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub frame_index: usize,
    pub evaluation: FrameEvaluation,
}

/// Everything the worker thread needs, moved into it at spawn.
pub struct WorkerParts {
    pub detector: Box<dyn FaceDetector>,
    pub analyzer: FrameAnalyzer,
    pub logger: Box<dyn PipelineLogger>,
    pub overlay: Arc<OverlayState>,
    pub frame_rx: Receiver<Frame>,
    pub report_tx: SlotSender<FrameReport>,
    pub stopped: Arc<AtomicBool>,
}

/// Background thread that detects and evaluates frames one at a time.
///
/// Layout: `frame slot → [detect → evaluate] → report slot`
///
/// The detector is closed on the worker thread when the loop exits, so it
/// is never used after release. Shutdown waits a bounded time; a thread
/// still inside `detect` is detached and finishes its cleanup on its own.
pub struct FrameAnalysisWorker {
    shutdown_tx: Option<Sender<()>>,
    done_rx: Receiver<Box<dyn PipelineLogger>>,
    handle: Option<JoinHandle<()>>,
}

impl FrameAnalysisWorker {
    pub fn spawn(parts: WorkerParts) -> std::io::Result<Self> {
        let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded::<()>(0);
        let (done_tx, done_rx) = crossbeam_channel::bounded(1);
        let handle = std::thread::Builder::new()
            .name("frame-analysis".to_string())
            .spawn(move || {
                let logger = run_worker(parts, shutdown_rx);
                // The owner is gone after a detached shutdown; report from here.
                if let Err(unclaimed) = done_tx.send(logger) {
                    unclaimed.into_inner().summary();
                }
            })?;

        Ok(Self {
            shutdown_tx: Some(shutdown_tx),
            done_rx,
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Signals the thread to exit and waits up to `grace` for it.
    ///
    /// Returns the logger on the first call if the thread finished in time.
    /// `None` afterwards, after a panic, or when the wait ran out; in the
    /// last case the thread is detached and closes the detector once the
    /// in-flight `detect` returns.
    pub fn shutdown(&mut self, grace: Duration) -> Option<Box<dyn PipelineLogger>> {
        drop(self.shutdown_tx.take());
        let handle = self.handle.take()?;
        match self.done_rx.recv_timeout(grace) {
            Ok(logger) => {
                if handle.join().is_err() {
                    log::error!("Frame analysis thread panicked");
                }
                Some(logger)
            }
            Err(RecvTimeoutError::Timeout) => {
                log::warn!(
                    "Frame analysis thread still busy after {}ms; detaching it",
                    grace.as_millis()
                );
                None
            }
            Err(RecvTimeoutError::Disconnected) => {
                let _ = handle.join();
                log::error!("Frame analysis thread panicked");
                None
            }
        }
    }
}

impl Drop for FrameAnalysisWorker {
    fn drop(&mut self) {
        self.shutdown(SHUTDOWN_GRACE);
    }
}

fn run_worker(parts: WorkerParts, shutdown_rx: Receiver<()>) -> Box<dyn PipelineLogger> {
    let WorkerParts {
        mut detector,
        analyzer,
        mut logger,
        overlay,
        frame_rx,
        report_tx,
        stopped,
    } = parts;

    loop {
        crossbeam_channel::select! {
            recv(frame_rx) -> msg => match msg {
                Ok(frame) => process_frame(
                    frame,
                    &mut *detector,
                    &analyzer,
                    &mut *logger,
                    &overlay,
                    &report_tx,
                    &stopped,
                ),
                Err(_) => break,
            },
            recv(shutdown_rx) -> _ => break,
        }
    }

    let leftover = frame_rx.try_iter().count();
    if leftover > 0 {
        log::debug!("Released {leftover} unprocessed frame(s) at shutdown");
    }

    match detector.close() {
        Ok(()) => logger.info("Face detector closed"),
        Err(e) => log::error!("Exception while closing face detector: {e}"),
    }
    logger
}

/// Runs detection and evaluation for one frame. The frame is dropped, and
/// its buffer released, when this returns.
fn process_frame(
    frame: Frame,
    detector: &mut dyn FaceDetector,
    analyzer: &FrameAnalyzer,
    logger: &mut dyn PipelineLogger,
    overlay: &OverlayState,
    report_tx: &SlotSender<FrameReport>,
    stopped: &AtomicBool,
) {
    if stopped.load(Ordering::Acquire) {
        return;
    }

    let index = frame.index();
    let started = Instant::now();
    let faces = match detector.detect(&frame) {
        Ok(faces) => faces,
        Err(e) => {
            logger.detector_failed(index, &e);
            return;
        }
    };
    logger.timing("detect", started.elapsed().as_secs_f64() * 1000.0);

    if stopped.load(Ordering::Acquire) {
        logger.late_result(index);
        return;
    }

    let context = FrameContext::for_frame(&frame, overlay.size());
    let evaluation = analyzer.evaluate(&faces, &context);
    logger.frame_evaluated(index, evaluation.is_valid);

    let report = FrameReport {
        frame_index: index,
        evaluation,
    };
    if let Some(stale) = report_tx.publish(report) {
        log::trace!("Report for frame {} superseded", stale.frame_index);
    }
}
