use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::pipeline::latest_slot::SlotSender;
use crate::shared::frame::Frame;

/// Handler the frame source calls for every camera frame.
///
/// Only the newest frame waits for the analysis worker; a frame that is
/// replaced before analysis, or submitted after stop, is dropped at once,
/// which releases its camera buffer.
#[derive(Clone)]
pub struct FrameSubmitter {
    slot: SlotSender<Frame>,
    stopped: Arc<AtomicBool>,
    dropped: Arc<AtomicUsize>,
}

impl FrameSubmitter {
    pub(crate) fn new(
        slot: SlotSender<Frame>,
        stopped: Arc<AtomicBool>,
        dropped: Arc<AtomicUsize>,
    ) -> Self {
        Self {
            slot,
            stopped,
            dropped,
        }
    }

    /// Queues `frame` for analysis. Returns `false` once the session stopped.
    pub fn submit(&self, frame: Frame) -> bool {
        if self.stopped.load(Ordering::Acquire) {
            log::trace!("Ignoring frame {} after stop", frame.index());
            return false;
        }

        if let Some(stale) = self.slot.publish(frame) {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            log::trace!("Frame {} replaced before analysis", stale.index());
        }

        // Stop may have drained the slot between the check above and publish.
        if self.stopped.load(Ordering::Acquire) {
            self.slot.drain();
        }
        true
    }
}
