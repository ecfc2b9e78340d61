use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CaptureError {
    #[error("current frame is not a valid capture candidate")]
    NotReady,
    #[error("liveness session has stopped")]
    Stopped,
}

/// Read-only view of the session's validity flag for the capture button.
#[derive(Clone, Debug)]
pub struct CaptureGate {
    validity: Arc<AtomicBool>,
    stopped: Arc<AtomicBool>,
}

impl CaptureGate {
    pub(crate) fn new(validity: Arc<AtomicBool>, stopped: Arc<AtomicBool>) -> Self {
        Self { validity, stopped }
    }

    pub fn is_capture_allowed(&self) -> bool {
        !self.stopped.load(Ordering::Acquire) && self.validity.load(Ordering::Acquire)
    }

    /// Runs `trigger` only while the latest frame is valid.
    pub fn capture<T>(&self, trigger: impl FnOnce() -> T) -> Result<T, CaptureError> {
        if self.stopped.load(Ordering::Acquire) {
            return Err(CaptureError::Stopped);
        }
        if !self.validity.load(Ordering::Acquire) {
            return Err(CaptureError::NotReady);
        }
        Ok(trigger())
    }
}
