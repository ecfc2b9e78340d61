use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::detection::domain::detected_face::DetectedFace;
use crate::detection::domain::face_detector::{DetectorError, FaceDetector};
use crate::shared::frame::Frame;

/// Replays pre-recorded detection results by frame index.
///
/// Stands in for the on-device model when running recordings through the
/// pipeline. Frames missing from the recording yield no faces; indices in
/// `failures` yield a detection error.
pub struct ReplayFaceDetector {
    recording: Arc<HashMap<usize, Vec<DetectedFace>>>,
    failures: HashSet<usize>,
    closed: bool,
}

impl ReplayFaceDetector {
    pub fn new(recording: Arc<HashMap<usize, Vec<DetectedFace>>>) -> Self {
        Self {
            recording,
            failures: HashSet::new(),
            closed: false,
        }
    }

    pub fn with_failures(mut self, failures: HashSet<usize>) -> Self {
        self.failures = failures;
        self
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl FaceDetector for ReplayFaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<DetectedFace>, DetectorError> {
        if self.closed {
            return Err(DetectorError::Closed);
        }
        if self.failures.contains(&frame.index()) {
            return Err(DetectorError::Detection {
                frame_index: frame.index(),
                reason: "recorded failure".to_string(),
            });
        }
        Ok(self
            .recording
            .get(&frame.index())
            .cloned()
            .unwrap_or_default())
    }

    fn close(&mut self) -> Result<(), DetectorError> {
        if self.closed {
            return Err(DetectorError::Closed);
        }
        self.closed = true;
        Ok(())
    }
}
