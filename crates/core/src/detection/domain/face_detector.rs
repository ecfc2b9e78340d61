use thiserror::Error;

use crate::detection::domain::detected_face::DetectedFace;
use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("detection failed on frame {frame_index}: {reason}")]
    Detection { frame_index: usize, reason: String },
    #[error("detector already closed")]
    Closed,
    #[error("failed to release detector: {0}")]
    Release(String),
}

/// Domain interface for face detection.
///
/// Implementations may be stateful, hence `&mut self`. The pipeline calls
/// `detect` once per delivered frame and `close` exactly once at shutdown.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<DetectedFace>, DetectorError>;

    /// Releases model resources. Default: nothing to release.
    fn close(&mut self) -> Result<(), DetectorError> {
        Ok(())
    }
}
