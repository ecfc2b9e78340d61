use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use livecheck_core::detection::domain::detected_face::DetectedFace;
use livecheck_core::shared::camera::{LensFacing, Orientation};
use livecheck_core::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum RecordingError {
    #[error("failed to read recording {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid recording JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("recording image size must be non-zero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },
    #[error("recording contains no frames")]
    NoFrames,
    #[error("failure index {index} is past the last frame ({frames} frames)")]
    FailureOutOfRange { index: usize, frames: usize },
}

/// Detection batches captured from a camera session, one per frame.
#[derive(Debug, Deserialize)]
pub struct Recording {
    pub image_width: u32,
    pub image_height: u32,
    #[serde(default)]
    pub lens: LensFacing,
    #[serde(default)]
    pub orientation: Orientation,
    pub frames: Vec<Vec<DetectedFace>>,
    /// Frame indices on which the detector reported an error.
    #[serde(default)]
    pub failures: Vec<usize>,
}

impl Recording {
    pub fn load(path: &Path) -> Result<Self, RecordingError> {
        let json = fs::read_to_string(path).map_err(|source| RecordingError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, RecordingError> {
        let recording: Self = serde_json::from_str(json)?;
        recording.validate()?;
        Ok(recording)
    }

    fn validate(&self) -> Result<(), RecordingError> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(RecordingError::EmptyImage {
                width: self.image_width,
                height: self.image_height,
            });
        }
        if self.frames.is_empty() {
            return Err(RecordingError::NoFrames);
        }
        if let Some(&index) = self.failures.iter().find(|&&i| i >= self.frames.len()) {
            return Err(RecordingError::FailureOutOfRange {
                index,
                frames: self.frames.len(),
            });
        }
        Ok(())
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn detections(&self) -> HashMap<usize, Vec<DetectedFace>> {
        self.frames.iter().cloned().enumerate().collect()
    }

    pub fn failure_set(&self) -> HashSet<usize> {
        self.failures.iter().copied().collect()
    }

    /// A blank RGB frame standing in for the camera buffer at `index`.
    pub fn blank_frame(&self, index: usize) -> Frame {
        let (w, h) = (self.image_width, self.image_height);
        Frame::new(vec![0u8; w as usize * h as usize * 3], w, h, 3, index)
            .with_lens(self.lens)
            .with_orientation(self.orientation)
    }
}
