use serde::{Deserialize, Serialize};

use crate::shared::bounding_box::BoundingBox;

/// Attributes of one face reported by the detector for a single frame.
///
/// Probabilities are in `0..=1` and absent when the detector could not
/// classify the attribute.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectedFace {
    pub bounding_box: BoundingBox,
    #[serde(default)]
    pub smiling_probability: Option<f32>,
    #[serde(default)]
    pub left_eye_open_probability: Option<f32>,
    #[serde(default)]
    pub right_eye_open_probability: Option<f32>,
}

impl DetectedFace {
    /// A face with no classification attributes.
    pub fn new(bounding_box: BoundingBox) -> Self {
        Self {
            bounding_box,
            smiling_probability: None,
            left_eye_open_probability: None,
            right_eye_open_probability: None,
        }
    }

    pub fn with_smiling(mut self, probability: f32) -> Self {
        self.smiling_probability = Some(probability);
        self
    }

    pub fn with_eyes_open(mut self, left: f32, right: f32) -> Self {
        self.left_eye_open_probability = Some(left);
        self.right_eye_open_probability = Some(right);
        self
    }

    pub fn is_smiling(&self, threshold: f32) -> bool {
        self.smiling_probability.is_some_and(|p| p > threshold)
    }

    /// True when either eye is known to be closed.
    pub fn is_blinking(&self, threshold: f32) -> bool {
        self.left_eye_open_probability.is_some_and(|p| p < threshold)
            || self.right_eye_open_probability.is_some_and(|p| p < threshold)
    }
}
