use crate::analysis::domain::frame_context::FrameContext;
use crate::analysis::domain::notice::Notice;
use crate::analysis::domain::overlay_transform::OverlayTransform;
use crate::detection::domain::detected_face::DetectedFace;
use crate::overlay::domain::overlay_annotation::{AnnotationColor, OverlayAnnotation};
use crate::shared::bounding_box::BoundingBox;
use crate::shared::config::LivenessConfig;

/// Outcome of judging one frame's detections.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameEvaluation {
    pub is_valid: bool,
    pub annotations: Vec<OverlayAnnotation>,
    pub notices: Vec<Notice>,
}

/// Decides whether a frame is an acceptable capture candidate.
///
/// Stateless: the verdict depends only on the faces and geometry passed
/// to [`FrameAnalyzer::evaluate`]. Checks on a single face are independent,
/// so every violated condition contributes its notice.
#[derive(Debug, Clone)]
pub struct FrameAnalyzer {
    smile_threshold: f32,
    blink_threshold: f32,
    center_tolerance: f32,
}

impl FrameAnalyzer {
    pub fn new(config: &LivenessConfig) -> Self {
        Self {
            smile_threshold: config.smile_threshold,
            blink_threshold: config.blink_threshold,
            center_tolerance: config.center_tolerance,
        }
    }

    pub fn evaluate(&self, faces: &[DetectedFace], context: &FrameContext) -> FrameEvaluation {
        let transform = OverlayTransform::new(context);
        let to_overlay = |b: &BoundingBox| transform.map_or(*b, |t| t.map(b));

        match faces {
            [] => FrameEvaluation {
                is_valid: false,
                annotations: Vec::new(),
                notices: vec![Notice::NoFaceDetected],
            },
            [face] => {
                let mut notices = Vec::new();
                let mut is_valid = true;

                if face.is_smiling(self.smile_threshold) {
                    is_valid = false;
                    notices.push(Notice::Smiling);
                }
                if face.is_blinking(self.blink_threshold) {
                    is_valid = false;
                    notices.push(Notice::EyesClosed);
                }

                let mapped = to_overlay(&face.bounding_box);
                if transform.is_none() || !self.is_centralized(&mapped, context) {
                    is_valid = false;
                }

                let color = if is_valid {
                    AnnotationColor::Green
                } else {
                    AnnotationColor::Red
                };
                FrameEvaluation {
                    is_valid,
                    annotations: vec![OverlayAnnotation::new(mapped, color)],
                    notices,
                }
            }
            many => FrameEvaluation {
                is_valid: false,
                annotations: many
                    .iter()
                    .map(|f| {
                        OverlayAnnotation::new(to_overlay(&f.bounding_box), AnnotationColor::Red)
                    })
                    .collect(),
                notices: vec![Notice::MultipleFaces],
            },
        }
    }

    /// A face is centralized when its overlay box lies fully inside the
    /// overlay and its center is within `center_tolerance` of the overlay
    /// center on both axes.
    fn is_centralized(&self, mapped: &BoundingBox, context: &FrameContext) -> bool {
        let (w, h) = (context.overlay_width, context.overlay_height);
        if !mapped.is_within(w, h) {
            return false;
        }
        let (cx, cy) = mapped.center();
        (cx - w / 2.0).abs() <= w * self.center_tolerance
            && (cy - h / 2.0).abs() <= h * self.center_tolerance
    }
}

impl Default for FrameAnalyzer {
    fn default() -> Self {
        Self::new(&LivenessConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::camera::{LensFacing, Orientation};
    use rstest::rstest;

    /// Square 100x100 image on a 100x100 overlay: the transform is the
    /// identity for the back lens.
    fn square_context(lens: LensFacing) -> FrameContext {
        FrameContext {
            crop_rect: BoundingBox::from_size(100.0, 100.0),
            overlay_width: 100.0,
            overlay_height: 100.0,
            orientation: Orientation::Portrait,
            lens,
        }
    }

    fn centered_face() -> DetectedFace {
        DetectedFace::new(BoundingBox::new(40.0, 40.0, 60.0, 60.0))
    }

    fn open_eyes(face: DetectedFace) -> DetectedFace {
        face.with_eyes_open(0.9, 0.9)
    }

    #[test]
    fn test_no_faces_is_invalid_without_annotations() {
        let eval = FrameAnalyzer::default().evaluate(&[], &square_context(LensFacing::Front));

        assert!(!eval.is_valid);
        assert!(eval.annotations.is_empty());
        assert_eq!(eval.notices, vec![Notice::NoFaceDetected]);
        assert_eq!(eval.notices[0].message(), "No face detected");
    }

    #[rstest]
    #[case::two(2)]
    #[case::three(3)]
    #[case::five(5)]
    fn test_multiple_faces_all_red(#[case] count: usize) {
        let faces = vec![open_eyes(centered_face()); count];
        let eval = FrameAnalyzer::default().evaluate(&faces, &square_context(LensFacing::Front));

        assert!(!eval.is_valid);
        assert_eq!(eval.annotations.len(), count);
        assert!(eval
            .annotations
            .iter()
            .all(|a| a.color == AnnotationColor::Red));
        assert_eq!(eval.notices, vec![Notice::MultipleFaces]);
        assert_eq!(eval.notices[0].message(), "Only one face is allowed");
    }

    #[rstest]
    #[case::front(LensFacing::Front)]
    #[case::back(LensFacing::Back)]
    fn test_zero_size_centered_face_without_probabilities_is_valid(#[case] lens: LensFacing) {
        let face = DetectedFace::new(BoundingBox::new(50.0, 50.0, 50.0, 50.0));
        let eval = FrameAnalyzer::default().evaluate(&[face], &square_context(lens));

        assert!(eval.is_valid);
        assert_eq!(eval.annotations.len(), 1);
        assert_eq!(eval.annotations[0].color, AnnotationColor::Green);
        assert!(eval.notices.is_empty());
    }

    #[test]
    fn test_smiling_face_is_rejected() {
        let face = open_eyes(centered_face()).with_smiling(0.6);
        let eval = FrameAnalyzer::default().evaluate(&[face], &square_context(LensFacing::Front));

        assert!(!eval.is_valid);
        assert_eq!(eval.annotations[0].color, AnnotationColor::Red);
        assert_eq!(eval.notices, vec![Notice::Smiling]);
        assert_eq!(eval.notices[0].message(), "Please do not smile");
    }

    #[test]
    fn test_closed_left_eye_is_rejected() {
        let face = centered_face().with_smiling(0.1).with_eyes_open(0.2, 0.9);
        let eval = FrameAnalyzer::default().evaluate(&[face], &square_context(LensFacing::Front));

        assert!(!eval.is_valid);
        assert_eq!(eval.annotations[0].color, AnnotationColor::Red);
        assert_eq!(eval.notices, vec![Notice::EyesClosed]);
        assert_eq!(eval.notices[0].message(), "Please do not blink.");
    }

    #[test]
    fn test_smile_and_blink_both_reported_in_order() {
        let face = centered_face().with_smiling(0.9).with_eyes_open(0.9, 0.1);
        let eval = FrameAnalyzer::default().evaluate(&[face], &square_context(LensFacing::Front));

        assert!(!eval.is_valid);
        assert_eq!(eval.annotations.len(), 1);
        assert_eq!(eval.notices, vec![Notice::Smiling, Notice::EyesClosed]);
    }

    #[test]
    fn test_off_center_face_is_red_without_notice() {
        // Overlay 200x200; face center x = 5 is 95px from center, tolerance is 80px.
        let ctx = FrameContext {
            crop_rect: BoundingBox::from_size(200.0, 200.0),
            overlay_width: 200.0,
            overlay_height: 200.0,
            orientation: Orientation::Landscape,
            lens: LensFacing::Back,
        };
        let face = open_eyes(DetectedFace::new(BoundingBox::new(0.0, 90.0, 10.0, 110.0)));
        let eval = FrameAnalyzer::default().evaluate(&[face], &ctx);

        assert!(!eval.is_valid);
        assert_eq!(eval.annotations[0].color, AnnotationColor::Red);
        assert!(eval.notices.is_empty());
    }

    #[test]
    fn test_face_partly_outside_overlay_is_not_centralized() {
        // Center is near the middle but the box spills past the right edge.
        let face = open_eyes(DetectedFace::new(BoundingBox::new(20.0, 40.0, 101.0, 60.0)));
        let eval = FrameAnalyzer::default().evaluate(&[face], &square_context(LensFacing::Back));

        assert!(!eval.is_valid);
        assert!(eval.notices.is_empty());
    }

    #[test]
    fn test_center_tolerance_boundary_is_inclusive() {
        // Center x = 10 is exactly 40px from 50 on a 100px overlay.
        let face = open_eyes(DetectedFace::new(BoundingBox::new(5.0, 45.0, 15.0, 55.0)));
        let eval = FrameAnalyzer::default().evaluate(&[face], &square_context(LensFacing::Back));

        assert!(eval.is_valid);
    }

    #[test]
    fn test_front_lens_annotation_is_mirrored() {
        let face = open_eyes(DetectedFace::new(BoundingBox::new(20.0, 40.0, 40.0, 60.0)));
        let eval = FrameAnalyzer::default().evaluate(&[face], &square_context(LensFacing::Front));

        assert_eq!(
            eval.annotations[0].rect,
            BoundingBox::new(60.0, 40.0, 80.0, 60.0)
        );
    }

    #[test]
    fn test_unlaid_overlay_cannot_validate() {
        let ctx = FrameContext {
            overlay_width: 0.0,
            overlay_height: 0.0,
            ..square_context(LensFacing::Front)
        };
        let eval = FrameAnalyzer::default().evaluate(&[open_eyes(centered_face())], &ctx);

        assert!(!eval.is_valid);
        assert!(eval.notices.is_empty());
    }

    #[test]
    fn test_custom_thresholds_from_config() {
        let config = LivenessConfig {
            smile_threshold: 0.8,
            ..Default::default()
        };
        let face = open_eyes(centered_face()).with_smiling(0.6);
        let eval =
            FrameAnalyzer::new(&config).evaluate(&[face], &square_context(LensFacing::Front));

        assert!(eval.is_valid);
    }

    #[test]
    fn test_same_input_same_verdict() {
        let analyzer = FrameAnalyzer::default();
        let ctx = square_context(LensFacing::Front);
        let faces = vec![open_eyes(centered_face()).with_smiling(0.6)];

        let first = analyzer.evaluate(&faces, &ctx);
        analyzer.evaluate(&[], &ctx);
        let second = analyzer.evaluate(&faces, &ctx);

        assert_eq!(first, second);
    }
}
