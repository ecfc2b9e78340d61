use crate::shared::bounding_box::BoundingBox;

/// Outline color of an annotation: green for an acceptable face, red otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationColor {
    Green,
    Red,
}

impl AnnotationColor {
    pub fn rgb(self) -> [u8; 3] {
        match self {
            AnnotationColor::Green => [0, 255, 0],
            AnnotationColor::Red => [255, 0, 0],
        }
    }
}

/// A colored rectangle in overlay coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayAnnotation {
    pub rect: BoundingBox,
    pub color: AnnotationColor,
}

impl OverlayAnnotation {
    pub fn new(rect: BoundingBox, color: AnnotationColor) -> Self {
        Self { rect, color }
    }
}
