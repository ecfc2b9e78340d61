use crate::overlay::domain::overlay_annotation::AnnotationColor;
use crate::shared::bounding_box::BoundingBox;

/// Something annotations can be painted onto (a preview canvas, an image).
pub trait OverlaySurface {
    fn stroke_rect(&mut self, rect: &BoundingBox, color: AnnotationColor, stroke_width: f32);
}
