use crate::shared::bounding_box::BoundingBox;
use crate::shared::camera::{LensFacing, Orientation};
use crate::shared::frame::Frame;

/// Geometry needed to judge a frame's detections against the preview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    pub crop_rect: BoundingBox,
    pub overlay_width: f32,
    pub overlay_height: f32,
    pub orientation: Orientation,
    pub lens: LensFacing,
}

impl FrameContext {
    pub fn for_frame(frame: &Frame, overlay_size: (f32, f32)) -> Self {
        Self {
            crop_rect: frame.crop_rect(),
            overlay_width: overlay_size.0,
            overlay_height: overlay_size.1,
            orientation: frame.orientation(),
            lens: frame.lens(),
        }
    }
}
