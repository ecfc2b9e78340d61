use crate::analysis::domain::frame_context::FrameContext;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::camera::Orientation;

/// Maps boxes from source-image pixels to overlay pixels.
///
/// The image is scaled to cover the overlay (`max` of the two axis
/// ratios) and centered; front-camera previews are mirrored about the
/// overlay's vertical center line. In portrait the image axes are swapped
/// because sensors deliver landscape buffers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayTransform {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    overlay_width: f32,
    mirror: bool,
}

impl OverlayTransform {
    /// Returns `None` when the overlay or the crop rectangle has no area.
    pub fn new(context: &FrameContext) -> Option<Self> {
        let (image_w, image_h) = (context.crop_rect.width(), context.crop_rect.height());
        let (adjusted_w, adjusted_h) = match context.orientation {
            Orientation::Landscape => (image_w, image_h),
            Orientation::Portrait => (image_h, image_w),
        };
        let (overlay_w, overlay_h) = (context.overlay_width, context.overlay_height);
        if adjusted_w <= 0.0 || adjusted_h <= 0.0 || overlay_w <= 0.0 || overlay_h <= 0.0 {
            return None;
        }

        let scale = (overlay_w / adjusted_w).max(overlay_h / adjusted_h);
        Some(Self {
            scale,
            offset_x: (overlay_w - (adjusted_w * scale).ceil()) / 2.0,
            offset_y: (overlay_h - (adjusted_h * scale).ceil()) / 2.0,
            overlay_width: overlay_w,
            mirror: context.lens.is_front(),
        })
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn offset(&self) -> (f32, f32) {
        (self.offset_x, self.offset_y)
    }

    pub fn map(&self, b: &BoundingBox) -> BoundingBox {
        let mut left = b.left * self.scale + self.offset_x;
        let mut right = b.right * self.scale + self.offset_x;
        if self.mirror {
            (left, right) = (self.overlay_width - right, self.overlay_width - left);
        }
        BoundingBox {
            left,
            top: b.top * self.scale + self.offset_y,
            right,
            bottom: b.bottom * self.scale + self.offset_y,
        }
        .normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::camera::LensFacing;
    use approx::assert_relative_eq;

    fn context(
        crop: (f32, f32),
        overlay: (f32, f32),
        orientation: Orientation,
        lens: LensFacing,
    ) -> FrameContext {
        FrameContext {
            crop_rect: BoundingBox::from_size(crop.0, crop.1),
            overlay_width: overlay.0,
            overlay_height: overlay.1,
            orientation,
            lens,
        }
    }

    #[test]
    fn test_identity_when_sizes_match() {
        let ctx = context(
            (100.0, 100.0),
            (100.0, 100.0),
            Orientation::Landscape,
            LensFacing::Back,
        );
        let t = OverlayTransform::new(&ctx).unwrap();
        let b = BoundingBox::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(t.map(&b), b);
    }

    #[test]
    fn test_portrait_swaps_axes_and_covers_overlay() {
        // Adjusted image 480x640 onto 1080x1920: scale = max(2.25, 3.0) = 3.0,
        // offset_x = (1080 - 1440) / 2 = -180, offset_y = 0.
        let ctx = context(
            (640.0, 480.0),
            (1080.0, 1920.0),
            Orientation::Portrait,
            LensFacing::Back,
        );
        let t = OverlayTransform::new(&ctx).unwrap();
        assert_relative_eq!(t.scale(), 3.0);
        let (ox, oy) = t.offset();
        assert_relative_eq!(ox, -180.0);
        assert_relative_eq!(oy, 0.0);

        let mapped = t.map(&BoundingBox::new(100.0, 200.0, 200.0, 300.0));
        assert_relative_eq!(mapped.left, 120.0);
        assert_relative_eq!(mapped.right, 420.0);
        assert_relative_eq!(mapped.top, 600.0);
        assert_relative_eq!(mapped.bottom, 900.0);
    }

    #[test]
    fn test_front_lens_mirrors_horizontally() {
        let ctx = context(
            (640.0, 480.0),
            (1080.0, 1920.0),
            Orientation::Portrait,
            LensFacing::Front,
        );
        let mapped = OverlayTransform::new(&ctx)
            .unwrap()
            .map(&BoundingBox::new(100.0, 200.0, 200.0, 300.0));
        assert_relative_eq!(mapped.left, 660.0);
        assert_relative_eq!(mapped.right, 960.0);
        assert_relative_eq!(mapped.top, 600.0);
    }

    #[test]
    fn test_landscape_uses_image_axes() {
        // 640x480 onto 1280x720: scale = max(2.0, 1.5) = 2.0, offset_y = (720 - 960) / 2.
        let ctx = context(
            (640.0, 480.0),
            (1280.0, 720.0),
            Orientation::Landscape,
            LensFacing::Back,
        );
        let t = OverlayTransform::new(&ctx).unwrap();
        assert_relative_eq!(t.scale(), 2.0);
        assert_relative_eq!(t.offset().1, -120.0);
    }

    #[test]
    fn test_degenerate_geometry_has_no_transform() {
        let no_overlay = context(
            (640.0, 480.0),
            (0.0, 0.0),
            Orientation::Portrait,
            LensFacing::Front,
        );
        let no_crop = context(
            (0.0, 480.0),
            (100.0, 100.0),
            Orientation::Portrait,
            LensFacing::Front,
        );
        assert!(OverlayTransform::new(&no_overlay).is_none());
        assert!(OverlayTransform::new(&no_crop).is_none());
    }
}
