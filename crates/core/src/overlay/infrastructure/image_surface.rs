use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::overlay::domain::overlay_annotation::AnnotationColor;
use crate::overlay::domain::overlay_surface::OverlaySurface;
use crate::shared::bounding_box::BoundingBox;

/// Renders overlay annotations into an RGB image.
///
/// Thick outlines are drawn as nested one-pixel rectangles growing inward.
pub struct ImageSurface {
    image: RgbImage,
}

impl ImageSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::new(width, height),
        }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }
}

impl OverlaySurface for ImageSurface {
    fn stroke_rect(&mut self, rect: &BoundingBox, color: AnnotationColor, stroke_width: f32) {
        let (w, h) = (self.image.width() as i32, self.image.height() as i32);
        if w == 0 || h == 0 {
            return;
        }
        let r = rect.normalized();
        let x_min = (r.left.floor() as i32).clamp(0, w - 1);
        let y_min = (r.top.floor() as i32).clamp(0, h - 1);
        let x_max = (r.right.ceil() as i32).clamp(0, w - 1);
        let y_max = (r.bottom.ceil() as i32).clamp(0, h - 1);

        let pixel = Rgb(color.rgb());
        let layers = stroke_width.round().max(1.0) as i32;
        for i in 0..layers {
            let width = x_max - x_min - 2 * i;
            let height = y_max - y_min - 2 * i;
            if width <= 0 || height <= 0 {
                break;
            }
            let outline = Rect::at(x_min + i, y_min + i).of_size(width as u32, height as u32);
            draw_hollow_rect_mut(&mut self.image, outline, pixel);
        }
    }
}
