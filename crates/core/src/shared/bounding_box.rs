use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle given by its edges.
///
/// Used for face boxes in source-image pixel space, for the image crop
/// rectangle, and for annotations in overlay space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl BoundingBox {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Box anchored at the origin with the given size.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Swaps edges so that `left <= right` and `top <= bottom`.
    pub fn normalized(&self) -> Self {
        Self {
            left: self.left.min(self.right),
            top: self.top.min(self.bottom),
            right: self.left.max(self.right),
            bottom: self.top.max(self.bottom),
        }
    }

    /// True when every edge of `self` lies inside `[0, width] x [0, height]`.
    pub fn is_within(&self, width: f32, height: f32) -> bool {
        self.left >= 0.0 && self.top >= 0.0 && self.right <= width && self.bottom <= height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_dimensions_and_center() {
        let b = BoundingBox::new(10.0, 20.0, 110.0, 70.0);
        assert_relative_eq!(b.width(), 100.0);
        assert_relative_eq!(b.height(), 50.0);
        let (cx, cy) = b.center();
        assert_relative_eq!(cx, 60.0);
        assert_relative_eq!(cy, 45.0);
    }

    #[test]
    fn test_normalized_swaps_inverted_edges() {
        let b = BoundingBox::new(80.0, 60.0, 20.0, 10.0).normalized();
        assert_eq!(b, BoundingBox::new(20.0, 10.0, 80.0, 60.0));
    }

    #[test]
    fn test_from_size_anchors_at_origin() {
        let b = BoundingBox::from_size(640.0, 480.0);
        assert_eq!(b, BoundingBox::new(0.0, 0.0, 640.0, 480.0));
    }

    #[rstest]
    #[case::inside(BoundingBox::new(10.0, 10.0, 90.0, 90.0), true)]
    #[case::touching_edges(BoundingBox::new(0.0, 0.0, 100.0, 100.0), true)]
    #[case::left_out(BoundingBox::new(-1.0, 10.0, 50.0, 50.0), false)]
    #[case::bottom_out(BoundingBox::new(10.0, 10.0, 50.0, 100.5), false)]
    #[case::zero_size_center(BoundingBox::new(50.0, 50.0, 50.0, 50.0), true)]
    fn test_is_within(#[case] b: BoundingBox, #[case] expected: bool) {
        assert_eq!(b.is_within(100.0, 100.0), expected);
    }
}
