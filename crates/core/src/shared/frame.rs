use std::fmt;

use crate::shared::bounding_box::BoundingBox;
use crate::shared::camera::{LensFacing, Orientation};

/// Callback that hands the underlying camera buffer back to its owner.
pub type ReleaseHook = Box<dyn FnOnce() + Send>;

/// A single camera frame: contiguous pixel bytes in row-major order plus
/// the capture metadata needed to map detections onto the preview.
///
/// A frame may own a release hook for the camera buffer it was built
/// from. The hook runs exactly once, when the frame is dropped, whichever
/// path the frame takes through the pipeline.
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
    crop_rect: BoundingBox,
    lens: LensFacing,
    orientation: Orientation,
    release: Option<ReleaseHook>,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
            crop_rect: BoundingBox::from_size(width as f32, height as f32),
            lens: LensFacing::default(),
            orientation: Orientation::default(),
            release: None,
        }
    }

    pub fn with_crop_rect(mut self, crop_rect: BoundingBox) -> Self {
        self.crop_rect = crop_rect;
        self
    }

    pub fn with_lens(mut self, lens: LensFacing) -> Self {
        self.lens = lens;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_release(mut self, hook: ReleaseHook) -> Self {
        self.release = Some(hook);
        self
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Region of the sensor buffer the detector actually saw.
    pub fn crop_rect(&self) -> BoundingBox {
        self.crop_rect
    }

    pub fn lens(&self) -> LensFacing {
        self.lens
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
}

impl Drop for Frame {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels)
            .field("index", &self.index)
            .field("crop_rect", &self.crop_rect)
            .field("lens", &self.lens)
            .field("orientation", &self.orientation)
            .field("has_release", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_hook(counter: &Arc<AtomicUsize>) -> ReleaseHook {
        let counter = counter.clone();
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 3, 5);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    fn test_crop_rect_defaults_to_full_frame() {
        let frame = Frame::new(vec![0u8; 24], 4, 2, 3, 0);
        assert_eq!(frame.crop_rect(), BoundingBox::new(0.0, 0.0, 4.0, 2.0));
    }

    #[test]
    fn test_builder_overrides_metadata() {
        let frame = Frame::new(vec![0u8; 12], 2, 2, 3, 0)
            .with_crop_rect(BoundingBox::new(0.0, 0.0, 1.0, 1.0))
            .with_lens(LensFacing::Back)
            .with_orientation(Orientation::Landscape);
        assert_eq!(frame.crop_rect(), BoundingBox::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(frame.lens(), LensFacing::Back);
        assert_eq!(frame.orientation(), Orientation::Landscape);
    }

    #[test]
    fn test_release_hook_runs_once_on_drop() {
        let released = Arc::new(AtomicUsize::new(0));
        let frame = Frame::new(vec![0u8; 3], 1, 1, 3, 0).with_release(counting_hook(&released));
        assert_eq!(released.load(Ordering::SeqCst), 0);
        drop(frame);
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_release_hook_runs_when_moved_across_threads() {
        let released = Arc::new(AtomicUsize::new(0));
        let frame = Frame::new(vec![0u8; 3], 1, 1, 3, 0).with_release(counting_hook(&released));
        std::thread::spawn(move || drop(frame)).join().unwrap();
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_frame_without_hook_drops_quietly() {
        let frame = Frame::new(vec![0u8; 3], 1, 1, 3, 0);
        assert!(format!("{frame:?}").contains("has_release: false"));
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        let data = vec![0u8; 10]; // wrong size for 2x2x3
        Frame::new(data, 2, 2, 3, 0);
    }
}
