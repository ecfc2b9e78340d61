use std::sync::{Mutex, MutexGuard};

use crate::overlay::domain::overlay_annotation::OverlayAnnotation;
use crate::overlay::domain::overlay_surface::OverlaySurface;
use crate::shared::constants::BOX_STROKE_WIDTH;

#[derive(Debug, Default)]
struct Inner {
    annotations: Vec<OverlayAnnotation>,
    width: f32,
    height: f32,
}

/// Annotations drawn over the camera preview, rebuilt every frame.
///
/// A single mutex covers both the annotation list and the overlay size so
/// that the render path never observes a half-rebuilt frame.
#[derive(Debug)]
pub struct OverlayState {
    inner: Mutex<Inner>,
    stroke_width: f32,
}

impl OverlayState {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            inner: Mutex::new(Inner {
                annotations: Vec::new(),
                width,
                height,
            }),
            stroke_width: BOX_STROKE_WIDTH,
        }
    }

    pub fn with_stroke_width(mut self, stroke_width: f32) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    // A panic while holding the lock leaves plain data behind; keep using it.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn size(&self) -> (f32, f32) {
        let inner = self.lock();
        (inner.width, inner.height)
    }

    /// Called when the preview view is laid out or resized.
    pub fn set_size(&self, width: f32, height: f32) {
        let mut inner = self.lock();
        inner.width = width;
        inner.height = height;
    }

    pub fn clear(&self) {
        self.lock().annotations.clear();
    }

    pub fn add(&self, annotation: OverlayAnnotation) {
        self.lock().annotations.push(annotation);
    }

    /// Clears and repopulates in one critical section.
    pub fn replace(&self, annotations: Vec<OverlayAnnotation>) {
        self.lock().annotations = annotations;
    }

    pub fn snapshot(&self) -> Vec<OverlayAnnotation> {
        self.lock().annotations.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn draw(&self, surface: &mut dyn OverlaySurface) {
        let inner = self.lock();
        for annotation in &inner.annotations {
            surface.stroke_rect(&annotation.rect, annotation.color, self.stroke_width);
        }
    }
}
