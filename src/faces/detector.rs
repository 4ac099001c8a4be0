//! Face region detection seam

use serde::Serialize;

/// Axis-aligned face bounding box in source-image pixel coordinates.
///
/// Invariant: `top <= bottom`, `left <= right`, and the box lies within
/// the dimensions of the image it was detected in. Backends clamp before
/// returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl BoundingBox {
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }
}

/// Pluggable face detection backend.
///
/// The image search orchestrator only depends on this trait; tests swap in
/// stub detectors and production wires in the SeetaFace backend.
pub trait FaceDetector: Send + Sync {
    /// Detect faces in a row-major grayscale buffer of `width` × `height`
    /// bytes. Boxes are returned in backend-reported order, clamped to the
    /// image dimensions.
    fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<BoundingBox>;
}
