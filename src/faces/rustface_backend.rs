//! SeetaFace detector backend

use super::detector::{BoundingBox, FaceDetector};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Face detector backed by the `rustface` crate (SeetaFace engine).
///
/// The detection model is loaded from disk once at construction; detection
/// itself instantiates a fresh detector per call because `rustface`
/// detectors are stateful and not `Sync`.
pub struct RustfaceDetector {
    model: rustface::Model,
    min_face_size: u32,
}

impl RustfaceDetector {
    /// Load a SeetaFace model file from disk.
    pub fn from_file(path: impl AsRef<Path>, min_face_size: u32) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("opening face model {}", path.display()))?;
        let model = rustface::read_model(BufReader::new(file))
            .map_err(|e| anyhow::anyhow!("reading face model {}: {}", path.display(), e))?;

        Ok(Self {
            model,
            min_face_size,
        })
    }
}

impl FaceDetector for RustfaceDetector {
    fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<BoundingBox> {
        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(self.min_face_size);
        detector.set_score_thresh(2.0);
        detector.set_pyramid_scale_factor(0.8);
        detector.set_slide_window_step(4, 4);

        let faces = detector.detect(&rustface::ImageData::new(gray, width, height));

        faces
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                let left = (bbox.x().max(0) as u32).min(width);
                let top = (bbox.y().max(0) as u32).min(height);
                let right = (left + bbox.width()).min(width);
                let bottom = (top + bbox.height()).min(height);
                BoundingBox {
                    top,
                    right,
                    bottom,
                    left,
                }
            })
            .collect()
    }
}
