//! Face detection and crop utilities
//!
//! The detection backend is behind the [`FaceDetector`] trait; the
//! orchestrator never depends on a concrete engine.

mod crop;
mod detector;
mod rustface_backend;

pub use crop::{crop_to_box, encode_jpeg, FaceCropError};
pub use detector::{BoundingBox, FaceDetector};
pub use rustface_backend::RustfaceDetector;
