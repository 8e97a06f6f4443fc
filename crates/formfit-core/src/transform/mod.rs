//! Canvas geometry: cropping and zoom.
//!
//! # Coordinate System
//!
//! - Crop rectangles are normalized (0.0 to 1.0) relative to the canvas
//! - Origin is the top-left corner
//! - Zoom redraws the canvas at `source_size * zoom * 0.5`

mod crop;
mod zoom;

pub use crop::{apply_crop, CropRect, MIN_CROP_FRACTION};
pub use zoom::{Zoom, MAX_ZOOM, MIN_ZOOM, ZOOM_IN_STEP, ZOOM_OUT_STEP};
