//! Zoom factor and the canvas size it implies.

use serde::{Deserialize, Serialize};

use crate::decode::truncate_dimension;

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 5.0;
/// Factor applied by one "zoom in" click.
pub const ZOOM_IN_STEP: f64 = 1.2;
/// Factor applied by one "zoom out" click.
pub const ZOOM_OUT_STEP: f64 = 0.8;
/// A zoomed canvas is drawn at half the source size times the zoom.
const ZOOM_CANVAS_SCALE: f64 = 0.5;

/// Zoom factor, always within [`MIN_ZOOM`, `MAX_ZOOM`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zoom(f64);

impl Default for Zoom {
    fn default() -> Self {
        Zoom(1.0)
    }
}

impl Zoom {
    /// Create a zoom factor, clamped into range. NaN becomes 1.
    pub fn new(factor: f64) -> Self {
        if factor.is_nan() {
            return Self::default();
        }
        Zoom(factor.clamp(MIN_ZOOM, MAX_ZOOM))
    }

    pub fn factor(self) -> f64 {
        self.0
    }

    /// Multiply by `step` and clamp.
    #[must_use]
    pub fn scaled(self, step: f64) -> Self {
        Self::new(self.0 * step)
    }

    #[must_use]
    pub fn zoom_in(self) -> Self {
        self.scaled(ZOOM_IN_STEP)
    }

    #[must_use]
    pub fn zoom_out(self) -> Self {
        self.scaled(ZOOM_OUT_STEP)
    }

    /// Canvas size for a source of `width` x `height` at this zoom.
    pub fn canvas_size(self, width: u32, height: u32) -> (u32, u32) {
        let scale = self.0 * ZOOM_CANVAS_SCALE;
        (
            truncate_dimension(f64::from(width) * scale),
            truncate_dimension(f64::from(height) * scale),
        )
    }
}
