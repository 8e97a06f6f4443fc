//! Crop box geometry and pixel cropping.
//!
//! All rectangles are normalized (0.0 to 1.0) relative to the canvas they
//! sit on, with the origin at the top-left corner. This keeps the crop box
//! valid when the canvas is redrawn at a different zoom.

use serde::{Deserialize, Serialize};

use crate::decode::Bitmap;

/// Smallest box edge, as a fraction of the canvas.
pub const MIN_CROP_FRACTION: f64 = 0.01;

/// A normalized rectangle: the draggable crop box, or a committed crop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for CropRect {
    /// The box shown when crop mode is entered: 60% of the canvas, centered.
    fn default() -> Self {
        Self {
            left: 0.2,
            top: 0.2,
            width: 0.6,
            height: 0.6,
        }
    }
}

impl CropRect {
    /// The whole canvas.
    pub const FULL: CropRect = CropRect {
        left: 0.0,
        top: 0.0,
        width: 1.0,
        height: 1.0,
    };

    /// Build a rectangle, clamped so it lies inside the unit square.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        let mut rect = Self::FULL;
        rect.resize_to(width, height);
        rect.move_to(left, top);
        rect.resize_to(width, height);
        rect
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn is_full(&self) -> bool {
        self.left <= 0.0 && self.top <= 0.0 && self.width >= 1.0 && self.height >= 1.0
    }

    /// Drag the box so its top-left corner is at (`left`, `top`).
    ///
    /// The position is clamped so the box never leaves the canvas.
    pub fn move_to(&mut self, left: f64, top: f64) {
        self.left = clamp_unit(left, 1.0 - self.width);
        self.top = clamp_unit(top, 1.0 - self.height);
    }

    /// Drag the box by a relative offset.
    pub fn move_by(&mut self, dx: f64, dy: f64) {
        self.move_to(self.left + dx, self.top + dy);
    }

    /// Change the box size, keeping its top-left corner.
    ///
    /// Sizes are clamped to the room left between the corner and the canvas
    /// edge and never go below `MIN_CROP_FRACTION`.
    pub fn resize_to(&mut self, width: f64, height: f64) {
        let max_w = (1.0 - self.left).max(MIN_CROP_FRACTION);
        let max_h = (1.0 - self.top).max(MIN_CROP_FRACTION);
        self.width = clamp_size(width, max_w);
        self.height = clamp_size(height, max_h);
        // Corner may have to move back if it sat in the last sliver
        self.left = self.left.min(1.0 - self.width);
        self.top = self.top.min(1.0 - self.height);
    }

    /// Express `inner` (relative to this rectangle) relative to the canvas
    /// this rectangle lives on. Used to stack a second crop on a first.
    pub fn compose(&self, inner: &CropRect) -> CropRect {
        CropRect {
            left: self.left + inner.left * self.width,
            top: self.top + inner.top * self.height,
            width: inner.width * self.width,
            height: inner.height * self.height,
        }
    }
}

fn clamp_unit(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, max.max(0.0))
}

fn clamp_size(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        return max;
    }
    value.clamp(MIN_CROP_FRACTION, max)
}

/// Crop a bitmap to a normalized rectangle.
///
/// Coordinates outside the bitmap are clamped, the output is at least 1x1,
/// and a full-canvas rectangle returns a copy of the input.
pub fn apply_crop(bitmap: &Bitmap, rect: &CropRect) -> Bitmap {
    if rect.is_full() {
        return bitmap.clone();
    }

    let src_w = f64::from(bitmap.width);
    let src_h = f64::from(bitmap.height);

    let px_left = (rect.left.clamp(0.0, 1.0) * src_w).round() as u32;
    let px_top = (rect.top.clamp(0.0, 1.0) * src_h).round() as u32;
    let px_width = (rect.width.clamp(0.0, 1.0) * src_w).round() as u32;
    let px_height = (rect.height.clamp(0.0, 1.0) * src_h).round() as u32;

    let px_left = px_left.min(bitmap.width.saturating_sub(1));
    let px_top = px_top.min(bitmap.height.saturating_sub(1));
    let px_right = (px_left + px_width).min(bitmap.width);
    let px_bottom = (px_top + px_height).min(bitmap.height);

    let out_width = px_right.saturating_sub(px_left).max(1);
    let out_height = px_bottom.saturating_sub(px_top).max(1);

    let stride = bitmap.width as usize * Bitmap::CHANNELS;
    let row_bytes = out_width as usize * Bitmap::CHANNELS;
    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    for y in px_top..px_top + out_height {
        let start = y as usize * stride + px_left as usize * Bitmap::CHANNELS;
        output.extend_from_slice(&bitmap.pixels[start..start + row_bytes]);
    }

    Bitmap::new(out_width, out_height, output)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn rect_strategy() -> impl Strategy<Value = CropRect> {
        (0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0)
            .prop_map(|(l, t, w, h)| CropRect::new(l, t, w, h))
    }

    proptest! {
        /// The box stays inside the canvas after any sequence of drags.
        #[test]
        fn prop_drag_stays_inside(
            rect in rect_strategy(),
            moves in prop::collection::vec((-2.0f64..2.0, -2.0f64..2.0), 0..20),
        ) {
            let mut rect = rect;
            for (dx, dy) in moves {
                rect.move_by(dx, dy);
                prop_assert!(rect.left >= 0.0 && rect.top >= 0.0);
                prop_assert!(rect.right() <= 1.0 + 1e-9);
                prop_assert!(rect.bottom() <= 1.0 + 1e-9);
            }
        }

        /// Cropped output is never empty and never larger than the input.
        #[test]
        fn prop_output_bounded(
            (width, height) in (1u32..=64, 1u32..=64),
            rect in rect_strategy(),
        ) {
            let bmp = Bitmap::filled(width, height, [1, 2, 3, 4]);
            let result = apply_crop(&bmp, &rect);

            prop_assert!(result.width >= 1 && result.width <= width);
            prop_assert!(result.height >= 1 && result.height <= height);
            prop_assert_eq!(
                result.pixels.len(),
                (result.width * result.height * 4) as usize
            );
        }
    }
}
