//! Brightness and contrast.
//!
//! Each RGB channel is mapped through
//! `clamp(0, 255, (channel - 128) * contrast / 100 + 128 + brightness)`.
//! Alpha is never touched. Callers apply it to a fresh copy of an
//! unadjusted snapshot, so it does not accumulate across slider moves.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Accepted brightness offsets.
pub const BRIGHTNESS_RANGE: RangeInclusive<i32> = -100..=100;
/// Accepted contrast percentages.
pub const CONTRAST_RANGE: RangeInclusive<i32> = 0..=200;

/// The two slider values of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjustments {
    /// Signed offset added to each channel.
    pub brightness: i32,
    /// Contrast in percent; 100 leaves the image unchanged.
    pub contrast: i32,
}

impl Default for Adjustments {
    fn default() -> Self {
        Self {
            brightness: 0,
            contrast: 100,
        }
    }
}

impl Adjustments {
    pub fn new(brightness: i32, contrast: i32) -> Self {
        Self {
            brightness: brightness.clamp(*BRIGHTNESS_RANGE.start(), *BRIGHTNESS_RANGE.end()),
            contrast: contrast.clamp(*CONTRAST_RANGE.start(), *CONTRAST_RANGE.end()),
        }
    }

    /// Check if all values are at their defaults
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Lookup table for one channel. All three channels share the same curve.
    pub fn lut(&self) -> [u8; 256] {
        let factor = self.contrast as f32 / 100.0;
        let brightness = self.brightness as f32;
        let mut lut = [0u8; 256];
        for (value, out) in lut.iter_mut().enumerate() {
            let v = (value as f32 - 128.0) * factor + 128.0 + brightness;
            *out = v.round().clamp(0.0, 255.0) as u8;
        }
        lut
    }
}

/// Apply brightness/contrast to RGBA pixels in place.
pub fn apply_adjustments(pixels: &mut [u8], adjustments: &Adjustments) {
    if adjustments.is_identity() {
        return;
    }

    let lut = adjustments.lut();
    for chunk in pixels.chunks_exact_mut(4) {
        chunk[0] = lut[chunk[0] as usize];
        chunk[1] = lut[chunk[1] as usize];
        chunk[2] = lut[chunk[2] as usize];
    }
}
