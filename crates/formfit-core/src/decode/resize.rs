//! Bitmap resizing.
//!
//! Stands in for `drawImage` with a destination size: the source is stretched
//! to exactly the requested dimensions.
//! All functions return new `Bitmap` instances without modifying the input.

use image::imageops::FilterType;

use super::{Bitmap, DecodeError};

/// Resize a bitmap to exact dimensions, ignoring aspect ratio.
///
/// Uses linear filtering, the way a 2D canvas draws with smoothing on.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either target dimension is
/// zero, and `DecodeError::CorruptedFile` if the pixel buffer does not match
/// the bitmap's dimensions.
pub fn resize(bitmap: &Bitmap, width: u32, height: u32) -> Result<Bitmap, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    if bitmap.width == width && bitmap.height == height {
        return Ok(bitmap.clone());
    }

    let rgba = bitmap
        .to_rgba_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbaImage".to_string()))?;

    let resized = image::imageops::resize(&rgba, width, height, FilterType::Triangle);

    Ok(Bitmap::from_rgba_image(resized))
}

/// Dimensions of `width` x `height` shrunk to fit the given box.
///
/// Fractional sizes are truncated the way assigning to `canvas.width` does,
/// and never drop below one pixel.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let ratio = (f64::from(max_width) / f64::from(width))
        .min(f64::from(max_height) / f64::from(height));
    (
        truncate_dimension(f64::from(width) * ratio),
        truncate_dimension(f64::from(height) * ratio),
    )
}

/// Convert a fractional canvas dimension to whole pixels (minimum 1).
pub(crate) fn truncate_dimension(value: f64) -> u32 {
    if !value.is_finite() || value < 1.0 {
        return 1;
    }
    value.min(f64::from(u32::MAX)) as u32
}
