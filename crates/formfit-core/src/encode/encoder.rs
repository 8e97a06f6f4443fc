//! JPEG and PNG encoding for export.
//!
//! Uses the `image` crate's built-in encoders. Input is always RGBA; JPEG has
//! no alpha channel, so alpha is dropped before encoding.

use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    #[error("Cannot encode a {width}x{height} image")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Output formats the exporter can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Png,
}

impl OutputFormat {
    /// File extension used in download names (`jpeg`, `png`).
    pub const fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
        }
    }

    /// MIME type passed to the encoder.
    pub const fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" | "image/jpeg" => Ok(OutputFormat::Jpeg),
            "png" | "image/png" => Ok(OutputFormat::Png),
            other => Err(EncodeError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Map a canvas-style quality (0.0 to 1.0) to a JPEG quality (1 to 100).
///
/// Out-of-range and NaN inputs are clamped; NaN maps to the 0.8 default.
pub fn quality_to_jpeg(quality: f32) -> u8 {
    let q = if quality.is_nan() { 0.8 } else { quality.clamp(0.0, 1.0) };
    ((q * 100.0).round() as u8).clamp(1, 100)
}

/// Encode RGBA pixel data to JPEG bytes.
///
/// `quality` is 1-100 and is clamped into that range.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    validate(pixels, width, height)?;

    let rgb: Vec<u8> = pixels
        .chunks_exact(4)
        .flat_map(|p| [p[0], p[1], p[2]])
        .collect();

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
        .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Encode RGBA pixel data to PNG bytes. PNG is lossless; there is no quality.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    validate(pixels, width, height)?;

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Encode in the given format with a canvas-style quality (0.0 to 1.0).
pub fn encode(
    pixels: &[u8],
    width: u32,
    height: u32,
    format: OutputFormat,
    quality: f32,
) -> Result<Vec<u8>, EncodeError> {
    match format {
        OutputFormat::Jpeg => encode_jpeg(pixels, width, height, quality_to_jpeg(quality)),
        OutputFormat::Png => encode_png(pixels, width, height),
    }
}

fn validate(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }
    let expected = width as usize * height as usize * 4;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_encode_jpeg_basic() {
        let pixels = vec![128u8; 100 * 100 * 4];
        let jpeg = encode_jpeg(&pixels, 100, 100, 90).unwrap();

        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_png_basic() {
        let pixels = vec![200u8; 10 * 5 * 4];
        let png = encode_png(&pixels, 10, 5).unwrap();
        assert_eq!(&png[0..8], &PNG_MAGIC);
    }

    #[test]
    fn test_encode_dispatches_on_format() {
        let pixels = vec![50u8; 4 * 4 * 4];
        let jpeg = encode(&pixels, 4, 4, OutputFormat::Jpeg, 0.8).unwrap();
        let png = encode(&pixels, 4, 4, OutputFormat::Png, 0.8).unwrap();

        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        assert_eq!(&png[0..8], &PNG_MAGIC);
    }

    #[test]
    fn test_encode_invalid_dimensions() {
        let result = encode_jpeg(&[], 0, 10, 90);
        assert!(matches!(
            result,
            Err(EncodeError::InvalidDimensions {
                width: 0,
                height: 10
            })
        ));
    }

    #[test]
    fn test_encode_invalid_pixel_data() {
        let pixels = vec![0u8; 10];
        match encode_png(&pixels, 2, 2) {
            Err(EncodeError::InvalidPixelData { expected, actual }) => {
                assert_eq!(expected, 16);
                assert_eq!(actual, 10);
            }
            other => panic!("Expected InvalidPixelData, got {:?}", other),
        }
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        let pixels = vec![128u8; 10 * 10 * 4];
        assert!(encode_jpeg(&pixels, 10, 10, 0).is_ok());
        assert!(encode_jpeg(&pixels, 10, 10, 255).is_ok());
    }

    #[test]
    fn test_quality_to_jpeg() {
        assert_eq!(quality_to_jpeg(0.8), 80);
        assert_eq!(quality_to_jpeg(1.0), 100);
        assert_eq!(quality_to_jpeg(0.0), 1);
        assert_eq!(quality_to_jpeg(-3.0), 1);
        assert_eq!(quality_to_jpeg(7.0), 100);
        assert_eq!(quality_to_jpeg(f32::NAN), 80);
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("jpeg".parse::<OutputFormat>().unwrap(), OutputFormat::Jpeg);
        assert_eq!("JPG".parse::<OutputFormat>().unwrap(), OutputFormat::Jpeg);
        assert_eq!("image/png".parse::<OutputFormat>().unwrap(), OutputFormat::Png);
        assert!("pdf".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_names() {
        assert_eq!(OutputFormat::Jpeg.extension(), "jpeg");
        assert_eq!(OutputFormat::Png.mime_type(), "image/png");
        assert_eq!(OutputFormat::Png.to_string(), "png");
    }
}
