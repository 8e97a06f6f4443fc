//! Final export: stretch to the requirement's size, encode, name the file.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{encode, EncodeError, OutputFormat};
use crate::decode::{self, Bitmap, DecodeError};
use crate::requirement::Requirement;

/// Quality used when the caller does not pick one.
pub const DEFAULT_QUALITY: f32 = 0.8;

/// Lowest quality the size-limit search will go down to.
const MIN_FIT_QUALITY: f32 = 0.1;
const FIT_QUALITY_STEP: f32 = 0.1;

/// User choices for an export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    pub format: OutputFormat,
    /// Canvas-style quality, 0.0 to 1.0. Ignored for PNG.
    pub quality: f32,
    /// Lower JPEG quality until the file fits the requirement's size limit.
    #[serde(default)]
    pub fit_size_limit: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Jpeg,
            quality: DEFAULT_QUALITY,
            fit_size_limit: false,
        }
    }
}

impl ExportOptions {
    /// Options matching a requirement's preferred format.
    pub fn for_requirement(requirement: &Requirement) -> Self {
        Self {
            format: requirement.format.default_output(),
            ..Self::default()
        }
    }
}

/// An encoded file ready to be downloaded or written.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFile {
    pub file_name: String,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    /// Quality the bytes were actually encoded with.
    pub quality: f32,
    pub bytes: Vec<u8>,
    /// `None` when the requirement has no size limit.
    pub within_size_limit: Option<bool>,
}

impl ExportedFile {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn size_kb(&self) -> f64 {
        self.bytes.len() as f64 / 1024.0
    }
}

/// Download name for an export: `resized-<requirement>.<format>`.
pub fn export_file_name(requirement: &Requirement, format: OutputFormat) -> String {
    format!("resized-{}.{}", requirement.id, format.extension())
}

/// Stretch `canvas` to the requirement's pixel size and encode it.
///
/// The aspect ratio of `canvas` is not preserved.
///
/// # Errors
///
/// Returns an error if `canvas` is malformed or the encoder fails.
pub fn export_bitmap(
    canvas: &Bitmap,
    requirement: &Requirement,
    options: &ExportOptions,
) -> Result<ExportedFile, EncodeError> {
    let (width, height) = requirement.pixel_size();
    let target = decode::resize(canvas, width, height).map_err(|e| match e {
        DecodeError::InvalidDimensions { width, height } => {
            EncodeError::InvalidDimensions { width, height }
        }
        other => EncodeError::EncodingFailed(other.to_string()),
    })?;

    let limit = requirement.max_size_bytes();
    let mut quality = if options.quality.is_nan() {
        DEFAULT_QUALITY
    } else {
        options.quality.clamp(0.0, 1.0)
    };
    let mut bytes = encode(&target.pixels, width, height, options.format, quality)?;

    if options.fit_size_limit && options.format == OutputFormat::Jpeg {
        if let Some(limit) = limit {
            while bytes.len() > limit && quality > MIN_FIT_QUALITY + f32::EPSILON {
                quality = (quality - FIT_QUALITY_STEP).max(MIN_FIT_QUALITY);
                bytes = encode(&target.pixels, width, height, options.format, quality)?;
                debug!(quality, size = bytes.len(), limit, "retrying export at lower quality");
            }
        }
    }

    let file = ExportedFile {
        file_name: export_file_name(requirement, options.format),
        format: options.format,
        width,
        height,
        quality,
        within_size_limit: limit.map(|l| bytes.len() <= l),
        bytes,
    };
    info!(
        file = %file.file_name,
        width,
        height,
        size = file.bytes.len(),
        "exported image"
    );
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirement;

    fn noisy_bitmap(width: u32, height: u32) -> Bitmap {
        // Deterministic noise so JPEG size actually depends on quality
        let mut state = 0x2545_f491_u32;
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            for _ in 0..3 {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                pixels.push((state & 0xFF) as u8);
            }
            pixels.push(255);
        }
        Bitmap::new(width, height, pixels)
    }

    #[test]
    fn test_file_name() {
        let req = requirement::find("pan-photo").unwrap();
        assert_eq!(export_file_name(req, OutputFormat::Jpeg), "resized-pan-photo.jpeg");
        assert_eq!(export_file_name(req, OutputFormat::Png), "resized-pan-photo.png");
    }

    #[test]
    fn test_export_matches_requirement_size() {
        let req = requirement::find("pan-signature").unwrap();
        let canvas = Bitmap::filled(300, 300, [10, 10, 10, 255]);

        let file = export_bitmap(&canvas, req, &ExportOptions::default()).unwrap();

        assert_eq!((file.width, file.height), (140, 60));
        assert_eq!(file.mime_type(), "image/jpeg");
        assert_eq!(file.within_size_limit, None);
        let decoded = crate::decode::decode_image(&file.bytes).unwrap();
        assert_eq!((decoded.width, decoded.height), (140, 60));
    }

    #[test]
    fn test_export_png_for_document() {
        let req = requirement::find("a4-document").unwrap();
        let canvas = Bitmap::filled(60, 80, [255, 255, 255, 255]);
        let options = ExportOptions::for_requirement(req);

        let file = export_bitmap(&canvas, req, &options).unwrap();

        assert_eq!(file.file_name, "resized-a4-document.png");
        assert_eq!(&file.bytes[1..4], b"PNG");
    }

    #[test]
    fn test_export_reports_size_limit() {
        let req = requirement::find("photo").unwrap();
        let canvas = Bitmap::filled(50, 70, [128, 128, 128, 255]);

        let file = export_bitmap(&canvas, req, &ExportOptions::default()).unwrap();

        // A flat gray 295x413 JPEG is far below 20 KB
        assert_eq!(file.within_size_limit, Some(true));
    }

    #[test]
    fn test_fit_size_limit_lowers_quality() {
        let req = requirement::find("photo").unwrap();
        let canvas = noisy_bitmap(295, 413);
        let options = ExportOptions {
            quality: 1.0,
            fit_size_limit: true,
            ..ExportOptions::default()
        };

        let fitted = export_bitmap(&canvas, req, &options).unwrap();
        let unfitted = export_bitmap(
            &canvas,
            req,
            &ExportOptions {
                fit_size_limit: false,
                ..options
            },
        )
        .unwrap();

        assert!(fitted.quality < 1.0);
        assert!(fitted.bytes.len() < unfitted.bytes.len());
        assert!(fitted.quality >= MIN_FIT_QUALITY - f32::EPSILON);
    }

    #[test]
    fn test_fit_size_limit_ignored_without_limit() {
        let req = requirement::find("pan-photo").unwrap();
        let canvas = noisy_bitmap(40, 40);
        let options = ExportOptions {
            quality: 0.9,
            fit_size_limit: true,
            ..ExportOptions::default()
        };

        let file = export_bitmap(&canvas, req, &options).unwrap();
        assert!((file.quality - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn test_export_rejects_malformed_canvas() {
        let req = requirement::find("pan-photo").unwrap();
        let canvas = Bitmap {
            width: 10,
            height: 10,
            pixels: vec![0; 3],
        };
        assert!(export_bitmap(&canvas, req, &ExportOptions::default()).is_err());
    }
}
