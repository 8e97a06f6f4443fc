//! Image encoding and export for formfit.
//!
//! This module provides functionality for:
//! - Encoding RGBA bitmaps to JPEG (with quality) or PNG
//! - Exporting a canvas at a requirement's exact pixel size
//! - Naming the downloaded file
//!
//! All operations are synchronous and single-threaded.

mod encoder;
mod export;

pub use encoder::{
    encode, encode_jpeg, encode_png, quality_to_jpeg, EncodeError, OutputFormat,
};
pub use export::{
    export_bitmap, export_file_name, ExportOptions, ExportedFile, DEFAULT_QUALITY,
};
