//! Image decoding pipeline for formfit.
//!
//! This module provides functionality for:
//! - Decoding JPEG and PNG uploads into RGBA bitmaps
//! - Applying EXIF orientation so phone photos come out upright
//! - Resizing bitmaps (exact stretch and fit-within-box)
//!
//! All operations are synchronous and single-threaded.

mod reader;
mod resize;
mod types;

pub use reader::{decode_image, get_orientation};
pub use resize::{fit_within, resize};
pub(crate) use resize::truncate_dimension;
pub use types::{Bitmap, DecodeError, Orientation};
