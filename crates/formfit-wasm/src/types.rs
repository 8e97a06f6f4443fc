//! WASM-compatible wrapper types for canvases and exported files.
//!
//! These types wrap the core formfit types and handle the conversion between
//! Rust and JavaScript data representations.

use formfit_core::decode::Bitmap;
use formfit_core::encode::ExportedFile;
use formfit_core::WizardError;
use wasm_bindgen::prelude::*;

/// An RGBA bitmap for drawing onto a canvas with `ImageData`.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. `pixels()` copies it into a
/// JavaScript `Uint8Array`, which can be wrapped in a `Uint8ClampedArray`
/// and passed to `new ImageData(...)`.
#[wasm_bindgen]
pub struct JsBitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsBitmap {
    /// Create a bitmap from dimensions and RGBA pixel data (4 bytes per pixel).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsBitmap {
        JsBitmap {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsBitmap {
    pub(crate) fn from_bitmap(bitmap: &Bitmap) -> Self {
        Self {
            width: bitmap.width,
            height: bitmap.height,
            pixels: bitmap.pixels.clone(),
        }
    }
}

/// An encoded file ready to hand to a download link.
///
/// ```typescript
/// const file = wizard.export();
/// const url = URL.createObjectURL(new Blob([file.bytes()], { type: file.mime_type }));
/// link.download = file.file_name;
/// ```
#[wasm_bindgen]
pub struct JsExportedFile {
    inner: ExportedFile,
}

#[wasm_bindgen]
impl JsExportedFile {
    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        self.inner.file_name.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.inner.mime_type().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Quality the file was encoded with (0.0 to 1.0)
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> f32 {
        self.inner.quality
    }

    #[wasm_bindgen(getter)]
    pub fn size_kb(&self) -> f64 {
        self.inner.size_kb()
    }

    /// `undefined` when the requirement has no size limit.
    #[wasm_bindgen(getter)]
    pub fn within_size_limit(&self) -> Option<bool> {
        self.inner.within_size_limit
    }

    /// Encoded file contents as Uint8Array (a copy).
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }
}

impl From<ExportedFile> for JsExportedFile {
    fn from(inner: ExportedFile) -> Self {
        Self { inner }
    }
}

/// Convert a wizard error into a JS `Error`.
///
/// The error carries a `key` property with the translation key of the alert
/// to show, when the error has one.
pub(crate) fn wizard_error(err: WizardError) -> JsValue {
    let js_err = js_sys::Error::new(&err.to_string());
    if let Some(key) = err.message_key() {
        // Reflect::set only fails on frozen objects
        let _ = js_sys::Reflect::set(&js_err, &JsValue::from_str("key"), &JsValue::from_str(key));
    }
    if matches!(err, WizardError::Decode(_)) {
        web_sys::console::error_1(&js_err);
    }
    js_err.into()
}

/// Convert any other error into a JS string value.
pub(crate) fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
