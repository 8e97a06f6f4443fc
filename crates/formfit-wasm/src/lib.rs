//! formfit WASM - WebAssembly bindings for formfit
//!
//! This crate exposes the formfit-core wizard to the browser page.
//!
//! # Module Structure
//!
//! - `wizard` - Upload/requirement/editor flow, editor controls and export
//! - `i18n` - English/Hindi labels, language saved in `localStorage`
//! - `catalog` - Requirement lists, step labels, page titles, contact form validation
//! - `types` - WASM-compatible wrapper types for canvases and exported files
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsWizard, JsTranslator, requirements } from '@formfit/wasm';
//!
//! await init();
//!
//! const t = new JsTranslator();
//! const wizard = new JsWizard();
//! wizard.select_file(file.name, file.type, new Uint8Array(await file.arrayBuffer()));
//! try {
//!   wizard.next();
//! } catch (e) {
//!   alert(t.t(e.key ?? ''));
//! }
//! ```

use wasm_bindgen::prelude::*;

mod catalog;
mod i18n;
mod types;
mod wizard;

// Re-export public types
pub use catalog::{
    page_title, requirements, step_label_key, validate_contact, FieldError, RequirementInfo,
};
pub use i18n::{JsTranslator, LocalStorage};
pub use types::{JsBitmap, JsExportedFile};
pub use wizard::JsWizard;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Largest accepted upload in bytes, for the "maximum file size" hint
#[wasm_bindgen]
pub fn max_upload_bytes() -> f64 {
    formfit_core::upload::MAX_UPLOAD_BYTES as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_max_upload_bytes() {
        assert_eq!(max_upload_bytes(), 10_485_760.0);
    }
}
