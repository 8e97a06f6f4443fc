//! formfit Core - photo and signature resizing for form uploads
//!
//! This crate holds everything the front-ends share: upload validation, the
//! requirement table, the upload/requirement/editor wizard, bitmap decoding,
//! brightness/contrast, crop and zoom, export, translations, page routing and
//! contact form validation.

pub mod adjustments;
pub mod contact;
pub mod decode;
pub mod editor;
pub mod encode;
pub mod i18n;
pub mod requirement;
pub mod route;
pub mod transform;
pub mod upload;
pub mod wizard;

pub use adjustments::{apply_adjustments, Adjustments};
pub use contact::{ContactError, ContactForm, Field};
pub use decode::{decode_image, Bitmap, DecodeError};
pub use editor::{Editor, EditorError};
pub use encode::{EncodeError, ExportOptions, ExportedFile, OutputFormat};
pub use i18n::{Language, MemoryStore, PreferenceStore, StoreError, Translator};
pub use requirement::{Category, Requirement, REQUIREMENTS};
pub use route::Page;
pub use transform::{CropRect, Zoom};
pub use upload::{validate_file, FileInput, SelectedFile, UploadError};
pub use wizard::{Step, Wizard, WizardError};
