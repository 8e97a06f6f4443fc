//! Upload validation: which files the wizard accepts.

use serde::Serialize;
use thiserror::Error;

/// Largest accepted upload, 10 MB.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// MIME types accepted by the upload step.
pub const ALLOWED_MIME_TYPES: [&str; 4] =
    ["image/jpeg", "image/jpg", "image/png", "application/pdf"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("File size exceeds 10MB limit ({size} bytes)")]
    TooLarge { size: u64, max: u64 },

    #[error("Please select a valid image file (JPG, PNG) or PDF document (got {0})")]
    UnsupportedType(String),
}

/// A file as handed over by the front-end (file picker, drag-drop, CLI path).
#[derive(Debug, Clone, Copy)]
pub struct FileInput<'a> {
    pub name: &'a str,
    pub mime_type: &'a str,
    pub bytes: &'a [u8],
}

impl<'a> FileInput<'a> {
    pub fn new(name: &'a str, mime_type: &'a str, bytes: &'a [u8]) -> Self {
        Self {
            name,
            mime_type,
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Metadata kept about the accepted file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

impl SelectedFile {
    /// Only image uploads are decoded into the editor; PDFs are not.
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// Check size, then type. Nothing is decoded here.
pub fn validate_file(input: &FileInput<'_>) -> Result<SelectedFile, UploadError> {
    let size = input.size();
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge {
            size,
            max: MAX_UPLOAD_BYTES,
        });
    }

    let mime_type = input.mime_type.trim().to_ascii_lowercase();
    if !ALLOWED_MIME_TYPES.contains(&mime_type.as_str()) {
        return Err(UploadError::UnsupportedType(input.mime_type.to_string()));
    }

    Ok(SelectedFile {
        name: input.name.to_string(),
        mime_type,
        size,
    })
}

/// Guess a MIME type from a file name's extension.
///
/// Unknown extensions map to `application/octet-stream`, which the
/// validator rejects.
pub fn mime_type_for_name(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_allowed_types() {
        for mime in ALLOWED_MIME_TYPES {
            let input = FileInput::new("a", mime, &[1, 2, 3]);
            let file = validate_file(&input).unwrap();
            assert_eq!(file.size, 3);
            assert_eq!(file.mime_type, mime);
        }
    }

    #[test]
    fn test_mime_type_case_insensitive() {
        let input = FileInput::new("a.PNG", "Image/PNG", &[0]);
        assert_eq!(validate_file(&input).unwrap().mime_type, "image/png");
    }

    #[test]
    fn test_rejects_other_types() {
        let input = FileInput::new("a.gif", "image/gif", &[0]);
        assert_eq!(
            validate_file(&input),
            Err(UploadError::UnsupportedType("image/gif".to_string()))
        );
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        let bytes = vec![0u8; MAX_UPLOAD_BYTES as usize];
        assert!(validate_file(&FileInput::new("a.jpg", "image/jpeg", &bytes)).is_ok());

        let bytes = vec![0u8; MAX_UPLOAD_BYTES as usize + 1];
        assert!(matches!(
            validate_file(&FileInput::new("a.jpg", "image/jpeg", &bytes)),
            Err(UploadError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_size_checked_before_type() {
        let bytes = vec![0u8; MAX_UPLOAD_BYTES as usize + 1];
        assert!(matches!(
            validate_file(&FileInput::new("a.exe", "application/x-msdownload", &bytes)),
            Err(UploadError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_is_image() {
        let photo = validate_file(&FileInput::new("a.jpg", "image/jpeg", &[0])).unwrap();
        let pdf = validate_file(&FileInput::new("a.pdf", "application/pdf", &[0])).unwrap();
        assert!(photo.is_image());
        assert!(!pdf.is_image());
    }

    #[test]
    fn test_mime_type_for_name() {
        assert_eq!(mime_type_for_name("photo.JPG"), "image/jpeg");
        assert_eq!(mime_type_for_name("scan.pdf"), "application/pdf");
        assert_eq!(mime_type_for_name("sig.png"), "image/png");
        assert_eq!(mime_type_for_name("README"), "application/octet-stream");
    }
}
