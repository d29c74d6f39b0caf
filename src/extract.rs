//! Text extraction from uploaded documents.
//!
//! Only plain text is supported. PDFs get through the upload picker but are
//! rejected here.

use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

/// Media type accepted by the extractor.
pub const PLAIN_TEXT: &str = "text/plain";

/// Media type the upload picker lets through without supporting it.
pub const PDF: &str = "application/pdf";

/// Errors that can occur during text extraction.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Declared media type is not plain text.
    #[error("Please upload a text file (.txt)")]
    UnsupportedFormat { media_type: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// An uploaded file: name, declared media type and raw bytes.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Build an upload, guessing the media type from the name when none is declared.
    pub fn new(name: impl Into<String>, media_type: Option<&str>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let media_type = match media_type.map(str::trim).filter(|m| !m.is_empty()) {
            Some(m) => m.to_string(),
            None => guess_media_type(&name),
        };
        Self {
            name,
            media_type,
            bytes,
        }
    }

    /// Read a file from disk.
    pub async fn from_path(path: &Path) -> Result<Self, ExtractionError> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, None, bytes))
    }

    /// Media type without parameters, lowercased.
    pub fn essence(&self) -> String {
        media_type_essence(&self.media_type)
    }
}

/// Guess a media type from a file name.
pub fn guess_media_type(name: &str) -> String {
    mime_guess::from_path(name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Strip parameters (e.g. `; charset=utf-8`) and lowercase.
pub fn media_type_essence(media_type: &str) -> String {
    media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Whether the upload picker lets this type through (plain text or PDF).
pub fn is_accepted_upload(media_type: &str) -> bool {
    matches!(media_type_essence(media_type).as_str(), PLAIN_TEXT | PDF)
}

/// Text extractor for uploaded documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextExtractor;

impl TextExtractor {
    /// Create a new text extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract the full text of an upload.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected.
    pub fn extract(&self, file: &UploadedFile) -> Result<String, ExtractionError> {
        if file.essence() != PLAIN_TEXT {
            warn!(
                "Rejecting {} with unsupported type {}",
                file.name, file.media_type
            );
            return Err(ExtractionError::UnsupportedFormat {
                media_type: file.media_type.clone(),
            });
        }

        let text = String::from_utf8_lossy(&file.bytes).into_owned();
        debug!("Extracted {} chars from {}", text.chars().count(), file.name);
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_returns_contents() {
        let file = UploadedFile::new("a.txt", Some("text/plain"), b"hola\nmundo".to_vec());
        assert_eq!(TextExtractor::new().extract(&file).unwrap(), "hola\nmundo");
    }

    #[test]
    fn test_plain_text_with_charset_parameter() {
        let file = UploadedFile::new("a.txt", Some("Text/Plain; charset=utf-8"), b"x".to_vec());
        assert_eq!(TextExtractor::new().extract(&file).unwrap(), "x");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let file = UploadedFile::new("a.txt", Some("text/plain"), vec![b'a', 0xff, b'b']);
        assert_eq!(TextExtractor::new().extract(&file).unwrap(), "a\u{fffd}b");
    }

    #[test]
    fn test_pdf_is_rejected() {
        let file = UploadedFile::new("a.pdf", Some("application/pdf"), b"%PDF-1.7".to_vec());
        let err = TextExtractor::new().extract(&file).unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat { .. }));
        assert_eq!(err.to_string(), "Please upload a text file (.txt)");
    }

    #[test]
    fn test_media_type_guessed_from_name() {
        assert_eq!(UploadedFile::new("notes.txt", None, vec![]).media_type, "text/plain");
        assert_eq!(UploadedFile::new("doc.pdf", Some(""), vec![]).media_type, "application/pdf");
        assert_eq!(
            UploadedFile::new("blob", None, vec![]).media_type,
            "application/octet-stream"
        );
    }

    #[test]
    fn test_accepted_upload_types() {
        assert!(is_accepted_upload("text/plain"));
        assert!(is_accepted_upload("application/pdf"));
        assert!(!is_accepted_upload("image/png"));
        assert!(!is_accepted_upload("text/html"));
    }

    #[tokio::test]
    async fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("original.txt");
        std::fs::write(&path, "The cat sat.").unwrap();

        let file = UploadedFile::from_path(&path).await.unwrap();
        assert_eq!(file.name, "original.txt");
        assert_eq!(file.media_type, "text/plain");
        assert_eq!(TextExtractor::new().extract(&file).unwrap(), "The cat sat.");
    }
}
