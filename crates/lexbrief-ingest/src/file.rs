//! Uploaded document type detection and text extraction.

use lexbrief_core::{Error, Result};
use std::path::Path;
use tracing::debug;

use crate::{docx, pdf};

/// Document formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Pdf,
    Docx,
    Unsupported,
}

impl DocumentKind {
    /// Detect document kind from extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "txt" | "md" => Self::PlainText,
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            _ => Self::Unsupported,
        }
    }

    /// Detect document kind from an uploaded filename.
    pub fn from_filename(filename: &str) -> Self {
        Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Unsupported)
    }

    /// Guess the kind from magic bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"%PDF") {
            Some(Self::Pdf)
        } else if bytes.starts_with(b"PK") {
            // ZIP container; DOCX is the only one we accept
            Some(Self::Docx)
        } else {
            None
        }
    }

    /// Filename first; magic bytes only when the name has no extension.
    pub fn detect(filename: &str, bytes: &[u8]) -> Self {
        let has_extension = Path::new(filename).extension().is_some();
        if has_extension {
            Self::from_filename(filename)
        } else {
            Self::sniff(bytes).unwrap_or(Self::Unsupported)
        }
    }
}

/// Extract plain text from an uploaded document.
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String> {
    if bytes.is_empty() {
        return Err(Error::Ingest(format!("{} is empty", filename)));
    }

    let kind = DocumentKind::detect(filename, bytes);
    debug!("Extracting {} as {:?} ({} bytes)", filename, kind, bytes.len());

    match kind {
        DocumentKind::Pdf => pdf::extract_pdf(bytes),
        DocumentKind::Docx => docx::extract_docx(bytes),
        DocumentKind::PlainText => Ok(String::from_utf8_lossy(bytes).into_owned()),
        DocumentKind::Unsupported => Err(Error::UnsupportedDocument(filename.to_string())),
    }
}
