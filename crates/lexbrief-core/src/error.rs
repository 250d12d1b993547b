//! Error types for LexBrief.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Ingest error: {0}")]
    Ingest(String),

    #[error("Unsupported document: {0}")]
    UnsupportedDocument(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(String),
}

pub type Result<T> = std::result::Result<T, Error>;
