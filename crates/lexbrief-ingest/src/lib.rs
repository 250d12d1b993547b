//! LexBrief Ingest: judgment text extraction and sentence splitting.

pub mod docx;
pub mod file;
pub mod pdf;
pub mod sentences;

pub use file::{extract_text, DocumentKind};
pub use sentences::{split_all, split_sentences, Sentence, MIN_SENTENCE_CHARS};
