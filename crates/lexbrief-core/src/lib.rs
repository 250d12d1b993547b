//! LexBrief Core: shared error type, configuration, and summary types.

pub mod config;
pub mod error;
pub mod types;

pub use config::{ClassifierSettings, LexBriefConfig};
pub use error::{Error, Result};
pub use types::{SummaryMode, SummaryResult, NO_INPUT_MESSAGE};
