//! LLM rewrite pass with external providers (OpenAI/Anthropic/Groq).
//!
//! Turns extracted or pre-assembled judgment text into a structured summary.
//! LLM calls go to external APIs and need no local model.

pub mod config;
pub mod parse;
pub mod prompt;
pub mod providers;
pub mod rewriter;
pub mod types;

pub use config::LLMConfig;
pub use parse::parse_structured;
pub use rewriter::{LlmRewriter, Rewriter, LLM_FALLBACK_TEXT};
pub use types::*;
