//! Process-wide configuration, read once from the environment at startup.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::SummaryMode;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_CLASSIFIER_URL: &str = "https://api-inference.huggingface.co/models";

/// Remote sentence-importance classifier settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierSettings {
    /// Base URL of the inference service; the model id is appended.
    pub url: String,
    /// Text-classification model id; empty means no classifier.
    pub model: String,
    /// Bearer token. Without one the neutral scorer is used.
    #[serde(skip_serializing)]
    pub token: Option<String>,
    pub timeout: Duration,
    pub batch_size: usize,
}

impl ClassifierSettings {
    /// Full endpoint for the configured model.
    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.url.trim_end_matches('/'), self.model)
    }

    /// A model, plus a token or a self-hosted endpoint that may not need one.
    pub fn is_configured(&self) -> bool {
        !self.model.trim().is_empty()
            && (self.token.is_some() || self.url.trim_end_matches('/') != DEFAULT_CLASSIFIER_URL)
    }
}

/// Top-level LexBrief configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexBriefConfig {
    /// HTTP server port.
    pub port: u16,
    /// Default summary mode when a request does not pick one.
    pub mode: SummaryMode,
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
    /// Timeout for each LLM call.
    pub llm_timeout: Duration,
    /// Sentences kept per section before the rewrite pass.
    pub max_section_sentences: usize,
    pub classifier: ClassifierSettings,
}

impl Default for LexBriefConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            mode: SummaryMode::Hybrid,
            max_upload_bytes: 20 * 1024 * 1024,
            llm_timeout: Duration::from_secs(180),
            max_section_sentences: 12,
            classifier: ClassifierSettings {
                url: DEFAULT_CLASSIFIER_URL.into(),
                model: String::new(),
                token: None,
                timeout: Duration::from_secs(60),
                batch_size: 16,
            },
        }
    }
}

impl LexBriefConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let mode = match lookup("SUMMARY_MODE") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("{}; using {}", e, defaults.mode);
                defaults.mode
            }),
            None => defaults.mode,
        };

        let token = lookup("HF_API_TOKEN")
            .or_else(|| lookup("HF_TOKEN"))
            .filter(|t| !t.trim().is_empty());
        let model = lookup("CLASSIFIER_MODEL")
            .map(|m| m.trim().to_string())
            .unwrap_or_default();
        if token.is_some() && model.is_empty() {
            warn!("Classifier token set but CLASSIFIER_MODEL is empty; using neutral scores");
        }

        Self {
            port: parse_or(&lookup, "PORT", defaults.port),
            mode,
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_MB", 20usize) * 1024 * 1024,
            llm_timeout: Duration::from_secs(parse_or(&lookup, "LLM_TIMEOUT_SECS", 180u64)),
            max_section_sentences: parse_or(
                &lookup,
                "MAX_SECTION_SENTENCES",
                defaults.max_section_sentences,
            )
            .max(1),
            classifier: ClassifierSettings {
                url: lookup("CLASSIFIER_URL").unwrap_or(defaults.classifier.url),
                model,
                token,
                timeout: Duration::from_secs(parse_or(&lookup, "CLASSIFIER_TIMEOUT_SECS", 60u64)),
                batch_size: parse_or(&lookup, "CLASSIFIER_BATCH_SIZE", defaults.classifier.batch_size)
                    .max(1),
            },
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}", key, raw);
            default
        }),
        None => default,
    }
}
