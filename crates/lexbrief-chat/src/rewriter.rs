//! The rewrite seam used by the pipeline, and its LLM-backed implementation.

use std::time::Duration;

use async_trait::async_trait;
use lexbrief_core::{Error, Result};
use reqwest::Client;
use tracing::info;

use crate::config::LLMConfig;
use crate::providers;
use crate::types::{ChatMessage, ResolvedProvider};

/// Substituted for model output when the rewrite call fails.
pub const LLM_FALLBACK_TEXT: &str =
    "Summary could not be generated at this time. Please try again later.";

/// Something that turns prompt messages into rewritten text.
#[async_trait]
pub trait Rewriter: Send + Sync {
    async fn rewrite(&self, messages: Vec<ChatMessage>) -> Result<String>;

    /// Whether a model is configured at all.
    fn is_available(&self) -> bool;
}

/// Rewriter backed by an external LLM provider.
pub struct LlmRewriter {
    client: Client,
    target: Option<ResolvedProvider>,
    temperature: f64,
    max_tokens: usize,
}

impl LlmRewriter {
    pub fn new(config: &LLMConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(format!("Failed to build LLM client: {}", e)))?;

        let target = config.resolve_provider();
        match &target {
            Some(t) => info!("LLM rewriter using {} ({})", t.provider, t.model),
            None => info!("No LLM provider configured; summaries will use fallback text"),
        }

        Ok(Self {
            client,
            target,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    pub fn target(&self) -> Option<&ResolvedProvider> {
        self.target.as_ref()
    }
}

#[async_trait]
impl Rewriter for LlmRewriter {
    async fn rewrite(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let target = self
            .target
            .as_ref()
            .ok_or_else(|| Error::Llm("No LLM provider configured".into()))?;
        providers::complete(
            &self.client,
            target,
            messages,
            self.temperature,
            self.max_tokens,
        )
        .await
    }

    fn is_available(&self) -> bool {
        self.target.is_some()
    }
}
