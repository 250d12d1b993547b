//! LLM configuration from the environment and provider selection.

use tracing::warn;

use crate::types::{LLMProvider, LLMStatus, ResolvedProvider};

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

pub const DEFAULT_TEMPERATURE: f64 = 0.2;
pub const DEFAULT_MAX_TOKENS: usize = 2048;

/// LLM configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct LLMConfig {
    /// `auto`, `openai`, `anthropic` or `groq`.
    pub preferred_provider: String,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub groq_api_key: Option<String>,
    /// Overrides the provider's default model.
    pub model: Option<String>,
    /// Overrides the provider's default endpoint (self-hosted gateways).
    pub base_url: Option<String>,
    pub temperature: f64,
    pub max_tokens: usize,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            preferred_provider: "auto".into(),
            openai_api_key: None,
            anthropic_api_key: None,
            groq_api_key: None,
            model: None,
            base_url: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl LLMConfig {
    /// Load config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let temperature = match non_empty("LLM_TEMPERATURE") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!("Ignoring invalid LLM_TEMPERATURE={:?}", raw);
                DEFAULT_TEMPERATURE
            }),
            None => DEFAULT_TEMPERATURE,
        };
        let max_tokens = match non_empty("LLM_MAX_TOKENS") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!("Ignoring invalid LLM_MAX_TOKENS={:?}", raw);
                DEFAULT_MAX_TOKENS
            }),
            None => DEFAULT_MAX_TOKENS,
        };

        Self {
            preferred_provider: non_empty("LLM_PROVIDER")
                .map(|p| p.trim().to_lowercase())
                .unwrap_or_else(|| "auto".into()),
            openai_api_key: non_empty("OPENAI_API_KEY"),
            anthropic_api_key: non_empty("ANTHROPIC_API_KEY"),
            groq_api_key: non_empty("GROQ_API_KEY"),
            model: non_empty("LLM_MODEL"),
            base_url: non_empty("LLM_BASE_URL"),
            temperature,
            max_tokens,
        }
    }

    fn default_model(provider: LLMProvider) -> &'static str {
        match provider {
            LLMProvider::OpenAI => DEFAULT_OPENAI_MODEL,
            LLMProvider::Anthropic => DEFAULT_ANTHROPIC_MODEL,
            LLMProvider::Groq => DEFAULT_GROQ_MODEL,
        }
    }

    fn key_for(&self, provider: LLMProvider) -> Option<&String> {
        match provider {
            LLMProvider::OpenAI => self.openai_api_key.as_ref(),
            LLMProvider::Anthropic => self.anthropic_api_key.as_ref(),
            LLMProvider::Groq => self.groq_api_key.as_ref(),
        }
    }

    fn resolve(&self, provider: LLMProvider) -> Option<ResolvedProvider> {
        self.key_for(provider).map(|key| ResolvedProvider {
            provider,
            model: self
                .model
                .clone()
                .unwrap_or_else(|| Self::default_model(provider).to_string()),
            api_key: key.clone(),
            url: self
                .base_url
                .clone()
                .unwrap_or_else(|| provider.default_url().to_string()),
        })
    }

    /// Resolve which provider and model to use.
    pub fn resolve_provider(&self) -> Option<ResolvedProvider> {
        // Explicit preference
        if self.preferred_provider != "auto" {
            return match self.preferred_provider.as_str() {
                "openai" => self.resolve(LLMProvider::OpenAI),
                "anthropic" => self.resolve(LLMProvider::Anthropic),
                "groq" => self.resolve(LLMProvider::Groq),
                other => {
                    warn!("Unknown LLM_PROVIDER {:?}", other);
                    None
                }
            };
        }

        // Auto mode: OpenAI > Anthropic > Groq
        [LLMProvider::OpenAI, LLMProvider::Anthropic, LLMProvider::Groq]
            .into_iter()
            .find_map(|p| self.resolve(p))
    }

    /// Build the public status (no API keys exposed).
    pub fn to_status(&self) -> LLMStatus {
        let resolved = self.resolve_provider();
        LLMStatus {
            llm_available: resolved.is_some(),
            llm_provider: resolved.as_ref().map(|r| r.provider.to_string()),
            model: resolved.map(|r| r.model),
            openai_configured: self.openai_api_key.is_some(),
            anthropic_configured: self.anthropic_api_key.is_some(),
            groq_configured: self.groq_api_key.is_some(),
        }
    }
}
