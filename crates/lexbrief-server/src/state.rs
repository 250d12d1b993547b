//! Shared application state.

use std::sync::Arc;

use lexbrief_chat::{LLMConfig, LlmRewriter};
use lexbrief_core::{LexBriefConfig, Result};
use lexbrief_runtime::Pipeline;

/// Shared application state accessible from all route handlers.
///
/// Built once at startup and never mutated.
pub struct AppState {
    pub config: LexBriefConfig,
    pub llm_config: LLMConfig,
    pub pipeline: Pipeline,
}

impl AppState {
    pub fn new(config: LexBriefConfig, llm_config: LLMConfig) -> Result<Self> {
        let scorer = lexbrief_infer::create_scorer(&config.classifier);
        let rewriter = LlmRewriter::new(&llm_config, config.llm_timeout)?;
        let pipeline = Pipeline::new(scorer, Arc::new(rewriter), config.max_section_sentences);

        Ok(Self::with_pipeline(config, llm_config, pipeline))
    }

    /// State around an already-built pipeline (tests swap in fakes here).
    pub fn with_pipeline(config: LexBriefConfig, llm_config: LLMConfig, pipeline: Pipeline) -> Self {
        Self {
            config,
            llm_config,
            pipeline,
        }
    }
}
