//! Per-request summarization pipeline.
//!
//! Direct mode hands the whole judgment to the rewriter. Hybrid mode splits
//! and scores sentences, assembles positional sections, condenses each one
//! to its most important sentences and asks the rewriter for a structured
//! summary of those.

use std::sync::Arc;

use lexbrief_chat::{parse_structured, prompt, Rewriter, StructuredSummary, LLM_FALLBACK_TEXT};
use lexbrief_core::{SummaryMode, SummaryResult};
use lexbrief_infer::{score_sentences, ScoredSentence, ScorerBackend};
use lexbrief_ingest::split_sentences;
use tracing::{info, warn};

use crate::sections::{assemble, condense, AssembledSections, SectionKind};

/// Extractive groundwork for a hybrid summary, before the rewrite pass.
#[derive(Debug, Clone)]
pub struct HybridDraft {
    pub sections: AssembledSections,
    pub scored: Vec<ScoredSentence>,
    /// Condensed text per section, in [`SectionKind`] order.
    pub condensed: [String; 4],
}

impl HybridDraft {
    pub fn condensed(&self, kind: SectionKind) -> &str {
        &self.condensed[kind as usize]
    }
}

/// Stateless orchestrator shared by all requests.
pub struct Pipeline {
    scorer: Arc<dyn ScorerBackend>,
    rewriter: Arc<dyn Rewriter>,
    max_section_sentences: usize,
}

impl Pipeline {
    pub fn new(
        scorer: Arc<dyn ScorerBackend>,
        rewriter: Arc<dyn Rewriter>,
        max_section_sentences: usize,
    ) -> Self {
        info!(
            "Pipeline ready (classifier: {}, llm: {}, max sentences per section: {})",
            scorer.is_available(),
            rewriter.is_available(),
            max_section_sentences
        );
        Self {
            scorer,
            rewriter,
            max_section_sentences,
        }
    }

    pub fn scorer(&self) -> &Arc<dyn ScorerBackend> {
        &self.scorer
    }

    pub fn rewriter(&self) -> &Arc<dyn Rewriter> {
        &self.rewriter
    }

    /// Summarize `text` in the given mode. Never fails: remote errors are
    /// replaced by fallback text.
    pub async fn summarize(&self, text: &str, mode: SummaryMode) -> SummaryResult {
        let text = text.trim();
        if text.is_empty() {
            return SummaryResult::no_input();
        }

        info!("Summarizing {} chars in {} mode", text.chars().count(), mode);
        match mode {
            SummaryMode::Direct => self.summarize_direct(text).await,
            SummaryMode::Hybrid => self.summarize_hybrid(text).await,
        }
    }

    async fn summarize_direct(&self, text: &str) -> SummaryResult {
        let messages = prompt::messages_for(prompt::direct_prompt(text));
        let decision = match self.rewriter.rewrite(messages).await {
            Ok(output) => output.trim().to_string(),
            Err(e) => {
                warn!("Direct rewrite failed: {}", e);
                LLM_FALLBACK_TEXT.to_string()
            }
        };
        SummaryResult::Single { decision }
    }

    async fn summarize_hybrid(&self, text: &str) -> SummaryResult {
        let draft = self.draft(text).await;

        let pairs: Vec<(&str, &str)> = draft
            .sections
            .sections
            .iter()
            .map(|s| (s.kind.heading(), draft.condensed(s.kind)))
            .collect();
        let messages = prompt::messages_for(prompt::hybrid_prompt(&pairs));

        match self.rewriter.rewrite(messages).await {
            Ok(output) => {
                let parsed = parse_structured(&output);
                fill_from_draft(parsed, &draft)
            }
            Err(e) => {
                warn!("Hybrid rewrite failed: {}", e);
                SummaryResult::Structured {
                    facts: LLM_FALLBACK_TEXT.to_string(),
                    issues: LLM_FALLBACK_TEXT.to_string(),
                    reasoning: LLM_FALLBACK_TEXT.to_string(),
                    decision: LLM_FALLBACK_TEXT.to_string(),
                }
            }
        }
    }

    /// Split, score, assemble and condense `text` (already trimmed).
    pub async fn draft(&self, text: &str) -> HybridDraft {
        let sentences = split_sentences(text);
        let sentence_count = sentences.len();
        let scored = score_sentences(self.scorer.as_ref(), sentences).await;
        let sections = assemble(text);

        let condensed = sections
            .sections
            .clone()
            .map(|s| condense(&s, &scored, self.max_section_sentences));

        info!(
            "Assembled sections from {} sentences (decision trigger: {:?})",
            sentence_count, sections.decision_trigger
        );

        HybridDraft {
            sections,
            scored,
            condensed,
        }
    }
}

/// Sections the model left empty take the condensed extractive text.
fn fill_from_draft(parsed: StructuredSummary, draft: &HybridDraft) -> SummaryResult {
    let pick = |field: String, kind: SectionKind| {
        let field = field.trim();
        if field.is_empty() {
            draft.condensed(kind).to_string()
        } else {
            field.to_string()
        }
    };

    SummaryResult::Structured {
        facts: pick(parsed.facts, SectionKind::Facts),
        issues: pick(parsed.issues, SectionKind::Issues),
        reasoning: pick(parsed.reasoning, SectionKind::Analysis),
        decision: pick(parsed.decision, SectionKind::Decision),
    }
}
