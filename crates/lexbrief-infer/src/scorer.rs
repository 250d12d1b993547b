//! Scorer trait, neutral fallback, and batch driver.

use async_trait::async_trait;
use lexbrief_ingest::Sentence;
use serde::Serialize;
use tracing::debug;

/// Importance given to a sentence when no real score is available.
pub const FALLBACK_SCORE: f32 = 0.5;

/// A sentence paired with its importance in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSentence {
    pub sentence: Sentence,
    pub score: f32,
}

/// Trait for sentence importance backends.
#[async_trait]
pub trait ScorerBackend: Send + Sync {
    /// Score a batch of sentences. Always returns one score per input;
    /// failures are absorbed into [`FALLBACK_SCORE`].
    async fn score_batch(&self, sentences: &[&str]) -> Vec<f32>;

    /// Preferred number of sentences per call.
    fn batch_size(&self) -> usize {
        16
    }

    /// Whether real scores are produced (a model is reachable in principle).
    fn is_available(&self) -> bool;
}

/// Scorer that returns [`FALLBACK_SCORE`] for everything.
#[derive(Debug, Default)]
pub struct NeutralScorer;

impl NeutralScorer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ScorerBackend for NeutralScorer {
    async fn score_batch(&self, sentences: &[&str]) -> Vec<f32> {
        vec![FALLBACK_SCORE; sentences.len()]
    }

    fn batch_size(&self) -> usize {
        usize::MAX
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Score sentences in batches, preserving order.
pub async fn score_sentences(
    backend: &dyn ScorerBackend,
    sentences: Vec<Sentence>,
) -> Vec<ScoredSentence> {
    let batch_size = backend.batch_size().max(1);
    let mut scores = Vec::with_capacity(sentences.len());

    for batch in sentences.chunks(batch_size) {
        let texts: Vec<&str> = batch.iter().map(|s| s.text.as_str()).collect();
        let mut batch_scores = backend.score_batch(&texts).await;
        // Guard against backends that break the one-score-per-input contract
        batch_scores.resize(batch.len(), FALLBACK_SCORE);
        scores.extend(batch_scores.into_iter().map(|s| s.clamp(0.0, 1.0)));
    }

    debug!("Scored {} sentences", scores.len());

    sentences
        .into_iter()
        .zip(scores)
        .map(|(sentence, score)| ScoredSentence { sentence, score })
        .collect()
}
