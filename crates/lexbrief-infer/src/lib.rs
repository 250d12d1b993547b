//! LexBrief Infer: sentence importance scoring.
//!
//! Provides the `ScorerBackend` trait. When a classifier endpoint is
//! configured, `RemoteClassifier` scores sentence batches remotely; without
//! one, `NeutralScorer` gives every sentence the same fallback score so the
//! pipeline degrades to purely positional section assembly.

pub mod classifier;
pub mod labels;
pub mod scorer;

pub use classifier::RemoteClassifier;
pub use labels::label_to_importance;
pub use scorer::{score_sentences, NeutralScorer, ScoredSentence, ScorerBackend, FALLBACK_SCORE};

use std::sync::Arc;

use lexbrief_core::ClassifierSettings;

/// Create the best available scorer for the given settings.
///
/// Falls back to `NeutralScorer` when no classifier is configured or its
/// HTTP client cannot be built.
pub fn create_scorer(settings: &ClassifierSettings) -> Arc<dyn ScorerBackend> {
    if !settings.is_configured() {
        tracing::info!("No classifier configured. Using neutral sentence scores.");
        return Arc::new(NeutralScorer::new());
    }

    match RemoteClassifier::new(settings) {
        Ok(classifier) => {
            tracing::info!("Using remote classifier at {}", classifier.endpoint());
            Arc::new(classifier)
        }
        Err(e) => {
            tracing::warn!("Classifier unavailable: {}. Falling back to neutral scores.", e);
            Arc::new(NeutralScorer::new())
        }
    }
}
