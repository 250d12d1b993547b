//! Mapping from classifier labels to a scalar importance.

use crate::scorer::FALLBACK_SCORE;

const POSITIVE_LABELS: &[&str] = &["label_1", "important", "positive", "relevant", "yes"];
const NEGATIVE_LABELS: &[&str] = &[
    "label_0",
    "unimportant",
    "not_important",
    "negative",
    "irrelevant",
    "no",
];

/// Convert a `(label, confidence)` pair into importance in `[0, 1]`.
///
/// Positive labels map to their confidence, negative labels to its
/// complement, and unknown labels to [`FALLBACK_SCORE`].
pub fn label_to_importance(label: &str, score: f32) -> f32 {
    let normalized = label.trim().to_lowercase().replace([' ', '-'], "_");
    let score = score.clamp(0.0, 1.0);

    if POSITIVE_LABELS.contains(&normalized.as_str()) {
        score
    } else if NEGATIVE_LABELS.contains(&normalized.as_str()) {
        1.0 - score
    } else {
        FALLBACK_SCORE
    }
}
