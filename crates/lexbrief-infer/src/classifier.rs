//! Remote text-classification client (Hugging Face inference API shape).
//!
//! Request: `{"inputs": [sentence, ...]}`.
//! Response: one entry per input, either a list of `{label, score}`
//! candidates or a single `{label, score}` object.

use async_trait::async_trait;
use lexbrief_core::{ClassifierSettings, Error, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::labels::label_to_importance;
use crate::scorer::{ScorerBackend, FALLBACK_SCORE};

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

/// Sentence importance scorer backed by a remote classifier.
pub struct RemoteClassifier {
    client: Client,
    endpoint: String,
    token: Option<String>,
    batch_size: usize,
}

impl RemoteClassifier {
    pub fn new(settings: &ClassifierSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| Error::Http(format!("Failed to build classifier client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: settings.endpoint(),
            token: settings.token.clone(),
            batch_size: settings.batch_size.max(1),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn try_score_batch(&self, sentences: &[&str]) -> Result<Vec<f32>> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&json!({ "inputs": sentences }));
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Classifier(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Classifier(format!("API error {}: {}", status, body)));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::Classifier(format!("Invalid response body: {}", e)))?;

        let scores = parse_scores(&body)?;
        if scores.len() != sentences.len() {
            return Err(Error::Classifier(format!(
                "Expected {} scores, got {}",
                sentences.len(),
                scores.len()
            )));
        }
        Ok(scores)
    }
}

#[async_trait]
impl ScorerBackend for RemoteClassifier {
    async fn score_batch(&self, sentences: &[&str]) -> Vec<f32> {
        if sentences.is_empty() {
            return Vec::new();
        }
        match self.try_score_batch(sentences).await {
            Ok(scores) => {
                debug!("Classifier scored {} sentences", scores.len());
                scores
            }
            Err(e) => {
                warn!(
                    "Classifier failed for batch of {}: {}. Using fallback score {}.",
                    sentences.len(),
                    e,
                    FALLBACK_SCORE
                );
                vec![FALLBACK_SCORE; sentences.len()]
            }
        }
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Turn a classifier response body into one importance score per input.
pub(crate) fn parse_scores(body: &Value) -> Result<Vec<f32>> {
    if let Some(message) = body.get("error").and_then(|e| e.as_str()) {
        return Err(Error::Classifier(message.to_string()));
    }

    let entries = body
        .as_array()
        .ok_or_else(|| Error::Classifier("Expected a JSON array".into()))?;

    entries
        .iter()
        .map(|entry| -> Result<f32> {
            let candidates: Vec<LabelScore> = if entry.is_array() {
                serde_json::from_value(entry.clone())?
            } else {
                vec![serde_json::from_value(entry.clone())?]
            };
            let best = candidates
                .into_iter()
                .max_by(|a, b| a.score.total_cmp(&b.score))
                .ok_or_else(|| Error::Classifier("Empty label list".into()))?;
            Ok(label_to_importance(&best.label, best.score))
        })
        .collect()
}
