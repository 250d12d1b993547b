//! Summary modes and the per-request result shape returned to clients.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Returned in the `decision` field when the request carried no usable text.
pub const NO_INPUT_MESSAGE: &str = "No input provided.";

/// How a judgment is turned into a summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMode {
    /// Whole judgment goes to the LLM in one prompt.
    Direct,
    /// Sentence scoring and positional sections feed the LLM rewrite.
    #[default]
    Hybrid,
}

impl std::fmt::Display for SummaryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryMode::Direct => write!(f, "direct"),
            SummaryMode::Hybrid => write!(f, "hybrid"),
        }
    }
}

impl FromStr for SummaryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "direct" => Ok(SummaryMode::Direct),
            "hybrid" => Ok(SummaryMode::Hybrid),
            other => Err(format!("unknown summary mode: {}", other)),
        }
    }
}

/// Final summary for one request, serialized as a flat JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SummaryResult {
    Single {
        decision: String,
    },
    Structured {
        facts: String,
        issues: String,
        reasoning: String,
        decision: String,
    },
}

impl SummaryResult {
    pub fn no_input() -> Self {
        SummaryResult::Single {
            decision: NO_INPUT_MESSAGE.to_string(),
        }
    }

    pub fn decision(&self) -> &str {
        match self {
            SummaryResult::Single { decision } => decision,
            SummaryResult::Structured { decision, .. } => decision,
        }
    }
}
