//! Fixed instruction prompts for the rewrite pass.

use crate::types::ChatMessage;

pub const SYSTEM_PROMPT: &str = "You are a precise judicial summarization assistant.";

const INSTRUCTIONS: &str = "\
Maintain formal judicial tone.
Do not invent facts.
If monetary awards exist, clearly state them.
Number final orders where appropriate.";

/// Prompt for the whole judgment in one pass.
pub fn direct_prompt(judgment: &str) -> String {
    format!(
        "You are a Nigerian judicial legal assistant.

Restructure the following judgment into:

1. Facts of the Case
2. Issues for Determination
3. Court's Reasoning
4. Final Decision / Orders

{instructions}

Judgment Text:
{judgment}
",
        instructions = INSTRUCTIONS,
        judgment = judgment.trim(),
    )
}

/// Prompt over pre-assembled sections; asks for a JSON object back.
///
/// `sections` are `(heading, text)` pairs in document order.
pub fn hybrid_prompt(sections: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (heading, text) in sections {
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        body.push_str(&format!("### {}\n{}\n\n", heading, text));
    }

    format!(
        "You are a Nigerian judicial legal assistant.

The key passages of a judgment have been grouped below by their position in the document.
The grouping is approximate: move material to the correct part where needed.

Rewrite them into:

- facts: Facts of the Case
- issues: Issues for Determination
- reasoning: Court's Reasoning
- decision: Final Decision / Orders

{instructions}

Respond with a single JSON object with exactly the string keys \"facts\", \"issues\", \"reasoning\" and \"decision\".

Judgment Passages:
{body}",
        instructions = INSTRUCTIONS,
        body = body.trim_end(),
    )
}

/// System + user messages for one rewrite call.
pub fn messages_for(prompt: String) -> Vec<ChatMessage> {
    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_prompt_embeds_text() {
        let prompt = direct_prompt("  The appeal is allowed.\n");
        assert!(prompt.contains("4. Final Decision / Orders"));
        assert!(prompt.contains("Do not invent facts."));
        assert!(prompt.ends_with("Judgment Text:\nThe appeal is allowed.\n"));
    }

    #[test]
    fn test_hybrid_prompt_skips_empty_sections() {
        let prompt = hybrid_prompt(&[
            ("Facts", "The claimant was injured."),
            ("Issues", "   "),
            ("Decision", "Judgment for the claimant."),
        ]);
        assert!(prompt.contains("### Facts\nThe claimant was injured."));
        assert!(!prompt.contains("### Issues"));
        assert!(prompt.ends_with("### Decision\nJudgment for the claimant."));
        assert!(prompt.contains("\"decision\""));
    }

    #[test]
    fn test_messages_roles() {
        let messages = messages_for("summarize".into());
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, SYSTEM_PROMPT);
        assert_eq!(messages[1].role, "user");
    }
}
