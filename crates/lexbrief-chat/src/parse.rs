//! Recover the four summary parts from free-form model output.
//!
//! Tried in order: a JSON object (possibly inside a ``` fence), markdown or
//! numbered headings, and finally the whole output as the decision.

use serde_json::Value;

use crate::types::StructuredSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Facts,
    Issues,
    Reasoning,
    Decision,
}

/// Split model output into facts / issues / reasoning / decision.
pub fn parse_structured(output: &str) -> StructuredSummary {
    let output = output.trim();
    if output.is_empty() {
        return StructuredSummary::default();
    }

    if let Some(summary) = parse_json(output) {
        return summary;
    }
    if let Some(summary) = parse_headings(output) {
        return summary;
    }

    StructuredSummary {
        decision: output.to_string(),
        ..Default::default()
    }
}

fn parse_json(output: &str) -> Option<StructuredSummary> {
    let start = output.find('{')?;
    let end = output.rfind('}')?;
    if end <= start {
        return None;
    }
    let object = match serde_json::from_str::<Value>(&output[start..=end]).ok()? {
        Value::Object(map) => map,
        _ => return None,
    };

    let mut summary = StructuredSummary::default();
    let mut found = false;
    for (key, value) in &object {
        let Some(part) = part_for_key(key) else {
            continue;
        };
        let text = value_text(value);
        if text.is_empty() {
            continue;
        }
        found = true;
        append(slot(&mut summary, part), &text);
    }

    found.then_some(summary)
}

fn part_for_key(key: &str) -> Option<Part> {
    match key.trim().to_lowercase().as_str() {
        "facts" | "facts_of_the_case" => Some(Part::Facts),
        "issues" | "issues_for_determination" => Some(Part::Issues),
        "reasoning" | "analysis" | "courts_reasoning" => Some(Part::Reasoning),
        "decision" | "orders" | "final_decision" => Some(Part::Decision),
        _ => None,
    }
}

/// Strings as-is; arrays of strings one per line (numbered lists stay intact).
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn parse_headings(output: &str) -> Option<StructuredSummary> {
    let mut summary = StructuredSummary::default();
    let mut current: Option<Part> = None;
    let mut found = false;

    for line in output.lines() {
        if let Some(part) = heading_part(line) {
            current = Some(part);
            found = true;
            continue;
        }
        if let Some(part) = current {
            let target = slot(&mut summary, part);
            if !target.is_empty() || !line.trim().is_empty() {
                target.push_str(line);
                target.push('\n');
            }
        }
    }

    if !found {
        return None;
    }
    for field in [
        &mut summary.facts,
        &mut summary.issues,
        &mut summary.reasoning,
        &mut summary.decision,
    ] {
        *field = field.trim().to_string();
    }
    Some(summary)
}

/// Recognize a line that is only a section heading, however decorated.
fn heading_part(line: &str) -> Option<Part> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.len() > 60 {
        return None;
    }
    let cleaned = trimmed
        .trim_start_matches(|c: char| {
            c == '#' || c == '*' || c == '_' || c == '.' || c == ')' || c.is_ascii_digit() || c.is_whitespace()
        })
        .trim_end_matches(|c: char| c == '*' || c == '_' || c == ':' || c.is_whitespace())
        .to_lowercase()
        .replace('’', "'")
        .replace(" / ", "/");

    match cleaned.as_str() {
        "facts" | "the facts" | "facts of the case" | "summary of facts" => Some(Part::Facts),
        "issues" | "issue for determination" | "issues for determination" => Some(Part::Issues),
        "reasoning" | "court's reasoning" | "the court's reasoning" | "analysis" => {
            Some(Part::Reasoning)
        }
        "decision" | "final decision" | "final decision/orders" | "decision/orders"
        | "orders" | "final orders" | "decision and orders" => Some(Part::Decision),
        _ => None,
    }
}

fn slot(summary: &mut StructuredSummary, part: Part) -> &mut String {
    match part {
        Part::Facts => &mut summary.facts,
        Part::Issues => &mut summary.issues,
        Part::Reasoning => &mut summary.reasoning,
        Part::Decision => &mut summary.decision,
    }
}

fn append(target: &mut String, text: &str) {
    if !target.is_empty() {
        target.push('\n');
    }
    target.push_str(text);
}
