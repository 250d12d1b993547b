//! Heuristic positional split of a judgment into facts / issues / analysis /
//! decision, with a trigger-phrase search for the decision boundary.
//!
//! All offsets are char offsets into the text passed to [`assemble`]. The
//! four sections are contiguous and together cover the whole text.

use lexbrief_infer::ScoredSentence;
use serde::Serialize;
use tracing::debug;

/// End of the facts block, as a fraction of the document.
pub const FACTS_END: f64 = 0.25;
/// End of the issues block.
pub const ISSUES_END: f64 = 0.35;
/// Default end of the analysis block when no trigger phrase is found.
pub const ANALYSIS_END: f64 = 0.80;
/// Trigger phrases before this point are ignored.
pub const TRIGGER_FLOOR: f64 = 0.50;

/// Phrases that usually open the operative part of a judgment.
pub const DECISION_TRIGGERS: &[&str] = &[
    "for these reasons",
    "in conclusion",
    "accordingly",
    "it is hereby ordered",
    "i hereby order",
    "the appeal is allowed",
    "the appeal is dismissed",
    "judgment is hereby entered",
    "in the final analysis",
    "consequently",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Facts,
    Issues,
    Analysis,
    Decision,
}

impl SectionKind {
    pub fn heading(&self) -> &'static str {
        match self {
            SectionKind::Facts => "Facts",
            SectionKind::Issues => "Issues",
            SectionKind::Analysis => "Analysis",
            SectionKind::Decision => "Decision",
        }
    }
}

/// One contiguous block of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub char_start: usize,
    pub char_end: usize,
    /// Raw slice of the source, whitespace untouched.
    pub text: String,
}

impl Section {
    pub fn contains(&self, char_offset: usize) -> bool {
        char_offset >= self.char_start && char_offset < self.char_end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssembledSections {
    /// Facts, issues, analysis, decision, in document order.
    pub sections: [Section; 4],
    /// The phrase that moved the decision boundary, if any.
    pub decision_trigger: Option<&'static str>,
}

impl AssembledSections {
    pub fn get(&self, kind: SectionKind) -> &Section {
        &self.sections[kind as usize]
    }

    pub fn facts(&self) -> &Section {
        self.get(SectionKind::Facts)
    }

    pub fn issues(&self) -> &Section {
        self.get(SectionKind::Issues)
    }

    pub fn analysis(&self) -> &Section {
        self.get(SectionKind::Analysis)
    }

    pub fn decision(&self) -> &Section {
        self.get(SectionKind::Decision)
    }
}

/// Split `text` into the four positional sections.
pub fn assemble(text: &str) -> AssembledSections {
    let chars: Vec<char> = text.chars().collect();
    let n = chars.len();

    let facts_end = cut(&chars, FACTS_END);
    let issues_end = cut(&chars, ISSUES_END).max(facts_end);
    let mut analysis_end = cut(&chars, ANALYSIS_END).max(issues_end);

    let trigger = find_decision_trigger(&chars);
    if let Some((pos, phrase)) = trigger {
        debug!("Decision boundary moved to char {} by {:?}", pos, phrase);
        analysis_end = pos.max(issues_end);
    }

    let bounds = [
        (SectionKind::Facts, 0, facts_end),
        (SectionKind::Issues, facts_end, issues_end),
        (SectionKind::Analysis, issues_end, analysis_end),
        (SectionKind::Decision, analysis_end, n),
    ];

    AssembledSections {
        sections: bounds.map(|(kind, start, end)| Section {
            kind,
            char_start: start,
            char_end: end,
            text: chars[start..end].iter().collect(),
        }),
        decision_trigger: trigger.map(|(_, phrase)| phrase),
    }
}

/// Position for `fraction` of the text, moved forward out of any word.
fn cut(chars: &[char], fraction: f64) -> usize {
    let n = chars.len();
    let mut pos = ((n as f64) * fraction).floor() as usize;
    while pos > 0 && pos < n && !chars[pos - 1].is_whitespace() && !chars[pos].is_whitespace() {
        pos += 1;
    }
    pos.min(n)
}

/// Earliest trigger phrase at or after [`TRIGGER_FLOOR`], matched on word
/// boundaries, ignoring ASCII case.
fn find_decision_trigger(chars: &[char]) -> Option<(usize, &'static str)> {
    let n = chars.len();
    let floor = ((n as f64) * TRIGGER_FLOOR).floor() as usize;

    for pos in floor..n {
        if pos > 0 && chars[pos - 1].is_alphanumeric() {
            continue;
        }
        for phrase in DECISION_TRIGGERS {
            if matches_at(chars, pos, phrase) {
                return Some((pos, phrase));
            }
        }
    }
    None
}

fn matches_at(chars: &[char], pos: usize, phrase: &str) -> bool {
    let len = phrase.chars().count();
    if pos + len > chars.len() {
        return false;
    }
    let same = chars[pos..pos + len]
        .iter()
        .zip(phrase.chars())
        .all(|(c, p)| c.to_ascii_lowercase() == p);
    let end_ok = chars.get(pos + len).map_or(true, |c| !c.is_alphanumeric());
    same && end_ok
}

/// Keep the `max_sentences` most important sentences that start inside
/// `section`, in document order. Falls back to the raw section text when no
/// scored sentence lies inside it.
pub fn condense(section: &Section, scored: &[ScoredSentence], max_sentences: usize) -> String {
    let mut inside: Vec<&ScoredSentence> = scored
        .iter()
        .filter(|s| section.contains(s.sentence.char_start))
        .collect();

    if inside.is_empty() {
        return section.text.trim().to_string();
    }

    inside.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(a.sentence.index.cmp(&b.sentence.index))
    });
    inside.truncate(max_sentences.max(1));
    inside.sort_by_key(|s| s.sentence.index);

    inside
        .iter()
        .map(|s| s.sentence.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
