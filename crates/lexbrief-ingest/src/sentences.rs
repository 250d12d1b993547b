//! Sentence segmentation with a minimum-length filter.
//!
//! Boundaries fall after `.`, `!` or `?` followed by whitespace, except after
//! common honorifics and citation abbreviations ("Mr.", "v.") and
//! single-letter initials, which are frequent in judgments. "No." only holds
//! a sentence open before a number, and a lone capital after a label such as
//! "Exhibit" or "Schedule" is a designation, not an initial.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Sentences shorter than this (in characters) are dropped.
pub const MIN_SENTENCE_CHARS: usize = 30;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

const ABBREVIATIONS: &[&str] = &[
    "mr.", "mrs.", "ms.", "dr.", "prof.", "hon.", "sen.", "rev.", "gen.", "col.", "capt.",
    "v.", "vs.", "cf.", "e.g.", "i.e.", "etc.", "al.", "art.", "arts.", "s.",
    "ss.", "sec.", "para.", "paras.", "p.", "pp.", "vol.", "ltd.", "co.", "inc.", "jsc.",
    "jca.", "esq.", "st.",
];

/// Only abbreviations when a number follows ("No. 5", "Nos. 3 and 4").
const NUMBER_ABBREVIATIONS: &[&str] = &["no.", "nos."];

/// Words that take a single-letter designation ("Exhibit A", "Schedule B").
const DESIGNATION_LABELS: &[&str] = &[
    "exhibit", "schedule", "appendix", "annexure", "annex", "part", "section", "form",
    "count", "item", "paragraph", "plan", "table", "ground", "issue", "article", "clause",
    "category", "type", "class", "grade",
];

/// One sentence with its position in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sentence {
    /// Sentence text with internal whitespace collapsed.
    pub text: String,
    /// Sequential index among the returned sentences.
    pub index: usize,
    /// Char offset of the first character in the source text.
    pub char_start: usize,
    /// Char offset one past the last character in the source text.
    pub char_end: usize,
}

/// Split text into sentences, dropping those shorter than [`MIN_SENTENCE_CHARS`].
pub fn split_sentences(text: &str) -> Vec<Sentence> {
    split_all(text)
        .into_iter()
        .filter(|s| s.text.chars().count() >= MIN_SENTENCE_CHARS)
        .enumerate()
        .map(|(index, s)| Sentence { index, ..s })
        .collect()
}

/// Split text into sentences without any length filter.
pub fn split_all(text: &str) -> Vec<Sentence> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;

    for i in 0..chars.len() {
        let c = chars[i].1;
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let followed_by_space = chars.get(i + 1).map_or(true, |(_, n)| n.is_whitespace());
        if !followed_by_space || (c == '.' && is_abbreviation(&chars, start, i)) {
            continue;
        }
        push_segment(text, &chars, start, i + 1, &mut sentences);
        start = i + 1;
    }
    // Remainder
    push_segment(text, &chars, start, chars.len(), &mut sentences);

    sentences
}

/// Whether the word ending at `dot` (inclusive) is an abbreviation or an initial.
fn is_abbreviation(chars: &[(usize, char)], floor: usize, dot: usize) -> bool {
    let mut word_start = dot;
    while word_start > floor && !chars[word_start - 1].1.is_whitespace() {
        word_start -= 1;
    }
    let word: String = chars[word_start..=dot]
        .iter()
        .map(|(_, c)| c.to_lowercase().next().unwrap_or(*c))
        .collect();
    let word = word.trim_start_matches(|c: char| c == '(' || c == '"' || c == '\'');

    if ABBREVIATIONS.contains(&word) {
        return true;
    }
    if NUMBER_ABBREVIATIONS.contains(&word) {
        return next_visible(chars, dot + 1).map_or(false, |c| c.is_ascii_digit());
    }
    // "J." / "A.B." style initials
    let letters: Vec<char> = word.chars().filter(|c| *c != '.').collect();
    letters.len() == 1
        && letters[0].is_alphabetic()
        && chars[word_start].1.is_uppercase()
        && !DESIGNATION_LABELS.contains(&previous_word(chars, floor, word_start).as_str())
}

/// First non-whitespace character at or after `from`.
fn next_visible(chars: &[(usize, char)], from: usize) -> Option<char> {
    chars[from.min(chars.len())..]
        .iter()
        .map(|(_, c)| *c)
        .find(|c| !c.is_whitespace())
}

/// Lowercased alphabetic word immediately before `word_start`, within the sentence.
fn previous_word(chars: &[(usize, char)], floor: usize, word_start: usize) -> String {
    let mut end = word_start;
    while end > floor && chars[end - 1].1.is_whitespace() {
        end -= 1;
    }
    let mut start = end;
    while start > floor && chars[start - 1].1.is_alphabetic() {
        start -= 1;
    }
    chars[start..end]
        .iter()
        .flat_map(|(_, c)| c.to_lowercase())
        .collect()
}

fn push_segment(
    text: &str,
    chars: &[(usize, char)],
    start: usize,
    end: usize,
    out: &mut Vec<Sentence>,
) {
    let mut s = start;
    while s < end && chars[s].1.is_whitespace() {
        s += 1;
    }
    let mut e = end;
    while e > s && chars[e - 1].1.is_whitespace() {
        e -= 1;
    }
    if s == e {
        return;
    }

    let byte_start = chars[s].0;
    let byte_end = chars.get(e).map_or(text.len(), |(b, _)| *b);
    let collapsed = WHITESPACE_RE.replace_all(&text[byte_start..byte_end], " ");

    out.push(Sentence {
        text: collapsed.into_owned(),
        index: out.len(),
        char_start: s,
        char_end: e,
    });
}
