//! Sentence chunking for long strings
//!
//! The translation service caps input size, so strings longer than
//! `CHUNK_THRESHOLD` characters are sent one sentence at a time.

use regex::Regex;
use std::sync::OnceLock;

/// Strings with more characters than this are split into sentences.
pub const CHUNK_THRESHOLD: usize = 400;

fn sentence_regex() -> &'static Regex {
    static SENTENCE: OnceLock<Regex> = OnceLock::new();
    // Text up to and including a run of terminators. Matches tile the input
    // up to the last terminator run.
    SENTENCE.get_or_init(|| Regex::new(r"[^.!?]*[.!?]+").expect("static regex"))
}

/// Split `text` into sentence units on `.`, `!` and `?`.
///
/// Each unit keeps its terminator(s) and is trimmed; blank units are dropped.
/// Trailing text with no terminator becomes the last unit, so no input is
/// lost. Text without any terminator comes back as a single unit.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut units = Vec::new();
    let mut last_end = 0;

    for m in sentence_regex().find_iter(text) {
        push_unit(&mut units, m.as_str());
        last_end = m.end();
    }
    push_unit(&mut units, &text[last_end..]);

    units
}

fn push_unit<'a>(units: &mut Vec<&'a str>, raw: &'a str) {
    let unit = raw.trim();
    if !unit.is_empty() {
        units.push(unit);
    }
}

/// Whether a string must be chunked before translation.
pub fn needs_chunking(text: &str) -> bool {
    text.chars().count() > CHUNK_THRESHOLD
}
