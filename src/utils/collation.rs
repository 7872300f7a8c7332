//! Locale-style string ordering
//!
//! Approximates the default UI collation used for sorting plant names:
//! 1. Primary: base letters only (accents stripped, case folded)
//! 2. Secondary: accents significant, case folded
//! 3. Tertiary: exact code point order
//!
//! So "aloe" < "Arjun" < "Ávila" < "bel", and "Bel" / "bel" only differ at the
//! last level.

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Primary-strength key: decomposed, marks removed, lowercased.
pub fn collation_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn secondary_key(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

/// Three-level comparison. Returns `Equal` only for identical strings.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| a.cmp(b))
}
