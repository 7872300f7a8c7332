//! Text display helpers

/// Collapse `text` to its first `max_chars` characters followed by `...`.
///
/// Returns the text unchanged when it already fits. Counts characters, not
/// bytes, so multi-byte scripts are never cut mid-codepoint.
pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
