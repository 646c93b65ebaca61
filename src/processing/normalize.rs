//! Text normalization shared by every parsing stage

use log::debug;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use unicode_segmentation::UnicodeSegmentation;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Upper bound for patterns compiled at runtime.
const RUNTIME_PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Replace non-breaking spaces, collapse whitespace runs and trim.
pub fn normalize_whitespace(text: &str) -> String {
    let replaced = text.replace(['\u{00A0}', '\u{202F}', '\u{2007}'], " ");
    WHITESPACE_RUN.replace_all(&replaced, " ").trim().to_string()
}

/// Split text into trimmed, non-empty lines, preserving order.
pub fn lines_from(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// First match of `pattern` in `text`, trimmed, or an empty string.
pub fn safe_match(text: &str, pattern: &Regex) -> String {
    pattern
        .find(text)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Like [`safe_match`] for a pattern supplied as text. A pattern that fails
/// to compile matches nothing.
pub fn safe_match_pattern(text: &str, pattern: &str) -> String {
    match RegexBuilder::new(pattern)
        .size_limit(RUNTIME_PATTERN_SIZE_LIMIT)
        .build()
    {
        Ok(regex) => safe_match(text, &regex),
        Err(e) => {
            debug!("Ignoring invalid pattern {:?}: {}", pattern, e);
            String::new()
        }
    }
}

/// Cut `text` to at most `max` user-perceived characters.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.graphemes(true).take(max).collect()
}
