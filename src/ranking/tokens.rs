//! Token normalisation.
//!
//! `tokens(text) = text.trim().lowercase -> replace unicode non-word
//! (anything outside letter|number|underscore|whitespace) with space ->
//! collapse whitespace -> split -> drop empty`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches runs of anything that is not a letter, number, underscore, or
/// whitespace (`\w` already covers letter|number|underscore under Unicode
/// mode). Compiled once per process and shared.
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Normalise `text` into lowercase word/number tokens.
pub fn tokens(text: &str) -> Vec<String> {
    let lowered = text.trim().to_lowercase();
    let cleaned = NON_WORD.replace_all(&lowered, " ");
    WHITESPACE
        .split(cleaned.as_ref())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
