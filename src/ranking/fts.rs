//! FTS match expression composer.

/// Build an FTS match expression `"C: w1 OR C: w2 OR ..."` for a non-empty
/// word list against column `column`. FTS literal double-quotes are
/// escaped by doubling. Returns an empty string for an empty word list —
/// the caller must not execute an empty expression.
pub fn fts_match_expr(words: &[String], column: &str) -> String {
    if words.is_empty() {
        return String::new();
    }

    words
        .iter()
        .map(|w| format!("{column}: {}", escape_fts_literal(w)))
        .collect::<Vec<_>>()
        .join(" OR ")
}

fn escape_fts_literal(word: &str) -> String {
    word.replace('"', "\"\"")
}
