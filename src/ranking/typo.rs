//! 1-edit typo match and word-overlap counting.

use super::tokens::tokens;

/// True iff `a` and `b` differ by at most one substitution, insertion, or
/// deletion of a single codepoint (Levenshtein distance
/// <= 1, restricted to those three operations).
pub fn within1(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.len() == b.len() {
        // Same length: true iff they differ in exactly one position.
        let mismatches = a.iter().zip(b.iter()).filter(|(x, y)| x != y).count();
        return mismatches == 1;
    }

    let (longer, shorter) = if a.len() > b.len() { (&a, &b) } else { (&b, &a) };
    if longer.len() != shorter.len() + 1 {
        return false;
    }

    // Single O(n) two-pointer scan: walk both strings together, allow at
    // most one "skip" over a character in the longer string when a
    // mismatch is found. No temporary allocations.
    let mut i = 0; // index into longer
    let mut j = 0; // index into shorter
    let mut skipped = false;

    while j < shorter.len() {
        if longer[i] == shorter[j] {
            i += 1;
            j += 1;
        } else if !skipped {
            skipped = true;
            i += 1;
        } else {
            return false;
        }
    }

    true
}

/// Count of query words that 1-edit-match at least one token of `question`.
pub fn word_overlap_count(query_words: &[String], question: &str) -> usize {
    let question_tokens = tokens(question);
    query_words
        .iter()
        .filter(|q| question_tokens.iter().any(|w| within1(q, w)))
        .count()
}
