//! Concise-match boost.

use super::tokens::tokens;
use super::typo::word_overlap_count;

/// Reward short questions that cover all content tokens of the query.
///
/// - `query_words` empty -> 0.
/// - `tokens(question).len() > query_words.len() + max_extra` -> 0.
/// - fewer than `query_words.len()` words covered -> 0 (not all matched).
/// - otherwise scaled by how many "extra" words the question carries over
///   the query: 0 extra -> full boost, 1 extra -> 0.7x, 2+ extra -> 0.4x.
pub fn concise_match_boost(
    query_words: &[String],
    question: &str,
    boost_ceiling: f32,
    max_extra: usize,
) -> f32 {
    if query_words.is_empty() {
        return 0.0;
    }

    let question_tokens = tokens(question);
    if question_tokens.len() > query_words.len() + max_extra {
        return 0.0;
    }

    let count = word_overlap_count(query_words, question);
    if count < query_words.len() {
        return 0.0;
    }

    let extra = question_tokens.len() as isize - query_words.len() as isize;
    if extra <= 0 {
        boost_ceiling
    } else if extra == 1 {
        0.7 * boost_ceiling
    } else {
        0.4 * boost_ceiling
    }
}
