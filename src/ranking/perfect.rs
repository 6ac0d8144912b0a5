//! Perfect-match shortcut.

use crate::types::SearchResult;

/// If exactly one result scores at or above `threshold`, return just that
/// result; otherwise return `results` unchanged.
pub fn apply_perfect_match_shortcut(results: Vec<SearchResult>, threshold: f32) -> Vec<SearchResult> {
    let perfect: Vec<&SearchResult> = results.iter().filter(|r| r.score >= threshold).collect();
    if perfect.len() == 1 {
        vec![perfect[0].clone()]
    } else {
        results
    }
}
