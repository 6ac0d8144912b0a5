//! Combined-score helper.

use std::collections::HashSet;

/// Given `id -> vectorScore` and an FTS-hit set, produce the top-`k` ids by
/// `vectorScore + (ftsHit ? ftsBoost : 0)`, descending, ties broken by
/// ascending id (stable, deterministic discovery order for a map input).
pub fn top_k_combined(
    vector_scores: &std::collections::HashMap<u32, f32>,
    fts_ids: &HashSet<u32>,
    fts_boost: f32,
    k: usize,
) -> Vec<u32> {
    let mut scored: Vec<(u32, f32)> = vector_scores
        .iter()
        .map(|(&id, &score)| {
            let boosted = score + if fts_ids.contains(&id) { fts_boost } else { 0.0 };
            (id, boosted)
        })
        .collect();

    scored.sort_by(|a, b| match b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal) {
        std::cmp::Ordering::Equal => a.0.cmp(&b.0),
        ord => ord,
    });
    scored.truncate(k);
    scored.into_iter().map(|(id, _)| id).collect()
}
