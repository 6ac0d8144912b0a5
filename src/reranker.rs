//! Reranking: turns scored candidates into the final ordered result list.
//!
//! Structure mirrors the `search::rerank::Reranker` (a struct
//! holding config, a `rerank` entry point, and per-candidate component
//! computation) but the component algebra is specific to this engine:
//! additive `vectorScore + ftsComp + typoComp + conciseComp`, not a
//! weighted blend of original/rerank scores.

use std::collections::HashSet;

use crate::config::EngineConfig;
use crate::ranking::{apply_perfect_match_shortcut, concise_match_boost};
use crate::types::{Candidate, SearchResult};

/// Pluggable reranking strategy. The engine calls this once per query with
/// the deduplicated candidate pool and the signal sets gathered during the
/// search; everything else (oversampling, truncation, the perfect-match
/// shortcut) is the reranker's responsibility so that a custom reranker can
/// change that behaviour too.
pub trait Reranker: Send + Sync {
    #[allow(clippy::too_many_arguments)]
    fn rerank(
        &self,
        candidates: Vec<Candidate>,
        query_words: &[String],
        fts_ids: &HashSet<u32>,
        typo_ids: &HashSet<u32>,
        limit: usize,
        config: &EngineConfig,
    ) -> Vec<SearchResult>;
}

/// Default reranker: additive score of vector similarity plus mutually
/// exclusive FTS/typo boosts plus a concise-match boost, oversampled by 2x,
/// deduplicated by normalised question, truncated to `limit`, and finally
/// passed through the perfect-match shortcut.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicReranker;

impl HeuristicReranker {
    pub fn new() -> Self {
        Self
    }
}

impl Reranker for HeuristicReranker {
    fn rerank(
        &self,
        candidates: Vec<Candidate>,
        query_words: &[String],
        fts_ids: &HashSet<u32>,
        typo_ids: &HashSet<u32>,
        limit: usize,
        config: &EngineConfig,
    ) -> Vec<SearchResult> {
        if candidates.is_empty() {
            return vec![];
        }

        let oversample = limit.saturating_mul(2).max(limit);

        let mut scored: Vec<SearchResult> = candidates
            .into_iter()
            .map(|c| {
                let fts_comp = if fts_ids.contains(&c.entry.id) {
                    config.fts_boost
                } else {
                    0.0
                };
                // FTS and typo boosts are mutually exclusive per candidate:
                // typo only applies to ids the FTS pass did not already hit.
                let typo_comp = if fts_comp == 0.0 && typo_ids.contains(&c.entry.id) {
                    config.typo_boost
                } else {
                    0.0
                };
                let concise_comp = concise_match_boost(
                    query_words,
                    &c.entry.question,
                    config.concise_match_boost,
                    config.concise_match_max_extra,
                );

                let score = c.vector_score + fts_comp + typo_comp + concise_comp;
                SearchResult {
                    entry: c.entry,
                    score,
                    method: "heuristic".to_string(),
                }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(oversample);

        let deduped = dedup_by_normalized_question(scored);
        let mut truncated = deduped;
        truncated.truncate(limit);

        apply_perfect_match_shortcut(truncated, config.perfect_score_threshold)
    }
}

fn dedup_by_normalized_question(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(results.len());
    for r in results {
        let key = r.entry.question.trim().to_lowercase();
        if seen.insert(key) {
            out.push(r);
        }
    }
    out
}
