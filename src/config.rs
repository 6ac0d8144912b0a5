//! Immutable per-engine configuration.

use serde::{Deserialize, Serialize};

/// Configuration recognised by [`crate::engine::SearchEngine`] and the
/// default capability implementations. Pure data — constructing a value
/// performs no I/O.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Max vector-top candidates fed to the reranker.
    pub candidate_pool_size: usize,
    /// Max rows returned by a single FTS call.
    pub fts_limit: usize,
    /// Min corpus size at which the ANN index is built; below it, linear scan.
    pub hnsw_threshold: usize,
    /// `k` requested from the ANN index per query. Must be `>= candidate_pool_size`.
    pub hnsw_search_k: usize,
    /// ANN graph fan-out (`M`).
    pub hnsw_m: usize,
    /// ANN search-list width (`ef`).
    pub hnsw_ef: usize,
    /// Embedding vector length; must match the embedder's output.
    pub embedding_dim: usize,
    /// Entries table name, passed through to the store capability.
    pub table_name: String,
    /// FTS virtual table name, passed through to the store capability.
    pub fts_table_name: String,
    /// Id column name.
    pub id_column: String,
    /// Category column name.
    pub category_column: String,
    /// Question column name (searched).
    pub question_column: String,
    /// Answer column name (returned).
    pub answer_column: String,

    /// Additive lexical-match boost (`ftsBoost`).
    pub fts_boost: f32,
    /// Additive typo-match boost (`typoBoost`); scarcer than FTS hits, so
    /// weighted higher.
    pub typo_boost: f32,
    /// Ceiling for the concise-match boost (`B`).
    pub concise_match_boost: f32,
    /// Max extra words a question may carry over the query and still be
    /// "concise" (`E`).
    pub concise_match_max_extra: usize,
    /// Score at/above which a single surviving candidate short-circuits the
    /// result list to just that candidate.
    pub perfect_score_threshold: f32,
}

impl EngineConfig {
    /// Deserialize a config from JSON, falling back to [`Default::default`]
    /// for any field the JSON omits.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let default = serde_json::to_value(Self::default()).expect("EngineConfig always serializes");
        let mut merged = default;
        if let (Some(merged_obj), Some(value_obj)) = (merged.as_object_mut(), value.as_object()) {
            for (k, v) in value_obj {
                merged_obj.insert(k.clone(), v.clone());
            }
        }
        serde_json::from_value(merged)
    }

    /// Serialize this config to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            candidate_pool_size: 50,
            fts_limit: 50,
            hnsw_threshold: 1000,
            hnsw_search_k: 100,
            hnsw_m: 16,
            hnsw_ef: 64,
            embedding_dim: 128,
            table_name: "entries".to_string(),
            fts_table_name: "fts".to_string(),
            id_column: "id".to_string(),
            category_column: "category".to_string(),
            question_column: "question".to_string(),
            answer_column: "answer".to_string(),

            fts_boost: 0.5,
            typo_boost: 0.7,
            concise_match_boost: 0.5,
            concise_match_max_extra: 1,
            perfect_score_threshold: 0.999,
        }
    }
}
