//! Core data model.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A question/answer entry in the knowledge base. Immutable; `id` is the
/// join key to the embedding set (`embedding[id - 1]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// 1-based, dense identifier.
    pub id: u32,
    /// Informational only; never searched or scored.
    pub category: String,
    /// Searched text.
    pub question: String,
    /// Returned text.
    pub answer: String,
}

/// Ordered sequence of `D` single-precision floats.
pub type Embedding = Vec<f32>;

/// Ordered sequence of `N` embeddings. Index `i` (0-based) corresponds to
/// `Entry.id = i + 1`.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingSet {
    dim: usize,
    vectors: Vec<Embedding>,
}

impl EmbeddingSet {
    /// Build a set from already-decoded vectors, all of length `dim`.
    ///
    /// # Panics
    /// Panics if any vector's length does not equal `dim` — this is a
    /// construction-time invariant, not a runtime query condition.
    pub fn new(dim: usize, vectors: Vec<Embedding>) -> Self {
        for v in &vectors {
            assert_eq!(v.len(), dim, "embedding length must equal dim");
        }
        Self { dim, vectors }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Fetch the embedding at 0-based index `i` (i.e. `Entry.id = i + 1`).
    pub fn get(&self, i: usize) -> Option<&Embedding> {
        self.vectors.get(i)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Embedding> {
        self.vectors.iter()
    }
}

/// `norm[i]` is the L2 norm of `embedding[i]`, computed once at init and
/// never recomputed.
#[derive(Debug, Clone, Default)]
pub struct NormTable(Vec<f32>);

impl NormTable {
    /// Compute the norm table for an embedding set.
    pub fn compute(embeddings: &EmbeddingSet) -> Self {
        Self(embeddings.iter().map(|v| l2_norm(v)).collect())
    }

    pub fn get(&self, i: usize) -> Option<f32> {
        self.0.get(i).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// L2 norm of a vector; `0.0` for an empty vector.
pub fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Cosine similarity between two vectors sharing precomputed norms.
/// Returns `0.0` when either norm is zero (spec GLOSSARY).
pub fn cosine_similarity_with_norms(a: &[f32], b: &[f32], norm_a: f32, norm_b: f32) -> f32 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    dot / (norm_a * norm_b)
}

/// Cosine similarity computing norms on the fly.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    cosine_similarity_with_norms(a, b, l2_norm(a), l2_norm(b))
}

/// `id -> question` map, materialised once at init and read-only after
/// that. Used for the typo scan.
pub type QuestionMap = HashMap<u32, String>;

/// Input to the reranker: an entry paired with its vector score and,
/// optionally, its embedding (carried through so a reranker can recompute
/// similarity without a second store round-trip).
#[derive(Debug, Clone)]
pub struct Candidate {
    pub entry: Entry,
    pub vector_score: f32,
    pub embedding: Option<Embedding>,
}

/// One ranked hit. `score` is cosine plus additive boosts and is not
/// clamped — it may exceed `1.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub entry: Entry,
    pub score: f32,
    /// `"heuristic"` from the default reranker; custom rerankers set their
    /// own tag.
    pub method: String,
}
