//! Search engine: owns the lifecycle state machine and the per-query
//! orchestration, generic over the four capability traits. Unlike a
//! stateless query function, this engine owns real in-process state
//! that must be built up and torn down: the embedding set and the norm
//! table.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::capability::{AnnIndex, Embedder, EntryStore};
use crate::config::EngineConfig;
use crate::error::{Result, SearchError};
use crate::ranking::{fts_match_expr, top_k_combined, tokens, within1, word_overlap_count};
use crate::reranker::Reranker;
use crate::types::{
    Candidate, EmbeddingSet, NormTable, QuestionMap,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Constructed,
    Initialised,
    Disposed,
}

/// Hybrid search engine over a fixed corpus of question/answer entries.
///
/// Lifecycle is constructed -> initialised -> disposed. `initialize` and
/// `dispose` are idempotent; `search` before `initialize` or anything
/// after `dispose` is a [`SearchError::NotInitialized`] /
/// [`SearchError::AlreadyDisposed`]. Once initialised, `search` may be
/// called concurrently — the engine's state is read-only after init.
pub struct SearchEngine<E, S, A, R>
where
    E: Embedder,
    S: EntryStore,
    A: AnnIndex,
    R: Reranker,
{
    embedder: E,
    store: S,
    ann: Option<A>,
    reranker: R,
    config: EngineConfig,

    state: Lifecycle,
    embeddings: EmbeddingSet,
    norms: NormTable,
    questions: QuestionMap,
    use_ann: bool,
}

impl<E, S, A, R> SearchEngine<E, S, A, R>
where
    E: Embedder,
    S: EntryStore,
    A: AnnIndex,
    R: Reranker,
{
    /// Construct an uninitialised engine. Call [`Self::initialize`] before
    /// the first [`Self::search`].
    pub fn new(embedder: E, store: S, ann: Option<A>, reranker: R, config: EngineConfig) -> Self {
        Self {
            embedder,
            store,
            ann,
            reranker,
            config,
            state: Lifecycle::Constructed,
            embeddings: EmbeddingSet::default(),
            norms: NormTable::default(),
            questions: HashMap::new(),
            use_ann: false,
        }
    }

    pub fn is_initialised(&self) -> bool {
        self.state == Lifecycle::Initialised
    }

    pub fn entry_count(&self) -> usize {
        self.embeddings.len()
    }

    /// Load the corpus's embeddings into the engine, precompute norms,
    /// build the ANN index if the corpus is large enough, and load the
    /// question map. Calling this again once initialised is a no-op;
    /// calling it after [`Self::dispose`] is an error.
    pub fn initialize(&mut self, embeddings: EmbeddingSet) -> Result<()> {
        match self.state {
            Lifecycle::Initialised => return Ok(()),
            Lifecycle::Disposed => return Err(SearchError::AlreadyDisposed),
            Lifecycle::Constructed => {}
        }

        let entry_count = self.store.entry_count()?;
        if embeddings.len() != entry_count {
            return Err(SearchError::SchemaMismatch(format!(
                "store has {entry_count} entries but {} embeddings were provided",
                embeddings.len()
            )));
        }

        self.norms = NormTable::compute(&embeddings);
        self.questions = self.store.load_questions()?;

        self.use_ann = self.ann.is_some() && embeddings.len() >= self.config.hnsw_threshold;
        if self.use_ann {
            let ann = self.ann.as_mut().expect("checked is_some above");
            for (i, vector) in embeddings.iter().enumerate() {
                ann.add((i + 1) as u32, vector)?;
            }
            ann.build()?;
        }

        self.embeddings = embeddings;
        self.state = Lifecycle::Initialised;
        debug!(entries = self.embeddings.len(), use_ann = self.use_ann, "engine initialised");
        Ok(())
    }

    /// Release held resources. Idempotent; terminal — no further calls
    /// succeed after this one.
    pub fn dispose(&mut self) -> Result<()> {
        if self.state == Lifecycle::Disposed {
            return Ok(());
        }
        self.store.close()?;
        self.state = Lifecycle::Disposed;
        Ok(())
    }

    /// Run one query through the eight-step search algorithm and return
    /// up to `limit` ranked results.
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<crate::types::SearchResult>> {
        match self.state {
            Lifecycle::Constructed => return Err(SearchError::NotInitialized),
            Lifecycle::Disposed => return Err(SearchError::AlreadyDisposed),
            Lifecycle::Initialised => {}
        }

        // Step 1: embed the query.
        let query_vector = self.embedder.embed(query)?;
        let query_words = self.embedder.content_words(query);

        // Step 2: vector score for every entry, via ANN when the corpus
        // warrants it, else a full linear cosine scan.
        let vector_scores = self.vector_scores(&query_vector)?;

        // Step 3: lexical FTS, retrying as a single-word query if a
        // multi-word query yields nothing. FTS failures degrade to no
        // lexical hits rather than aborting the call.
        let fts_ids = self.lexical_hits(&query_words);

        // Step 4: typo scan over the question map.
        let typo_ids = self.typo_hits(&query_words);

        // Step 5: union the candidate pool; abort if it is empty.
        let top_vector_ids: HashSet<u32> = top_k_combined(
            &vector_scores,
            &fts_ids,
            self.config.fts_boost,
            self.config.candidate_pool_size,
        )
        .into_iter()
        .collect();

        let mut candidate_ids: HashSet<u32> = top_vector_ids.clone();
        candidate_ids.extend(fts_ids.iter().copied());
        candidate_ids.extend(typo_ids.iter().copied());

        if candidate_ids.is_empty() {
            return Ok(vec![]);
        }

        // Step 6: ids that only entered the pool through lexical/typo
        // matching (possible under ANN mode, where the vector ranking
        // only ever sees the top `hnswSearchK` ids) get their exact
        // cosine against `qVec` computed from the stored embedding and
        // norm, so the reranker never sees an artificially low score for
        // a candidate the vector signal never got to rank.
        let query_norm = crate::types::l2_norm(&query_vector);
        let mut gap_filled_scores = vector_scores;
        for &id in &candidate_ids {
            gap_filled_scores.entry(id).or_insert_with(|| {
                let idx = (id - 1) as usize;
                match (self.embeddings.get(idx), self.norms.get(idx)) {
                    (Some(vector), Some(norm)) => crate::types::cosine_similarity_with_norms(
                        &query_vector,
                        vector,
                        query_norm,
                        norm,
                    ),
                    _ => 0.0,
                }
            });
        }

        // Step 7: fetch entries, build candidates, rerank.
        let ids: Vec<u32> = candidate_ids.into_iter().collect();
        let entries = self.store.fetch_entries(&ids)?;
        let candidates: Vec<Candidate> = entries
            .into_iter()
            .map(|entry| {
                let idx = (entry.id - 1) as usize;
                let embedding = self.embeddings.get(idx).cloned();
                let vector_score = gap_filled_scores.get(&entry.id).copied().unwrap_or(0.0);
                Candidate {
                    entry,
                    vector_score,
                    embedding,
                }
            })
            .collect();

        let reranked = self.reranker.rerank(
            candidates,
            &query_words,
            &fts_ids,
            &typo_ids,
            limit,
            &self.config,
        );

        // Step 8: keyword-overlap safety filter — drop results that share
        // no token with the raw query at all, which can happen when a pure
        // vector match is a false positive. Uses `tokens(query)`, not the
        // embedder's (possibly stop-word-stripped) `content_words`, per
        // spec invariant 5; an empty `tokens(query)` naturally yields an
        // empty result list rather than skipping the filter.
        let query_tokens = tokens(query);
        Ok(reranked
            .into_iter()
            .filter(|r| has_word_overlap(&query_tokens, &r.entry.question))
            .collect())
    }

    fn vector_scores(&self, query_vector: &[f32]) -> Result<HashMap<u32, f32>> {
        if self.use_ann {
            let ann = self.ann.as_ref().expect("use_ann implies ann is set");
            let hits = ann.search(query_vector, self.config.hnsw_search_k)?;
            // `AnnIndex::search` returns ascending-distance pairs; the
            // engine maps them to a descending-is-better score via
            // `1 - distance` (spec §4.4 step 2 / §6).
            Ok(hits
                .into_iter()
                .map(|(id, distance)| (id, 1.0 - distance))
                .collect())
        } else {
            let query_norm = crate::types::l2_norm(query_vector);
            let mut scores = HashMap::with_capacity(self.embeddings.len());
            for i in 0..self.embeddings.len() {
                let vector = self.embeddings.get(i).expect("bounded by len()");
                let norm = self.norms.get(i).unwrap_or(0.0);
                let score = crate::types::cosine_similarity_with_norms(
                    query_vector,
                    vector,
                    query_norm,
                    norm,
                );
                scores.insert((i + 1) as u32, score);
            }
            Ok(scores)
        }
    }

    fn lexical_hits(&self, query_words: &[String]) -> HashSet<u32> {
        if query_words.is_empty() {
            return HashSet::new();
        }

        let full_expr = fts_match_expr(query_words, &self.config.question_column);
        match self.store.fts_match(&full_expr, self.config.fts_limit) {
            Ok(ids) if !ids.is_empty() => return ids.into_iter().collect(),
            Ok(_) => {}
            Err(err) => {
                warn!(error = %err, "fts query failed, degrading to no lexical hits");
                return HashSet::new();
            }
        }

        if query_words.len() <= 1 {
            return HashSet::new();
        }

        let single_word_expr = fts_match_expr(&query_words[..1], &self.config.question_column);
        match self.store.fts_match(&single_word_expr, self.config.fts_limit) {
            Ok(ids) => ids.into_iter().collect(),
            Err(err) => {
                warn!(error = %err, "fts retry failed, degrading to no lexical hits");
                HashSet::new()
            }
        }
    }

    fn typo_hits(&self, query_words: &[String]) -> HashSet<u32> {
        if query_words.is_empty() {
            return HashSet::new();
        }
        self.questions
            .iter()
            .filter(|(_, question)| {
                let lower = question.to_lowercase();
                let substring_hit = query_words.iter().any(|w| lower.contains(w.as_str()));
                if substring_hit {
                    return true;
                }
                let question_tokens = tokens(question);
                query_words
                    .iter()
                    .any(|qw| question_tokens.iter().any(|qt| within1(qw, qt)))
            })
            .map(|(&id, _)| id)
            .collect()
    }
}

fn has_word_overlap(query_words: &[String], question: &str) -> bool {
    word_overlap_count(query_words, question) >= 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::InMemoryEntryStore;
    use crate::config::EngineConfig;
    use crate::reranker::HeuristicReranker;
    use crate::types::Entry;

    struct StubEmbedder;

    impl Embedder for StubEmbedder {
        fn embed(&self, text: &str) -> Result<Vec<f32>> {
            // Trivial bag-of-words-ish embedding: presence of "dart" vs
            // "flutter" in two dimensions, enough to separate the fixture.
            let lower = text.to_lowercase();
            Ok(vec![
                if lower.contains("dart") { 1.0 } else { 0.0 },
                if lower.contains("flutter") { 1.0 } else { 0.0 },
            ])
        }

        fn content_words(&self, text: &str) -> Vec<String> {
            tokens(text)
        }
    }

    struct NoopAnn;
    impl AnnIndex for NoopAnn {
        fn add(&mut self, _id: u32, _vector: &[f32]) -> Result<()> {
            Ok(())
        }
        fn build(&mut self) -> Result<()> {
            Ok(())
        }
        fn search(&self, _query: &[f32], _k: usize) -> Result<Vec<(u32, f32)>> {
            Ok(vec![])
        }
    }

    fn fixture_engine() -> SearchEngine<StubEmbedder, InMemoryEntryStore, NoopAnn, HeuristicReranker> {
        let entries = vec![
            Entry {
                id: 1,
                category: "Dart".into(),
                question: "What is Dart?".into(),
                answer: "Dart is a language.".into(),
            },
            Entry {
                id: 2,
                category: "Flutter".into(),
                question: "What is Flutter?".into(),
                answer: "Flutter is a UI toolkit.".into(),
            },
        ];
        let store = InMemoryEntryStore::new(entries);
        SearchEngine::new(
            StubEmbedder,
            store,
            None::<NoopAnn>,
            HeuristicReranker::new(),
            EngineConfig::default(),
        )
    }

    fn fixture_embeddings() -> EmbeddingSet {
        EmbeddingSet::new(2, vec![vec![1.0, 0.0], vec![0.0, 1.0]])
    }

    #[test]
    fn search_before_initialize_errors() {
        let engine = fixture_engine();
        let result = engine.search("dart", 5);
        assert!(matches!(result, Err(SearchError::NotInitialized)));
    }

    #[test]
    fn initialize_is_idempotent() {
        let mut engine = fixture_engine();
        engine.initialize(fixture_embeddings()).unwrap();
        engine.initialize(fixture_embeddings()).unwrap();
        assert!(engine.is_initialised());
    }

    #[test]
    fn dispose_then_search_errors() {
        let mut engine = fixture_engine();
        engine.initialize(fixture_embeddings()).unwrap();
        engine.dispose().unwrap();
        let result = engine.search("dart", 5);
        assert!(matches!(result, Err(SearchError::AlreadyDisposed)));
    }

    #[test]
    fn dispose_is_idempotent() {
        let mut engine = fixture_engine();
        engine.initialize(fixture_embeddings()).unwrap();
        engine.dispose().unwrap();
        engine.dispose().unwrap();
    }

    #[test]
    fn typo_hits_substring_branch_catches_distance_two_substrings() {
        // "flutt" is a substring of "flutter" but two edits short of it
        // (within1 only tolerates one), so only step 4a's direct substring
        // check can surface this hit.
        let mut engine = fixture_engine();
        engine.initialize(fixture_embeddings()).unwrap();
        let hits = engine.typo_hits(&["flutt".to_string()]);
        assert!(hits.contains(&2));
    }

    #[test]
    fn search_returns_best_matching_entry_first() {
        let mut engine = fixture_engine();
        engine.initialize(fixture_embeddings()).unwrap();
        let results = engine.search("dart", 5).unwrap();
        assert!(!results.is_empty());
        assert_eq!(results[0].entry.id, 1);
    }

    struct FixedAnn;
    impl AnnIndex for FixedAnn {
        fn add(&mut self, _id: u32, _vector: &[f32]) -> Result<()> {
            Ok(())
        }
        fn build(&mut self) -> Result<()> {
            Ok(())
        }
        fn search(&self, _query: &[f32], _k: usize) -> Result<Vec<(u32, f32)>> {
            // Pretend the ANN only ever surfaces entry 2, regardless of
            // query, so entry 1 can only reach the candidate pool through
            // its FTS/typo hit and must be gap-filled.
            Ok(vec![(2, 0.1)])
        }
    }

    #[test]
    fn ann_gap_fill_uses_exact_cosine_not_zero() {
        let entries = vec![
            Entry {
                id: 1,
                category: "Dart".into(),
                question: "What is Dart?".into(),
                answer: "Dart is a language.".into(),
            },
            Entry {
                id: 2,
                category: "Flutter".into(),
                question: "What is Flutter?".into(),
                answer: "Flutter is a UI toolkit.".into(),
            },
        ];
        let store = InMemoryEntryStore::new(entries);
        let mut config = EngineConfig::default();
        config.hnsw_threshold = 0; // force ANN path with only two entries
        let mut engine = SearchEngine::new(
            StubEmbedder,
            store,
            Some(FixedAnn),
            HeuristicReranker::new(),
            config,
        );
        engine.initialize(fixture_embeddings()).unwrap();

        let results = engine.search("dart", 5).unwrap();
        let entry_one = results.iter().find(|r| r.entry.id == 1);
        assert!(entry_one.is_some(), "entry 1 should reach the pool via its FTS hit");
        // fts_boost (0.5) alone would cap this at 0.5; the gap-filled exact
        // cosine of 1.0 (query vector == entry 1's embedding) pushes it above.
        assert!(entry_one.unwrap().score > 1.0);
    }

    #[test]
    fn mismatched_embedding_count_is_a_schema_error() {
        let mut engine = fixture_engine();
        let bad = EmbeddingSet::new(2, vec![vec![1.0, 0.0]]);
        let result = engine.initialize(bad);
        assert!(matches!(result, Err(SearchError::SchemaMismatch(_))));
    }
}
