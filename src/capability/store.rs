//! `EntryStore` capability: loads the question map, executes FTS
//! match queries, and fetches full entries by id.

use std::collections::HashMap;

use crate::error::Result;
use crate::types::{Entry, QuestionMap};

/// Read-only view over the corpus of entries.
///
/// `fts_match` is best-effort: the *engine* is responsible for catching a
/// failed call and degrading to "no lexical hits" — this trait
/// still returns a `Result` so implementations can distinguish "no rows"
/// from "the query failed" in their own logs. `fetch_entries` preserves no
/// particular order; callers reorder by id.
///
/// Implementations must be safe to call concurrently for reads once built
///: the engine may run multiple `search` calls in parallel.
pub trait EntryStore: Send + Sync {
    /// Number of entries in the corpus. Must be available before
    /// `SearchEngine::initialize` runs.
    fn entry_count(&self) -> Result<usize>;

    /// `id -> question` for every entry in the store.
    fn load_questions(&self) -> Result<QuestionMap>;

    /// Row ids matching an FTS expression built by
    /// [`crate::ranking::fts_match_expr`], capped at `limit`.
    fn fts_match(&self, expr: &str, limit: usize) -> Result<Vec<u32>>;

    /// Fetch entries by id. Order of the returned vector is unspecified.
    fn fetch_entries(&self, ids: &[u32]) -> Result<Vec<Entry>>;

    /// Release any held resources (file handles, connections). Idempotent.
    fn close(&mut self) -> Result<()>;
}

/// An in-memory `EntryStore` with a naive substring-based FTS stand-in,
/// used for tests and for hosts that build their own corpus in memory.
/// Not a performance-oriented implementation — the real lexical matcher
/// is treated as an external collaborator the engine is generic over.
pub struct InMemoryEntryStore {
    entries: Vec<Entry>,
}

impl InMemoryEntryStore {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }
}

impl EntryStore for InMemoryEntryStore {
    fn entry_count(&self) -> Result<usize> {
        Ok(self.entries.len())
    }

    fn load_questions(&self) -> Result<QuestionMap> {
        let mut map: HashMap<u32, String> = HashMap::new();
        for e in &self.entries {
            map.insert(e.id, e.question.clone());
        }
        Ok(map)
    }

    fn fts_match(&self, expr: &str, limit: usize) -> Result<Vec<u32>> {
        // Parse "col: w1 OR col: w2 OR ..." back into bare words; good
        // enough for a reference/testing matcher, not for real FTS syntax.
        let words: Vec<String> = expr
            .split(" OR ")
            .filter_map(|clause| clause.split_once(": ").map(|(_, w)| w.to_lowercase()))
            .collect();

        if words.is_empty() {
            return Ok(vec![]);
        }

        let mut ids: Vec<u32> = self
            .entries
            .iter()
            .filter(|e| {
                let q = e.question.to_lowercase();
                words.iter().any(|w| q.contains(w.as_str()))
            })
            .map(|e| e.id)
            .collect();
        ids.truncate(limit);
        Ok(ids)
    }

    fn fetch_entries(&self, ids: &[u32]) -> Result<Vec<Entry>> {
        Ok(self
            .entries
            .iter()
            .filter(|e| ids.contains(&e.id))
            .cloned()
            .collect())
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
