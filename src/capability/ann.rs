//! `AnnIndex` capability: approximate nearest-neighbour search over the
//! corpus's embedding vectors, used once the corpus grows past
//! `config.hnsw_threshold`. Below that threshold the engine falls back to
//! linear cosine scan and never calls this trait.

use crate::error::Result;

/// Approximate nearest-neighbour index over `u32` entry ids.
///
/// `add` and `build` run once during `SearchEngine::initialize`; `search`
/// runs per query on the built, read-only index. Implementations may
/// assume ids are 1-based and dense, matching `EmbeddingSet`'s layout.
pub trait AnnIndex: Send + Sync {
    /// Register a vector under `id`. Called once per entry before `build`.
    fn add(&mut self, id: u32, vector: &[f32]) -> Result<()>;

    /// Finalise the index. Must be called before `search`.
    fn build(&mut self) -> Result<()>;

    /// Return up to `k` nearest ids to `query`, as `(id, distance)` pairs
    /// ordered by ascending distance. Distance semantics (cosine, L2, …)
    /// are implementation-defined; the engine treats a smaller distance
    /// as a closer match.
    fn search(&self, query: &[f32], k: usize) -> Result<Vec<(u32, f32)>>;
}

#[cfg(feature = "hnsw-ann")]
pub use hnsw_impl::HnswAnnIndex;

#[cfg(feature = "hnsw-ann")]
mod hnsw_impl {
    use super::AnnIndex;
    use crate::config::EngineConfig;
    use crate::error::{Result, SearchError};
    use hnsw_rs::anndists::dist::distances::DistCosine;
    use hnsw_rs::hnsw::Hnsw;

    const MAX_LAYER: usize = 16;

    /// Default `AnnIndex` built on `hnsw_rs`, configured from `EngineConfig`'s
    /// `hnsw_m`/`hnsw_ef`/`embedding_dim` fields.
    ///
    /// `Hnsw::new` takes the corpus's element count up front, so
    /// construction is deferred to [`AnnIndex::build`] once every `add`
    /// call has landed and `staged.len()` is the real count — not eagerly
    /// in `new()`, which would have nothing but a guess to size it with.
    pub struct HnswAnnIndex {
        m: usize,
        ef: usize,
        staged: Vec<(u32, Vec<f32>)>,
        hnsw: Option<Hnsw<'static, f32, DistCosine>>,
    }

    impl HnswAnnIndex {
        pub fn new(config: &EngineConfig) -> Self {
            Self {
                m: config.hnsw_m,
                ef: config.hnsw_ef,
                staged: Vec::new(),
                hnsw: None,
            }
        }
    }

    impl AnnIndex for HnswAnnIndex {
        fn add(&mut self, id: u32, vector: &[f32]) -> Result<()> {
            if self.hnsw.is_some() {
                return Err(SearchError::Ann(
                    "cannot add vectors after build()".to_string(),
                ));
            }
            self.staged.push((id, vector.to_vec()));
            Ok(())
        }

        fn build(&mut self) -> Result<()> {
            if self.hnsw.is_some() {
                return Ok(());
            }
            let max_elements = self.staged.len().max(1);
            let hnsw = Hnsw::new(self.m, max_elements, MAX_LAYER, self.ef, DistCosine);
            if !self.staged.is_empty() {
                let data: Vec<(&Vec<f32>, usize)> = self
                    .staged
                    .iter()
                    .map(|(id, v)| (v, *id as usize))
                    .collect();
                hnsw.parallel_insert_data(&data);
            }
            self.hnsw = Some(hnsw);
            Ok(())
        }

        fn search(&self, query: &[f32], k: usize) -> Result<Vec<(u32, f32)>> {
            let hnsw = self
                .hnsw
                .as_ref()
                .ok_or_else(|| SearchError::Ann("search() before build()".to_string()))?;
            let ef_search = self.ef.max(k * 2);
            let neighbours = hnsw.search_neighbours(query, k, ef_search);
            Ok(neighbours
                .into_iter()
                .map(|n| (n.d_id as u32, n.distance))
                .collect())
        }
    }
}
