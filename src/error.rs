//! Error types for the hybrid search core.

use thiserror::Error;

/// Result type alias for search-core operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors surfaced by the Float16 codec, the engine lifecycle, and the
/// external capabilities (`Embedder`, `EntryStore`, `AnnIndex`).
#[derive(Error, Debug)]
pub enum SearchError {
    /// Float16 blob shorter than the 8-byte `[count][dim]` header.
    #[error("float16 blob truncated: header needs 8 bytes, got {got}")]
    TruncatedHeader { got: usize },

    /// Float16 blob shorter than `8 + count * dim * 2` bytes.
    #[error("float16 blob truncated: expected {expected} bytes, got {got}")]
    TruncatedPayload { expected: usize, got: usize },

    /// `search`/`initialize` called before `initialize` has completed.
    #[error("search engine not initialized")]
    NotInitialized,

    /// `search`/`initialize`/`dispose` called after `dispose`.
    #[error("search engine already disposed")]
    AlreadyDisposed,

    /// The `EntryStore` capability failed on a call other than `ftsMatch`
    /// (whose failures are recovered locally, see `SearchEngine::search`).
    #[error("entry store error: {0}")]
    Store(String),

    /// The `AnnIndex` capability failed to build or search.
    #[error("ann index error: {0}")]
    Ann(String),

    /// The `Embedder` capability failed to embed a query.
    #[error("embedder error: {0}")]
    Embedder(String),

    /// An id or dimension invariant was violated by a capability
    /// (id outside `[1, N]`, or an embedding whose length does not match
    /// `config.embedding_dim`). Treated as a bug in the host, not a
    /// recoverable condition.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),
}
