//! External collaborators the engine is generic over: embedding, lexical
//! storage, approximate nearest-neighbour search, and reranking. The
//! engine only depends on these traits; concrete implementations below
//! are conveniences, not requirements.

mod ann;
mod embedder;
mod store;

#[cfg(feature = "sqlite-store")]
mod store_sqlite;

pub use ann::AnnIndex;
pub use embedder::Embedder;
pub use store::{EntryStore, InMemoryEntryStore};

#[cfg(feature = "hnsw-ann")]
pub use ann::HnswAnnIndex;

#[cfg(feature = "sqlite-store")]
pub use store_sqlite::SqliteEntryStore;
