//! `Embedder` capability: query text -> dense vector, and query
//! text -> content tokens. Out of scope for this crate's implementation —
//! only the trait is specified; hosts bring their own model.

use crate::error::Result;

/// Turns query text into a dense vector and into content tokens.
///
/// `embed` may suspend (it performs model inference, possibly over I/O);
/// `content_words` is pure and synchronous. Dimension of `embed`'s output
/// must equal `config.embedding_dim`. Tokens returned by `content_words`
/// are expected to already be lowercased with stop-words stripped by the
/// implementation.
pub trait Embedder: Send + Sync {
    /// Embed `text` into a vector of length `config.embedding_dim`.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Tokenise `text` into content words for lexical/typo matching.
    fn content_words(&self, text: &str) -> Vec<String>;
}
