//! Pure, stateless ranking utilities: token normalisation, FTS
//! query composition, 1-edit typo matching, concise-match boost, the
//! perfect-match shortcut, and the combined-score helper.
//!
//! No hidden state, no mutation: the only process-wide cost is
//! the lazily-compiled, shared regexes in [`tokens`].

mod combine;
mod concise;
mod fts;
mod perfect;
mod tokens;
mod typo;

pub use combine::top_k_combined;
pub use concise::concise_match_boost;
pub use fts::fts_match_expr;
pub use perfect::apply_perfect_match_shortcut;
pub use tokens::tokens;
pub use typo::{within1, word_overlap_count};
