//! dxsearch-core: fuzzy, explainable search over a fixed diagnosis vocabulary.
//!
//! # Architecture
//!
//! ```text
//! display names ──► Term Extractor ──► Vocabulary
//!                                          │
//!        raw query ──► Query ──► QueryEngine ──► ranked entries
//!                                   │
//!                  Match Quality ◄──┴──► Similarity (+ edit-distance cache)
//! ```
//!
//! The vocabulary is indexed once and never changes. Every keystroke builds a
//! fresh [`Query`] and asks the [`QueryEngine`] for an ordered result list; the
//! only state carried between queries is the engine's edit-distance cache.

pub mod config;
pub mod engine;
pub mod error;
pub mod quality;
pub mod similarity;
pub mod terms;
pub mod types;

pub use engine::{MatchTier, QueryEngine, SearchHit};
pub use error::VocabularyError;
pub use quality::{is_exact_match, Scorer};
pub use similarity::{similarity, EditDistanceCache, SingleCharPolicy};
pub use terms::extract_terms;
pub use types::{Query, Vocabulary, VocabularyEntry};

use std::sync::LazyLock;

/// Edit distances behind [`search`], shared by every call in the process.
static SHARED_CACHE: LazyLock<EditDistanceCache> = LazyLock::new(EditDistanceCache::new);

/// The cache backing [`search`].
pub fn shared_cache() -> &'static EditDistanceCache {
    &SHARED_CACHE
}

/// Ordered entries of `vocabulary` matching `raw_query`.
///
/// Uses the process-wide [`shared_cache`] and the default single-character
/// policy. Callers that want their own cache or policy hold a [`QueryEngine`].
pub fn search<'v>(raw_query: &str, vocabulary: &'v Vocabulary) -> Vec<&'v VocabularyEntry> {
    let query = Query::new(raw_query);
    let scorer = Scorer::new(shared_cache(), SingleCharPolicy::Fuzzy);
    engine::rank(vocabulary, &query, &scorer)
        .into_iter()
        .map(|hit| hit.entry)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
