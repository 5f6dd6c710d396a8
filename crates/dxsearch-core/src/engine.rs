//! Query engine: turns one raw query into an ordered list of entries.
//!
//! Strategy, evaluated on the normalized query:
//!
//! 1. **Empty**: no query, no suggestions.
//! 2. **Exact tier**: if any entry is an exact match, the result is exactly
//!    those entries. Nothing else is scored.
//! 3. **Fuzzy tier**: every entry is scored and those above zero are kept.
//!
//! Both tiers order by descending match quality; equal qualities keep
//! vocabulary order. The engine owns the edit-distance cache, so every query
//! issued through the same engine benefits from earlier ones.

use std::cmp::Ordering;

use crate::quality::{is_exact_match, Scorer};
use crate::similarity::{EditDistanceCache, SingleCharPolicy};
use crate::types::{Query, Vocabulary, VocabularyEntry};

/// Which strategy produced a result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Exact,
    Fuzzy,
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchTier::Exact => write!(f, "exact"),
            MatchTier::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

/// One ranked result with the evidence behind its position.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SearchHit<'v> {
    #[serde(rename = "text", serialize_with = "serialize_display_text")]
    pub entry: &'v VocabularyEntry,
    pub quality: f64,
    pub tier: MatchTier,
    pub best_term: &'v str,
}

fn serialize_display_text<S: serde::Serializer>(
    entry: &&VocabularyEntry,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(entry.display_text())
}

/// Sort key: higher quality first, then earlier vocabulary position.
#[derive(Debug, Clone, Copy)]
struct RankKey {
    quality: f64,
    index: usize,
}

impl PartialEq for RankKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankKey {}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .quality
            .total_cmp(&self.quality)
            .then_with(|| self.index.cmp(&other.index))
    }
}

/// Owns a vocabulary and the edit-distance cache shared by every query.
#[derive(Debug)]
pub struct QueryEngine {
    vocabulary: Vocabulary,
    cache: EditDistanceCache,
    single_char: SingleCharPolicy,
}

impl QueryEngine {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self::with_policy(vocabulary, SingleCharPolicy::default())
    }

    pub fn with_policy(vocabulary: Vocabulary, single_char: SingleCharPolicy) -> Self {
        Self {
            vocabulary,
            cache: EditDistanceCache::new(),
            single_char,
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn cache(&self) -> &EditDistanceCache {
        &self.cache
    }

    pub fn single_char_policy(&self) -> SingleCharPolicy {
        self.single_char
    }

    /// Ordered entries matching `raw_query`.
    pub fn search(&self, raw_query: &str) -> Vec<&VocabularyEntry> {
        self.search_hits(raw_query)
            .into_iter()
            .map(|hit| hit.entry)
            .collect()
    }

    /// Ordered hits for `raw_query`, each carrying its quality, tier and the
    /// term that scored best.
    pub fn search_hits(&self, raw_query: &str) -> Vec<SearchHit<'_>> {
        let query = Query::new(raw_query);

        // Single characters only change behaviour under the prefix policy,
        // where the substring guard is relaxed inside the similarity metric.
        let policy = if query.is_single_char() {
            self.single_char
        } else {
            SingleCharPolicy::Fuzzy
        };
        let hits = rank(&self.vocabulary, &query, &Scorer::new(&self.cache, policy));

        tracing::debug!(
            query = query.raw(),
            hits = hits.len(),
            cached_pairs = self.cache.len(),
            "search complete"
        );
        hits
    }
}

/// Run the empty / exact / fuzzy strategy for `query` over `vocabulary`.
pub fn rank<'v>(vocabulary: &'v Vocabulary, query: &Query, scorer: &Scorer<'_>) -> Vec<SearchHit<'v>> {
    if query.is_empty() {
        tracing::debug!("empty query");
        return Vec::new();
    }

    let exact: Vec<(usize, &VocabularyEntry)> = vocabulary
        .iter()
        .enumerate()
        .filter(|(_, entry)| is_exact_match(entry, query))
        .collect();

    let (tier, candidates): (MatchTier, Vec<(usize, &VocabularyEntry)>) = if exact.is_empty() {
        (MatchTier::Fuzzy, vocabulary.iter().enumerate().collect())
    } else {
        (MatchTier::Exact, exact)
    };
    tracing::debug!(%tier, candidates = candidates.len(), "strategy selected");

    let mut ranked: Vec<(RankKey, SearchHit<'v>)> = candidates
        .into_iter()
        .filter_map(|(index, entry)| {
            let score = scorer.entry_score(entry, query);
            tracing::trace!(
                entry = entry.display_text(),
                quality = score.quality,
                best_term = score.best_term,
                "scored"
            );
            if tier == MatchTier::Fuzzy && score.quality <= 0.0 {
                return None;
            }
            let key = RankKey { quality: score.quality, index };
            let hit = SearchHit {
                entry,
                quality: score.quality,
                tier,
                best_term: score.best_term,
            };
            Some((key, hit))
        })
        .collect();

    ranked.sort_by(|(a, _), (b, _)| a.cmp(b));
    ranked.into_iter().map(|(_, hit)| hit).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
