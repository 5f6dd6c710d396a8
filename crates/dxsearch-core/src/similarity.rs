//! Word-level similarity: how well one query word matches one vocabulary word.
//!
//! The score is the larger of two sub-metrics:
//!
//! | Sub-metric | Score |
//! |------------|-------|
//! | substring containment | `len(query) / len(vocab)` when the query word (≥ 2 chars) occurs in the vocab word |
//! | edit-distance closeness | `max(0, 1 - 2 * levenshtein / len(vocab))` |
//!
//! Closeness maps distance `0` to `1.0`, distance `len/4` to `0.5` and
//! anything from `len/2` upwards to `0.0`, so the typo budget scales with the
//! length of the vocabulary word.
//!
//! All lengths are counted in `char`s. Edit distances are memoised in an
//! [`EditDistanceCache`] keyed by the unordered word pair.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

/// Minimum query-word length for plain substring containment to count.
pub const MIN_SUBSTRING_LEN: usize = 2;

/// How one-character query words are treated by the substring sub-metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SingleCharPolicy {
    /// The length guard applies; a single character only scores through edit
    /// distance.
    #[default]
    Fuzzy,
    /// A single character that starts the vocabulary word scores
    /// `1 / len(vocab)` through the substring sub-metric.
    Prefix,
}

// ---------------------------------------------------------------------------
// Edit-distance cache
// ---------------------------------------------------------------------------

/// Memoised Levenshtein distances keyed by the unordered word pair.
///
/// Entries are pure functions of their key, so concurrent callers only need
/// insert-if-absent semantics; the map is never evicted.
pub struct EditDistanceCache {
    distances: DashMap<(Box<str>, Box<str>), usize>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for EditDistanceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditDistanceCache")
            .field("entries", &self.distances.len())
            .field("hits", &self.hits())
            .field("misses", &self.misses())
            .finish()
    }
}

impl Default for EditDistanceCache {
    fn default() -> Self {
        Self::new()
    }
}

impl EditDistanceCache {
    pub fn new() -> Self {
        Self {
            distances: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Return the cached distance between `a` and `b`, computing and storing
    /// it on first use.
    pub fn get_or_compute(&self, a: &str, b: &str) -> usize {
        let key = pair_key(a, b);
        if let Some(distance) = self.distances.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return *distance;
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let distance = levenshtein(a, b);
        *self.distances.entry(key).or_insert(distance)
    }

    /// Number of distinct word pairs stored.
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

/// Levenshtein distance is symmetric, so `(a, b)` and `(b, a)` share a slot.
fn pair_key(a: &str, b: &str) -> (Box<str>, Box<str>) {
    if a <= b {
        (a.into(), b.into())
    } else {
        (b.into(), a.into())
    }
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// Unit-cost Levenshtein distance over `char`s, two-row formulation.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current: Vec<usize> = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// Fraction of `vocab_word` covered by `query_word` when the latter occurs in
/// it verbatim; `0.0` otherwise or when the query word is shorter than
/// [`MIN_SUBSTRING_LEN`] (unless the prefix policy lets a single leading
/// character through).
pub fn substring_similarity(vocab_word: &str, query_word: &str, policy: SingleCharPolicy) -> f64 {
    let vocab_len = vocab_word.chars().count();
    if vocab_len == 0 {
        return 0.0;
    }
    let query_len = query_word.chars().count();

    let contained = if query_len >= MIN_SUBSTRING_LEN {
        vocab_word.contains(query_word)
    } else {
        query_len == 1 && policy == SingleCharPolicy::Prefix && vocab_word.starts_with(query_word)
    };

    if contained {
        query_len as f64 / vocab_len as f64
    } else {
        0.0
    }
}

/// Closeness derived from a known edit distance.
pub fn edit_distance_similarity(vocab_len: usize, distance: usize) -> f64 {
    if vocab_len == 0 {
        return 0.0;
    }
    (1.0 - (distance as f64 * 2.0 / vocab_len as f64)).max(0.0)
}

/// Score how well `query_word` matches `vocab_word`, in `[0, 1]`.
pub fn similarity(
    vocab_word: &str,
    query_word: &str,
    cache: &EditDistanceCache,
    policy: SingleCharPolicy,
) -> f64 {
    let vocab_len = vocab_word.chars().count();
    if vocab_len == 0 {
        return 0.0;
    }
    let substring = substring_similarity(vocab_word, query_word, policy);
    if substring >= 1.0 {
        return 1.0;
    }
    let distance = cache.get_or_compute(vocab_word, query_word);
    substring.max(edit_distance_similarity(vocab_len, distance))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    const EPS: f64 = 1e-9;

    fn sim(vocab: &str, query: &str) -> f64 {
        similarity(vocab, query, &EditDistanceCache::new(), SingleCharPolicy::Fuzzy)
    }

    #[rstest]
    #[case("", "", 0)]
    #[case("", "abc", 3)]
    #[case("abc", "", 3)]
    #[case("kitten", "sitting", 3)]
    #[case("aids", "aidz", 1)]
    #[case("brain", "brin", 1)]
    #[case("cancer", "canc", 2)]
    #[case("naïve", "naive", 1)]
    fn levenshtein_distances(#[case] a: &str, #[case] b: &str, #[case] expected: usize) {
        assert_eq!(levenshtein(a, b), expected);
        assert_eq!(levenshtein(b, a), expected);
    }

    #[rstest]
    #[case::fragment("cancer", "canc", 4.0 / 6.0)]
    #[case::typo("aids", "aidz", 0.5)]
    #[case::typo_in_short_word("brain", "brin", 0.6)]
    #[case::unrelated("aids", "canc", 0.0)]
    #[case::identical("fatigue", "fatigue", 1.0)]
    #[case::single_char_guarded("aids", "a", 0.0)]
    fn similarity_scores(#[case] vocab: &str, #[case] query: &str, #[case] expected: f64) {
        let score = sim(vocab, query);
        assert!((score - expected).abs() < EPS, "{vocab}/{query}: {score} != {expected}");
    }

    #[test]
    fn empty_vocab_word_scores_zero() {
        assert_eq!(sim("", "anything"), 0.0);
        assert_eq!(sim("", ""), 0.0);
    }

    #[test]
    fn prefix_policy_relaxes_guard_for_leading_char_only() {
        let cache = EditDistanceCache::new();
        let leading = similarity("aids", "a", &cache, SingleCharPolicy::Prefix);
        assert!((leading - 0.25).abs() < EPS);
        let inner = similarity("aids", "d", &cache, SingleCharPolicy::Prefix);
        assert_eq!(inner, 0.0);
    }

    #[test]
    fn cache_shares_slot_for_swapped_pair() {
        let cache = EditDistanceCache::new();
        assert_eq!(cache.get_or_compute("aids", "aidz"), 1);
        assert_eq!(cache.get_or_compute("aidz", "aids"), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn exact_substring_skips_distance_lookup() {
        let cache = EditDistanceCache::new();
        assert_eq!(similarity("cfs", "cfs", &cache, SingleCharPolicy::Fuzzy), 1.0);
        assert!(cache.is_empty());
    }

    proptest! {
        #[test]
        fn similarity_is_bounded(a in "[a-z]{0,12}", b in "[a-z]{0,12}") {
            let s = sim(&a, &b);
            prop_assert!((0.0..=1.0).contains(&s), "{a}/{b}: {s}");
        }

        #[test]
        fn self_similarity_is_one(a in "[a-z]{1,12}") {
            prop_assert_eq!(sim(&a, &a), 1.0);
        }

        #[test]
        fn cached_distance_matches_direct(a in "[a-z]{0,8}", b in "[a-z]{0,8}") {
            let cache = EditDistanceCache::new();
            prop_assert_eq!(cache.get_or_compute(&a, &b), levenshtein(&a, &b));
            prop_assert_eq!(cache.get_or_compute(&b, &a), levenshtein(&a, &b));
        }
    }
}
