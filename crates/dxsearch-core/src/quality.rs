//! Match quality: folds word-level similarity up to a single entry score.
//!
//! ```text
//! word  quality = max over query words of similarity(vocab word, query word)
//! term  quality = mean over the term's words of word quality
//! entry quality = max over the entry's terms of term quality
//! ```
//!
//! With the query `"brain can"`, the term `"brain cancer"` scores
//! `(1.0 + 0.5) / 2 = 0.75`: "brain" matches perfectly and "can" covers half
//! of "cancer".
//!
//! Exact matching is a separate yes/no check: some term equals the normalized
//! query, or contains it as one of its own words.

use crate::similarity::{similarity, EditDistanceCache, SingleCharPolicy};
use crate::types::{Query, VocabularyEntry};

/// Scores entries against a query using a shared edit-distance cache.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    cache: &'a EditDistanceCache,
    policy: SingleCharPolicy,
}

/// Best quality of an entry together with the term that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryScore<'e> {
    pub quality: f64,
    pub best_term: &'e str,
}

impl<'a> Scorer<'a> {
    pub fn new(cache: &'a EditDistanceCache, policy: SingleCharPolicy) -> Self {
        Self { cache, policy }
    }

    /// How closely `vocab_word` comes to any word of the query.
    pub fn word_quality(&self, vocab_word: &str, query: &Query) -> f64 {
        query
            .words()
            .iter()
            .map(|query_word| similarity(vocab_word, query_word, self.cache, self.policy))
            .fold(0.0, f64::max)
    }

    /// Mean word quality over the words of `term`; `0.0` for a term with no
    /// words.
    pub fn term_quality(&self, term: &str, query: &Query) -> f64 {
        let (sum, count) = term
            .split_whitespace()
            .map(|word| self.word_quality(word, query))
            .fold((0.0, 0usize), |(sum, count), q| (sum + q, count + 1));
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }

    /// The entry's best term quality. Ties keep the earliest term.
    pub fn entry_score<'e>(&self, entry: &'e VocabularyEntry, query: &Query) -> EntryScore<'e> {
        let mut best = EntryScore {
            quality: 0.0,
            best_term: entry.terms().first().map(String::as_str).unwrap_or(""),
        };
        for term in entry.terms() {
            let quality = self.term_quality(term, query);
            if quality > best.quality {
                best = EntryScore { quality, best_term: term };
            }
        }
        best
    }

    /// How well `entry` matches `query`, in `[0, 1]`.
    pub fn match_quality(&self, entry: &VocabularyEntry, query: &Query) -> f64 {
        self.entry_score(entry, query).quality
    }
}

/// Does some term of `entry` equal the normalized query, or contain it as a
/// whole word?
pub fn is_exact_match(entry: &VocabularyEntry, query: &Query) -> bool {
    let needle = query.normalized();
    entry
        .terms()
        .iter()
        .any(|term| term == needle || term.split(' ').any(|word| word == needle))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EPS: f64 = 1e-9;

    fn approx(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < EPS, "{actual} != {expected}");
    }

    #[test]
    fn word_quality_takes_best_query_word() {
        let cache = EditDistanceCache::new();
        let scorer = Scorer::new(&cache, SingleCharPolicy::Fuzzy);
        let q = Query::new("brain can");
        approx(scorer.word_quality("brain", &q), 1.0);
        approx(scorer.word_quality("cancer", &q), 0.5);
        approx(scorer.word_quality("aids", &q), 0.0);
    }

    #[test]
    fn term_quality_is_mean_over_term_words() {
        let cache = EditDistanceCache::new();
        let scorer = Scorer::new(&cache, SingleCharPolicy::Fuzzy);
        approx(scorer.term_quality("brain cancer", &Query::new("brain can")), 0.75);
    }

    #[test]
    fn entry_quality_is_best_term() {
        let cache = EditDistanceCache::new();
        let scorer = Scorer::new(&cache, SingleCharPolicy::Fuzzy);
        let entry = VocabularyEntry::new("chronic fatigue syndrome (CFS)");
        let score = scorer.entry_score(&entry, &Query::new("cfs"));
        approx(score.quality, 1.0);
        assert_eq!(score.best_term, "cfs");
    }

    #[test]
    fn query_without_words_scores_zero() {
        let cache = EditDistanceCache::new();
        let scorer = Scorer::new(&cache, SingleCharPolicy::Fuzzy);
        let entry = VocabularyEntry::new("cancer");
        approx(scorer.match_quality(&entry, &Query::new("   ")), 0.0);
    }

    #[test]
    fn zero_score_reports_first_term() {
        let cache = EditDistanceCache::new();
        let scorer = Scorer::new(&cache, SingleCharPolicy::Fuzzy);
        let entry = VocabularyEntry::new("HPV (human papilloma virus)");
        let score = scorer.entry_score(&entry, &Query::new("zzzz"));
        assert_eq!(score.quality, 0.0);
        assert_eq!(score.best_term, "hpv");
    }

    #[rstest]
    #[case::whole_term("cancer", "Cancer", true)]
    #[case::synonym("chronic fatigue syndrome (CFS)", "cfs", true)]
    #[case::word_of_term("brain cancer", "cancer", true)]
    #[case::multi_word_term("chronic fatigue syndrome (CFS)", "fatigue syndrome", false)]
    #[case::fragment("cancer", "canc", false)]
    #[case::trailing_space("cancer", "cancer ", false)]
    #[case::empty_query("cancer", "", false)]
    fn exact_match_detection(#[case] display: &str, #[case] raw: &str, #[case] expected: bool) {
        let entry = VocabularyEntry::new(display);
        assert_eq!(is_exact_match(&entry, &Query::new(raw)), expected);
    }
}
