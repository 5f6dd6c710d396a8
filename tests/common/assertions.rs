//! Domain-specific assertion macros for dxsearch harnesses.
//!
//! These wrap `pretty_assertions` so a failing ranking shows a readable diff
//! of display names instead of a wall of `VocabularyEntry` debug output.

/// Assert that a result list has exactly these display names, in order.
///
/// ```rust
/// assert_ranked!(engine.search("cfs"), ["chronic fatigue syndrome (CFS)"]);
/// ```
#[macro_export]
macro_rules! assert_ranked {
    ($results:expr, [$($name:expr),* $(,)?]) => {{
        let actual: Vec<&str> = $results
            .iter()
            .map(|entry| entry.display_text())
            .collect();
        let expected: Vec<&str> = vec![$($name),*];
        pretty_assertions::assert_eq!(actual, expected, "ranking mismatch");
    }};
}

/// Assert that no entry appears twice in a result list.
#[macro_export]
macro_rules! assert_no_duplicates {
    ($results:expr) => {{
        let mut seen = std::collections::HashSet::new();
        for entry in $results.iter() {
            if !seen.insert(entry.display_text()) {
                panic!(
                    "assert_no_duplicates! failed: {:?} returned more than once",
                    entry.display_text()
                );
            }
        }
    }};
}

/// Assert that every entry of a result list belongs to the vocabulary.
#[macro_export]
macro_rules! assert_subset_of {
    ($results:expr, $vocabulary:expr) => {{
        let vocabulary: &dxsearch_core::Vocabulary = &$vocabulary;
        for entry in $results.iter() {
            if !vocabulary.iter().any(|v| v == *entry) {
                panic!(
                    "assert_subset_of! failed: {:?} is not in the vocabulary",
                    entry.display_text()
                );
            }
        }
    }};
}
