//! Static vocabularies used across harnesses.

use dxsearch_core::{QueryEngine, Vocabulary, VocabularyEntry};

/// The three-entry vocabulary from the worked search examples.
pub const SCENARIO: &[&str] = &["AIDS", "chronic fatigue syndrome (CFS)", "cancer"];

/// A slightly larger vocabulary with several overlapping "cancer" entries,
/// useful for checking tie-breaking and tier precedence.
pub const CANCERS: &[&str] = &[
    "AIDS",
    "chronic fatigue syndrome (CFS)",
    "cancer",
    "brain cancer",
    "lung cancer",
    "skin cancer (melanoma)",
];

/// Queries that exercise every branch of the engine against [`CANCERS`].
pub const QUERIES: &[&str] = &[
    "",
    " ",
    "c",
    "cf",
    "cfs",
    "canc",
    "cancer",
    "brain canc",
    "aidz",
    "melanoma",
    "CANCER",
    "zzzz",
];

pub fn scenario_vocabulary() -> Vocabulary {
    Vocabulary::new(SCENARIO.iter().copied())
}

pub fn cancer_vocabulary() -> Vocabulary {
    Vocabulary::new(CANCERS.iter().copied())
}

pub fn cancer_engine() -> QueryEngine {
    QueryEngine::new(cancer_vocabulary())
}

/// Display texts of `entries`, in order.
pub fn names<'a>(entries: impl IntoIterator<Item = &'a VocabularyEntry>) -> Vec<&'a str> {
    entries.into_iter().map(VocabularyEntry::display_text).collect()
}
