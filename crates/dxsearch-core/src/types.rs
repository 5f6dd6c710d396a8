//! Core types for dxsearch-core.
//!
//! This module defines the data shared by every stage of the engine: the
//! indexed [`VocabularyEntry`], the ordered [`Vocabulary`] that owns them, and
//! the per-call [`Query`] value.

use std::collections::HashSet;
use std::path::Path;

use crate::error::VocabularyError;
use crate::terms::extract_terms;

const BUILTIN_VOCABULARY: &str = include_str!("../data/diagnoses.txt");

/// One vocabulary item: the display name plus the searchable terms derived
/// from it at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyEntry {
    display_text: String,
    terms: Vec<String>,
}

impl VocabularyEntry {
    /// Index a display string. Terms are extracted once here and never change.
    pub fn new(display_text: impl Into<String>) -> Self {
        let display_text = display_text.into();
        let terms = extract_terms(&display_text);
        Self { display_text, terms }
    }

    /// The original, human-readable name.
    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    /// Lowercase searchable terms. Never empty.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

impl std::fmt::Display for VocabularyEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_text)
    }
}

/// Ordered, immutable collection of indexed entries.
///
/// Insertion order is preserved and only ever used as the tie-break between
/// equally scored entries. Duplicate display strings are kept once (first
/// occurrence wins) so a search can never return the same name twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    entries: Vec<VocabularyEntry>,
}

impl Vocabulary {
    pub fn new<I, S>(display_texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let entries: Vec<VocabularyEntry> = display_texts
            .into_iter()
            .map(|text| -> String { text.into() })
            .filter(|text| seen.insert(text.clone()))
            .map(VocabularyEntry::new)
            .collect();
        tracing::debug!(entries = entries.len(), "vocabulary indexed");
        Self { entries }
    }

    /// The diagnosis list embedded in the crate.
    pub fn builtin() -> Self {
        Self::parse(BUILTIN_VOCABULARY)
    }

    /// Parse the line format: one display name per line, surrounding
    /// whitespace trimmed, blank lines and `#` comments skipped.
    pub fn parse(src: &str) -> Self {
        Self::new(
            src.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Read and parse a vocabulary file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, VocabularyError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| VocabularyError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let vocabulary = Self::parse(&src);
        tracing::info!(path = %path.display(), entries = vocabulary.len(), "vocabulary loaded");
        Ok(vocabulary)
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VocabularyEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Vocabulary {
    type Item = &'a VocabularyEntry;
    type IntoIter = std::slice::Iter<'a, VocabularyEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A single search request, derived fresh from the raw input on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    raw: String,
    normalized: String,
    words: Vec<String>,
}

impl Query {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = raw.to_lowercase();
        let words = normalized.split_whitespace().map(str::to_string).collect();
        Self { raw, normalized, words }
    }

    /// The input exactly as typed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Lowercased input. Not trimmed: exact matching compares against it
    /// verbatim.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Non-empty whitespace-separated tokens of the normalized input.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// True when the normalized query is exactly one character long.
    pub fn is_single_char(&self) -> bool {
        let mut chars = self.normalized.chars();
        chars.next().is_some() && chars.next().is_none()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
