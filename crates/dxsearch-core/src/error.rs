//! Error types for the loaders that sit at the edge of the engine.
//!
//! Searching itself cannot fail; only reading a vocabulary from disk can.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    #[error("failed to read vocabulary file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
