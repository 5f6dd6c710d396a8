//! Configuration types for dxsearch.
//!
//! [`Config::load`] reads `~/.config/dxsearch/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::similarity::SingleCharPolicy;
use crate::types::Vocabulary;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[search]
single_char = "fuzzy"
max_results = 50

[vocabulary]
# path = "/path/to/diagnoses.txt"

[ui]
hint_text   = "Search for a diagnosis ..."
show_scores = false
theme       = "default"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/dxsearch/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub vocabulary: VocabularyConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[search]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// How one-character queries are scored.
    #[serde(default)]
    pub single_char: SingleCharPolicy,
    /// Front ends show at most this many results; `0` means no limit.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_max_results() -> usize { 50 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            single_char: SingleCharPolicy::default(),
            max_results: default_max_results(),
        }
    }
}

impl SearchConfig {
    /// Truncate a ranked list to `max_results`.
    pub fn limit<T>(&self, mut results: Vec<T>) -> Vec<T> {
        if self.max_results > 0 {
            results.truncate(self.max_results);
        }
        results
    }
}

/// `[vocabulary]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VocabularyConfig {
    /// Vocabulary file to load instead of the built-in list.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl VocabularyConfig {
    /// Load the configured file, or the built-in list when none is set.
    pub fn resolve(&self) -> anyhow::Result<Vocabulary> {
        match &self.path {
            Some(path) => Ok(Vocabulary::load(path)?),
            None => Ok(Vocabulary::builtin()),
        }
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_hint_text")]
    pub hint_text: String,
    #[serde(default)]
    pub show_scores: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_hint_text() -> String { "Search for a diagnosis ...".to_string() }
fn default_theme() -> String { "default".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            hint_text: default_hint_text(),
            show_scores: false,
            theme: default_theme(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/dxsearch/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
            tracing::info!(path = %path.display(), "wrote default config");
        }

        Self::load_from(&path)
    }

    /// Layer the file at `path` (if present) over the built-in defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("dxsearch")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
