//! Runtime configuration for corpus loading and queries.
//!
//! # Responsibility
//! - Describe where the corpus comes from and query defaults.
//! - Validate caller-provided values before any I/O happens.
//!
//! # Invariants
//! - A directory source is always an absolute path.
//! - `default_variant` is a normalized `DocumentVariant`.

use crate::document::{CorpusSource, DirectorySource, EmbeddedSource, LoadResult};
use crate::model::citation::DocumentVariant;
use crate::search::fts::DEFAULT_SEARCH_LIMIT;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const MAX_SEARCH_LIMIT: u32 = 200;

/// Where corpus documents are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSelection {
    Embedded,
    Directory(PathBuf),
}

/// Validated corpus configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusConfig {
    pub source: SourceSelection,
    pub default_variant: DocumentVariant,
    pub search_limit: u32,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            source: SourceSelection::Embedded,
            default_variant: DocumentVariant::default(),
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

impl CorpusConfig {
    /// Builds a configuration from optional raw values.
    ///
    /// Missing values fall back to the embedded corpus, `readme` and the
    /// default search limit.
    ///
    /// # Errors
    /// - `corpus_dir` is blank or relative.
    /// - `variant` normalizes to nothing.
    /// - `search_limit` is zero or above the supported maximum.
    pub fn from_parts(
        corpus_dir: Option<&str>,
        variant: Option<&str>,
        search_limit: Option<u32>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(dir) = corpus_dir {
            config.source = SourceSelection::Directory(normalize_corpus_dir(dir)?);
        }
        if let Some(label) = variant {
            config.default_variant = DocumentVariant::new(label)
                .ok_or_else(|| ConfigError::InvalidVariant(label.to_string()))?;
        }
        if let Some(limit) = search_limit {
            if limit == 0 || limit > MAX_SEARCH_LIMIT {
                return Err(ConfigError::InvalidSearchLimit(limit));
            }
            config.search_limit = limit;
        }

        Ok(config)
    }

    /// Instantiates the configured corpus source.
    pub fn corpus_source(&self) -> LoadResult<Box<dyn CorpusSource>> {
        match &self.source {
            SourceSelection::Embedded => Ok(Box::new(EmbeddedSource)),
            SourceSelection::Directory(dir) => Ok(Box::new(DirectorySource::new(dir)?)),
        }
    }
}

fn normalize_corpus_dir(corpus_dir: &str) -> Result<PathBuf, ConfigError> {
    let trimmed = corpus_dir.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyCorpusDir);
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(ConfigError::RelativeCorpusDir(trimmed.to_string()));
    }
    Ok(path.to_path_buf())
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyCorpusDir,
    RelativeCorpusDir(String),
    InvalidVariant(String),
    InvalidSearchLimit(u32),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCorpusDir => write!(f, "corpus_dir cannot be empty"),
            Self::RelativeCorpusDir(value) => {
                write!(f, "corpus_dir must be an absolute path, got `{value}`")
            }
            Self::InvalidVariant(value) => write!(f, "document variant is invalid: `{value}`"),
            Self::InvalidSearchLimit(value) => write!(
                f,
                "search limit must be between 1 and {MAX_SEARCH_LIMIT}, got {value}"
            ),
        }
    }
}

impl Error for ConfigError {}
