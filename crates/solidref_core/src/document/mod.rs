//! Source documents and Markdown parsing.
//!
//! # Responsibility
//! - Read raw Markdown documents from embedded or on-disk sources.
//! - Turn one document into principle, example and citation records.
//!
//! # Invariants
//! - Sources are read once; nothing here is cached between loads.
//! - Every parse failure carries the document variant and 1-based line.

use crate::catalog::BuildError;
use crate::model::citation::DocumentVariant;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod markdown;
pub mod source;

pub use markdown::{parse_document, ParseError, ParseErrorReason, ParsedDocument};
pub use source::{CorpusSource, DirectorySource, EmbeddedSource};

pub type LoadResult<T> = Result<T, LoadError>;

/// One raw Markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub variant: DocumentVariant,
    /// File path or `embedded:<name>`, for diagnostics only.
    pub origin: String,
    pub text: String,
}

/// Failure while reading, parsing or assembling a corpus.
#[derive(Debug)]
pub enum LoadError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    InvalidPath(String),
    NoDocuments(String),
    DuplicateVariant(DocumentVariant),
    Parse(ParseError),
    Build(BuildError),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read `{}`: {source}", path.display()),
            Self::InvalidPath(message) => write!(f, "invalid corpus path: {message}"),
            Self::NoDocuments(origin) => write!(f, "no markdown documents found in {origin}"),
            Self::DuplicateVariant(variant) => {
                write!(f, "document variant `{variant}` is provided twice")
            }
            Self::Parse(err) => write!(f, "{err}"),
            Self::Build(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Build(err) => Some(err),
            Self::InvalidPath(_) | Self::NoDocuments(_) | Self::DuplicateVariant(_) => None,
        }
    }
}

impl From<ParseError> for LoadError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<BuildError> for LoadError {
    fn from(value: BuildError) -> Self {
        Self::Build(value)
    }
}
