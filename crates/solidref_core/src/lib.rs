//! Core domain logic for the SOLID reference corpus.
//! This crate is the single source of truth for lookup and load invariants.

pub mod catalog;
pub mod config;
pub mod db;
pub mod document;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;

pub use catalog::citation_index::CitationIndex;
pub use catalog::example_store::ExampleStore;
pub use catalog::principle_catalog::PrincipleCatalog;
pub use catalog::{BuildError, LookupResult, LookupTarget, NotFoundError};
pub use config::{ConfigError, CorpusConfig, SourceSelection};
pub use document::{
    parse_document, CorpusSource, DirectorySource, EmbeddedSource, LoadError, LoadResult,
    ParseError, ParseErrorReason, ParsedDocument, SourceDocument,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::citation::{Citation, DocumentVariant, InvalidVariantError};
pub use model::example::{Example, ExampleKind};
pub use model::principle::{Principle, PrincipleId, PrincipleValidationError};
pub use search::fts::{HitKind, SearchError, SearchHit, SearchQuery, SearchResult};
pub use service::corpus_service::{Corpus, CorpusService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
