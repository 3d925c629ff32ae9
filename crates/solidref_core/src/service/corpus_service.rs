//! Corpus assembly and query service.
//!
//! # Responsibility
//! - Build catalog, example store and citation index from a source once.
//! - Offer every read query through one entry point for CLI/renderer callers.
//!
//! # Invariants
//! - The first document defining a principle owns its record and examples.
//! - Citations are taken from every document variant.
//! - The search index is built at most once per service, on first use.

use crate::catalog::citation_index::CitationIndex;
use crate::catalog::example_store::ExampleStore;
use crate::catalog::principle_catalog::PrincipleCatalog;
use crate::catalog::{LookupResult, NotFoundError};
use crate::config::CorpusConfig;
use crate::db::open_index_in_memory;
use crate::document::{parse_document, CorpusSource, LoadError, LoadResult, SourceDocument};
use crate::model::citation::{Citation, DocumentVariant};
use crate::model::example::{Example, ExampleKind};
use crate::model::principle::{Principle, PrincipleId};
use crate::search::fts::{index_corpus, search_corpus, SearchHit, SearchQuery, SearchResult};
use log::{debug, error, info};
use once_cell::unsync::OnceCell;
use rusqlite::Connection;
use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

/// Fully assembled, read-only corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    catalog: PrincipleCatalog,
    examples: ExampleStore,
    citations: CitationIndex,
    titles: BTreeMap<DocumentVariant, String>,
}

impl Corpus {
    /// Loads and assembles a corpus from a source.
    ///
    /// # Side effects
    /// - Emits `corpus_load` logging events with counts and duration.
    pub fn load<S: CorpusSource + ?Sized>(source: &S) -> LoadResult<Self> {
        let started_at = Instant::now();
        let origin = source.describe();
        info!("event=corpus_load module=service status=start source={origin}");

        match source.load_documents().and_then(Self::from_documents) {
            Ok(corpus) => {
                info!(
                    "event=corpus_load module=service status=ok source={} duration_ms={} variants={} examples={} citations={}",
                    origin,
                    started_at.elapsed().as_millis(),
                    corpus.citations.variants().len(),
                    corpus.examples.len(),
                    corpus.citations.len()
                );
                Ok(corpus)
            }
            Err(err) => {
                error!(
                    "event=corpus_load module=service status=error source={} duration_ms={} error={}",
                    origin,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Assembles a corpus from already-read documents, in the given order.
    ///
    /// # Errors
    /// - `DuplicateVariant` when two documents map to one variant id.
    /// - `Parse` for structurally broken documents.
    /// - `Build` when a principle is missing or a citation is invalid.
    pub fn from_documents(documents: Vec<SourceDocument>) -> LoadResult<Self> {
        let mut seen_variants = BTreeSet::new();
        let mut owners: BTreeMap<PrincipleId, DocumentVariant> = BTreeMap::new();
        let mut principles = Vec::new();
        let mut examples = Vec::new();
        let mut citations = CitationIndex::new();
        let mut titles = BTreeMap::new();

        for document in &documents {
            if !seen_variants.insert(document.variant.clone()) {
                return Err(LoadError::DuplicateVariant(document.variant.clone()));
            }

            let parsed = parse_document(document)?;
            debug!(
                "event=document_parse module=service status=ok variant={} origin={} principles={} examples={} citations={}",
                parsed.variant,
                document.origin,
                parsed.principles.len(),
                parsed.examples.len(),
                parsed.citations.len()
            );

            let mut claimed = BTreeSet::new();
            for principle in parsed.principles {
                if let Some(owner) = owners.get(&principle.id) {
                    debug!(
                        "event=document_merge module=service status=skip variant={} principle={} owner={}",
                        parsed.variant, principle.id, owner
                    );
                    continue;
                }
                owners.insert(principle.id, parsed.variant.clone());
                claimed.insert(principle.id);
                principles.push(principle);
            }
            examples.extend(
                parsed
                    .examples
                    .into_iter()
                    .filter(|example| claimed.contains(&example.principle)),
            );

            citations.register_variant(parsed.variant.clone());
            for citation in parsed.citations {
                citations.insert(citation)?;
            }
            if let Some(title) = parsed.title {
                titles.insert(parsed.variant, title);
            }
        }

        let catalog = PrincipleCatalog::from_principles(principles)?;
        let examples = ExampleStore::build(&catalog, examples);
        Ok(Self {
            catalog,
            examples,
            citations,
            titles,
        })
    }

    pub fn catalog(&self) -> &PrincipleCatalog {
        &self.catalog
    }

    pub fn examples(&self) -> &ExampleStore {
        &self.examples
    }

    pub fn citations(&self) -> &CitationIndex {
        &self.citations
    }

    /// First-level heading of a variant's document, if it has one.
    pub fn title(&self, variant: &str) -> Option<&str> {
        DocumentVariant::new(variant)
            .and_then(|key| self.titles.get(&key))
            .map(String::as_str)
    }
}

/// Query facade over one loaded corpus.
pub struct CorpusService {
    corpus: Corpus,
    default_variant: DocumentVariant,
    search_limit: u32,
    index: OnceCell<Connection>,
}

impl CorpusService {
    /// Wraps a corpus using default configuration values.
    pub fn new(corpus: Corpus) -> Self {
        Self::with_config(corpus, &CorpusConfig::default())
    }

    pub fn with_config(corpus: Corpus, config: &CorpusConfig) -> Self {
        Self {
            corpus,
            default_variant: config.default_variant.clone(),
            search_limit: config.search_limit,
            index: OnceCell::new(),
        }
    }

    /// Loads the configured source and wraps the result.
    pub fn from_config(config: &CorpusConfig) -> LoadResult<Self> {
        let source = config.corpus_source()?;
        let corpus = Corpus::load(source.as_ref())?;
        Ok(Self::with_config(corpus, config))
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn default_variant(&self) -> &DocumentVariant {
        &self.default_variant
    }

    pub fn lookup(&self, identifier: &str) -> LookupResult<&Principle> {
        self.corpus.catalog.lookup(identifier)
    }

    pub fn all(&self) -> &[Principle] {
        self.corpus.catalog.all()
    }

    pub fn examples_for(&self, principle_id: &str) -> LookupResult<&[Example]> {
        self.corpus.examples.examples_for(principle_id)
    }

    pub fn examples_of_kind(
        &self,
        principle_id: &str,
        kind: ExampleKind,
    ) -> LookupResult<Vec<&Example>> {
        self.corpus.examples.examples_of_kind(principle_id, kind)
    }

    pub fn resolve(&self, marker: u32, variant: &str) -> LookupResult<&str> {
        self.corpus.citations.resolve(marker, variant)
    }

    /// Resolves a marker in the configured default variant.
    pub fn resolve_default(&self, marker: u32) -> LookupResult<&str> {
        self.resolve(marker, self.default_variant.as_str())
    }

    pub fn variants(&self) -> Vec<&DocumentVariant> {
        self.corpus.citations.variants()
    }

    /// Citations referenced by a principle and its examples, in marker order.
    ///
    /// Markers the variant does not list are skipped; an unknown principle or
    /// variant is an error.
    pub fn citations_for(
        &self,
        principle_id: &str,
        variant: &str,
    ) -> LookupResult<Vec<&Citation>> {
        let principle = self.lookup(principle_id)?;
        if !self.corpus.citations.contains_variant(variant) {
            return Err(NotFoundError::variant(variant.trim()));
        }

        let mut markers = principle.citation_markers();
        for example in self.corpus.examples.examples_for_id(principle.id) {
            markers.extend(example.citation_markers());
        }

        Ok(markers
            .into_iter()
            .filter_map(|marker| self.corpus.citations.get(marker, variant).ok())
            .collect())
    }

    /// Runs a full-text query, building the index on first use.
    pub fn search(&self, query: &SearchQuery) -> SearchResult<Vec<SearchHit>> {
        let conn = self.search_index()?;
        search_corpus(conn, query)
    }

    /// Plain-text query with the configured result limit.
    pub fn search_text(&self, text: &str) -> SearchResult<Vec<SearchHit>> {
        let mut query = SearchQuery::new(text);
        query.limit = self.search_limit;
        self.search(&query)
    }

    fn search_index(&self) -> SearchResult<&Connection> {
        self.index.get_or_try_init(|| {
            let mut conn = open_index_in_memory()?;
            index_corpus(&mut conn, &self.corpus.catalog, &self.corpus.examples)?;
            Ok(conn)
        })
    }
}
