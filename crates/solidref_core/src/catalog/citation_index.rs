//! Citation marker index per document variant.
//!
//! # Invariants
//! - Markers are unique within a variant.
//! - Stored URLs pass `is_valid_citation_url`.

use crate::catalog::{BuildError, LookupResult, NotFoundError};
use crate::model::citation::{is_valid_citation_url, Citation, DocumentVariant};
use std::collections::BTreeMap;

/// Maps `(variant, marker)` to the cited URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitationIndex {
    variants: BTreeMap<DocumentVariant, BTreeMap<u32, Citation>>,
}

impl CitationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a variant with no citations yet.
    ///
    /// A document without a reference list is still a known variant.
    pub fn register_variant(&mut self, variant: DocumentVariant) {
        self.variants.entry(variant).or_default();
    }

    /// Inserts one citation, rejecting duplicate markers and non-http URLs.
    pub fn insert(&mut self, citation: Citation) -> Result<(), BuildError> {
        if !is_valid_citation_url(&citation.url) {
            return Err(BuildError::InvalidCitationUrl {
                variant: citation.variant.to_string(),
                marker: citation.marker,
                url: citation.url,
            });
        }

        let entries = self.variants.entry(citation.variant.clone()).or_default();
        if entries.contains_key(&citation.marker) {
            return Err(BuildError::DuplicateCitation {
                variant: citation.variant.to_string(),
                marker: citation.marker,
            });
        }
        entries.insert(citation.marker, citation);
        Ok(())
    }

    /// Resolves a marker in one variant to its URL.
    pub fn resolve(&self, marker: u32, variant: &str) -> LookupResult<&str> {
        self.get(marker, variant).map(|citation| citation.url.as_str())
    }

    pub fn get(&self, marker: u32, variant: &str) -> LookupResult<&Citation> {
        self.entries(variant)?
            .get(&marker)
            .ok_or_else(|| NotFoundError::citation(marker, variant.trim()))
    }

    /// Variant ids in sorted order.
    pub fn variants(&self) -> Vec<&DocumentVariant> {
        self.variants.keys().collect()
    }

    pub fn contains_variant(&self, variant: &str) -> bool {
        self.entries(variant).is_ok()
    }

    /// Citations of one variant ordered by marker.
    pub fn citations(&self, variant: &str) -> LookupResult<Vec<&Citation>> {
        Ok(self.entries(variant)?.values().collect())
    }

    /// Total citations across variants.
    pub fn len(&self) -> usize {
        self.variants.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries(&self, variant: &str) -> LookupResult<&BTreeMap<u32, Citation>> {
        DocumentVariant::new(variant)
            .and_then(|key| self.variants.get(&key))
            .ok_or_else(|| NotFoundError::variant(variant.trim()))
    }
}
