//! Example store keyed by principle.
//!
//! # Invariants
//! - Per principle, violations precede adherences.
//! - Within one kind, document order is kept.

use crate::catalog::principle_catalog::PrincipleCatalog;
use crate::catalog::{LookupResult, NotFoundError};
use crate::model::example::{Example, ExampleKind};
use crate::model::principle::PrincipleId;
use std::collections::BTreeMap;

/// Violation/adherence snippets per principle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleStore {
    by_principle: BTreeMap<PrincipleId, Vec<Example>>,
}

impl ExampleStore {
    /// Groups examples by owning principle.
    ///
    /// Every catalog principle gets an entry, possibly empty.
    pub fn build(catalog: &PrincipleCatalog, examples: impl IntoIterator<Item = Example>) -> Self {
        let mut by_principle: BTreeMap<PrincipleId, Vec<Example>> = catalog
            .all()
            .iter()
            .map(|principle| (principle.id, Vec::new()))
            .collect();

        for example in examples {
            by_principle
                .entry(example.principle)
                .or_default()
                .push(example);
        }
        for examples in by_principle.values_mut() {
            // Stable sort keeps document order inside each kind.
            examples.sort_by_key(|example| example.kind);
        }

        Self { by_principle }
    }

    /// Examples for an acronym, violations first.
    pub fn examples_for(&self, principle_id: &str) -> LookupResult<&[Example]> {
        let id = PrincipleId::parse(principle_id)
            .ok_or_else(|| NotFoundError::principle(principle_id.trim()))?;
        Ok(self.examples_for_id(id))
    }

    pub fn examples_for_id(&self, id: PrincipleId) -> &[Example] {
        self.by_principle
            .get(&id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Examples of one kind, in document order.
    pub fn examples_of_kind(
        &self,
        principle_id: &str,
        kind: ExampleKind,
    ) -> LookupResult<Vec<&Example>> {
        Ok(self
            .examples_for(principle_id)?
            .iter()
            .filter(|example| example.kind == kind)
            .collect())
    }

    /// Total number of stored examples.
    pub fn len(&self) -> usize {
        self.by_principle.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
