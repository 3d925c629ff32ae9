//! Principle catalog.
//!
//! # Responsibility
//! - Own the five principle records in canonical order.
//! - Resolve user-supplied identifiers to records.
//!
//! # Invariants
//! - Exactly one record per `PrincipleId`, stored at `id.ordinal()`.
//! - `all()` is stable across calls.

use crate::catalog::{BuildError, LookupResult, NotFoundError};
use crate::model::principle::{Principle, PrincipleId};

/// Immutable collection of the five SOLID principles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipleCatalog {
    principles: Vec<Principle>,
}

impl PrincipleCatalog {
    /// Builds a complete catalog from records in any order.
    ///
    /// # Errors
    /// - `InvalidPrinciple` when a record fails `Principle::validate()`.
    /// - `DuplicatePrinciple` when one id appears twice.
    /// - `MissingPrinciple` for the first id without a record.
    pub fn from_principles(
        principles: impl IntoIterator<Item = Principle>,
    ) -> Result<Self, BuildError> {
        let mut slots: [Option<Principle>; 5] = Default::default();
        for principle in principles {
            principle.validate()?;
            let slot = &mut slots[principle.id.ordinal()];
            if slot.is_some() {
                return Err(BuildError::DuplicatePrinciple(principle.id));
            }
            *slot = Some(principle);
        }

        let mut ordered = Vec::with_capacity(PrincipleId::ALL.len());
        for (id, slot) in PrincipleId::ALL.into_iter().zip(slots) {
            ordered.push(slot.ok_or(BuildError::MissingPrinciple(id))?);
        }

        Ok(Self {
            principles: ordered,
        })
    }

    /// Looks up a principle by acronym (`SRP`, `ocp`, ...).
    pub fn lookup(&self, identifier: &str) -> LookupResult<&Principle> {
        PrincipleId::parse(identifier)
            .map(|id| self.get(id))
            .ok_or_else(|| NotFoundError::principle(identifier.trim()))
    }

    pub fn get(&self, id: PrincipleId) -> &Principle {
        &self.principles[id.ordinal()]
    }

    /// All principles in SRP, OCP, LSP, ISP, DIP order.
    pub fn all(&self) -> &[Principle] {
        &self.principles
    }

    pub fn len(&self) -> usize {
        self.principles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.principles.is_empty()
    }
}
