//! Principle domain model.
//!
//! # Responsibility
//! - Define the five canonical SOLID identifiers and their fixed order.
//! - Define the principle record produced by document parsing.
//!
//! # Invariants
//! - `PrincipleId::ALL` order is SRP, OCP, LSP, ISP, DIP and never changes.
//! - A principle record has a non-empty name and definition.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

static CITATION_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(\d{1,6})\]").expect("citation marker regex is valid"));

/// Canonical SOLID principle identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrincipleId {
    /// Single Responsibility Principle.
    Srp,
    /// Open/Closed Principle.
    Ocp,
    /// Liskov Substitution Principle.
    Lsp,
    /// Interface Segregation Principle.
    Isp,
    /// Dependency Inversion Principle.
    Dip,
}

impl PrincipleId {
    /// All identifiers in catalog enumeration order.
    pub const ALL: [PrincipleId; 5] = [Self::Srp, Self::Ocp, Self::Lsp, Self::Isp, Self::Dip];

    /// Stable uppercase acronym.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Srp => "SRP",
            Self::Ocp => "OCP",
            Self::Lsp => "LSP",
            Self::Isp => "ISP",
            Self::Dip => "DIP",
        }
    }

    /// Zero-based position in `ALL`.
    pub fn ordinal(self) -> usize {
        match self {
            Self::Srp => 0,
            Self::Ocp => 1,
            Self::Lsp => 2,
            Self::Isp => 3,
            Self::Dip => 4,
        }
    }

    /// Parses an acronym, trimming whitespace and ignoring ASCII case.
    ///
    /// Full principle names are not accepted.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(normalized))
    }
}

impl Display for PrincipleId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One SOLID principle as described by a source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principle {
    pub id: PrincipleId,
    /// Display name, e.g. `Single Responsibility Principle`.
    pub name: String,
    pub definition: String,
    /// Empty when the document states no explicit goal.
    pub goal: String,
    /// Benefit statements in document order.
    pub benefits: Vec<String>,
}

impl Principle {
    /// Validates record-level invariants.
    pub fn validate(&self) -> Result<(), PrincipleValidationError> {
        if self.name.trim().is_empty() {
            return Err(PrincipleValidationError::EmptyName(self.id));
        }
        if self.definition.trim().is_empty() {
            return Err(PrincipleValidationError::EmptyDefinition(self.id));
        }
        if self.benefits.iter().any(|benefit| benefit.trim().is_empty()) {
            return Err(PrincipleValidationError::EmptyBenefit(self.id));
        }
        Ok(())
    }

    /// Citation markers (`[n]`) referenced anywhere in this record's text.
    pub fn citation_markers(&self) -> BTreeSet<u32> {
        let mut markers = citation_markers_in(&self.definition);
        markers.extend(citation_markers_in(&self.goal));
        for benefit in &self.benefits {
            markers.extend(citation_markers_in(benefit));
        }
        markers
    }
}

/// Extracts `[n]` citation markers from free text.
pub fn citation_markers_in(text: &str) -> BTreeSet<u32> {
    CITATION_MARKER_RE
        .captures_iter(text)
        .filter_map(|captures| captures[1].parse::<u32>().ok())
        .collect()
}

/// Principle record validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrincipleValidationError {
    EmptyName(PrincipleId),
    EmptyDefinition(PrincipleId),
    EmptyBenefit(PrincipleId),
}

impl Display for PrincipleValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName(id) => write!(f, "principle {id} has an empty name"),
            Self::EmptyDefinition(id) => write!(f, "principle {id} has no definition"),
            Self::EmptyBenefit(id) => write!(f, "principle {id} lists an empty benefit"),
        }
    }
}

impl Error for PrincipleValidationError {}
