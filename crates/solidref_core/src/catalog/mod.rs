//! Read-only lookup components built once from parsed documents.
//!
//! # Responsibility
//! - Hold principle, example and citation records behind typed queries.
//! - Report unknown keys through the single `NotFoundError` kind.
//!
//! # Invariants
//! - Components expose no mutation after construction.
//! - Example keys always exist in the principle catalog.

use crate::model::principle::{PrincipleId, PrincipleValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod citation_index;
pub mod example_store;
pub mod principle_catalog;

pub type LookupResult<T> = Result<T, NotFoundError>;

/// Kind of key a failed lookup was made with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupTarget {
    Principle,
    DocumentVariant,
    Citation,
}

impl LookupTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Principle => "principle",
            Self::DocumentVariant => "document variant",
            Self::Citation => "citation",
        }
    }
}

/// Raised when a lookup key does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFoundError {
    pub target: LookupTarget,
    pub key: String,
}

impl NotFoundError {
    pub fn principle(key: impl Into<String>) -> Self {
        Self {
            target: LookupTarget::Principle,
            key: key.into(),
        }
    }

    pub fn variant(key: impl Into<String>) -> Self {
        Self {
            target: LookupTarget::DocumentVariant,
            key: key.into(),
        }
    }

    pub fn citation(marker: u32, variant: &str) -> Self {
        Self {
            target: LookupTarget::Citation,
            key: format!("[{marker}] in {variant}"),
        }
    }
}

impl Display for NotFoundError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} not found: {}", self.target.as_str(), self.key)
    }
}

impl Error for NotFoundError {}

/// Invariant violations detected while assembling the components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    InvalidPrinciple(PrincipleValidationError),
    DuplicatePrinciple(PrincipleId),
    MissingPrinciple(PrincipleId),
    DuplicateCitation {
        variant: String,
        marker: u32,
    },
    InvalidCitationUrl {
        variant: String,
        marker: u32,
        url: String,
    },
}

impl Display for BuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPrinciple(err) => write!(f, "{err}"),
            Self::DuplicatePrinciple(id) => write!(f, "principle {id} is defined twice"),
            Self::MissingPrinciple(id) => write!(f, "principle {id} is not defined by any document"),
            Self::DuplicateCitation { variant, marker } => {
                write!(f, "citation [{marker}] is listed twice in {variant}")
            }
            Self::InvalidCitationUrl {
                variant,
                marker,
                url,
            } => write!(
                f,
                "citation [{marker}] in {variant} has invalid url `{url}` (expected http or https)"
            ),
        }
    }
}

impl Error for BuildError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidPrinciple(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PrincipleValidationError> for BuildError {
    fn from(value: PrincipleValidationError) -> Self {
        Self::InvalidPrinciple(value)
    }
}
