//! Violation/adherence example model.

use crate::model::principle::{citation_markers_in, PrincipleId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Whether an example breaks or follows its principle.
///
/// Variant order is the presentation order: violations come first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExampleKind {
    Violation,
    Adherence,
}

impl ExampleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Violation => "violation",
            Self::Adherence => "adherence",
        }
    }
}

/// Code snippet plus explanatory prose for one principle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// Owning principle.
    pub principle: PrincipleId,
    pub kind: ExampleKind,
    /// Fence info string (`java`, `python`, ...), when the document gives one.
    pub language: Option<String>,
    pub snippet: String,
    pub explanation: String,
}

impl Example {
    pub fn is_violation(&self) -> bool {
        self.kind == ExampleKind::Violation
    }

    /// Citation markers referenced by the explanation.
    pub fn citation_markers(&self) -> BTreeSet<u32> {
        citation_markers_in(&self.explanation)
    }
}
