//! Citation and document variant model.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Variant of the primary document (`README.md`).
pub const DEFAULT_VARIANT: &str = "readme";

/// Stable identifier of one source document.
///
/// Derived from the file name: lowercase, extension dropped, `.`/`_`/spaces
/// folded to `-` (`README.extended.md` -> `readme-extended`).
///
/// Deserialization goes through [`DocumentVariant::new`], so a decoded id is
/// always normalized.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentVariant(String);

impl DocumentVariant {
    /// Builds a variant id from an arbitrary label.
    ///
    /// Returns `None` when nothing usable remains after normalization.
    pub fn new(label: &str) -> Option<Self> {
        let mut normalized = String::with_capacity(label.len());
        for c in label.trim().chars() {
            if c.is_ascii_alphanumeric() {
                normalized.push(c.to_ascii_lowercase());
            } else if matches!(c, '.' | '_' | '-' | ' ') && !normalized.ends_with('-') {
                normalized.push('-');
            }
        }
        let normalized = normalized.trim_matches('-');
        if normalized.is_empty() {
            return None;
        }
        Some(Self(normalized.to_string()))
    }

    /// Builds a variant id from a Markdown file path.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DocumentVariant {
    fn default() -> Self {
        Self(DEFAULT_VARIANT.to_string())
    }
}

impl TryFrom<String> for DocumentVariant {
    type Error = InvalidVariantError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or(InvalidVariantError(value))
    }
}

impl From<DocumentVariant> for String {
    fn from(value: DocumentVariant) -> Self {
        value.0
    }
}

/// Label with nothing usable left after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidVariantError(pub String);

impl Display for InvalidVariantError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "document variant is invalid: `{}`", self.0)
    }
}

impl Error for InvalidVariantError {}

impl Display for DocumentVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Numbered reference to an external source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub marker: u32,
    pub url: String,
    pub variant: DocumentVariant,
}

/// Accepts absolute `http`/`https` URLs with a non-empty host part.
pub fn is_valid_citation_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(rest) => {
            let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
            !host.is_empty() && !url.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
