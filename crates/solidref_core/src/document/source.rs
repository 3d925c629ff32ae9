//! Corpus sources.
//!
//! # Responsibility
//! - Provide raw documents to the loader behind one trait.
//! - Ship a default corpus compiled into the library.
//!
//! # Invariants
//! - Documents are returned in a deterministic order.
//! - Directory sources only read `*.md` files directly inside the directory.

use crate::document::{LoadError, LoadResult, SourceDocument};
use crate::model::citation::DocumentVariant;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Provider of raw Markdown documents.
pub trait CorpusSource {
    /// Short description used in logs and errors.
    fn describe(&self) -> String;
    fn load_documents(&self) -> LoadResult<Vec<SourceDocument>>;
}

const EMBEDDED_DOCUMENTS: &[(&str, &str)] = &[
    ("README.md", include_str!("../../corpus/README.md")),
    ("README_v2.md", include_str!("../../corpus/README_v2.md")),
];

/// Documents compiled into the library.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl EmbeddedSource {
    /// File names of the embedded documents, in load order.
    pub fn document_names() -> Vec<&'static str> {
        EMBEDDED_DOCUMENTS.iter().map(|(name, _)| *name).collect()
    }
}

impl CorpusSource for EmbeddedSource {
    fn describe(&self) -> String {
        "embedded corpus".to_string()
    }

    fn load_documents(&self) -> LoadResult<Vec<SourceDocument>> {
        EMBEDDED_DOCUMENTS
            .iter()
            .map(|(name, text)| {
                let variant = DocumentVariant::from_path(Path::new(name))
                    .ok_or_else(|| LoadError::InvalidPath(format!("embedded:{name}")))?;
                Ok(SourceDocument {
                    variant,
                    origin: format!("embedded:{name}"),
                    text: (*text).to_string(),
                })
            })
            .collect()
    }
}

/// Every `*.md` file inside one directory, in file-name order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    /// Creates a directory source.
    ///
    /// # Errors
    /// - Returns `InvalidPath` when `dir` is empty or not absolute.
    pub fn new(dir: impl AsRef<Path>) -> LoadResult<Self> {
        let dir = dir.as_ref();
        if dir.as_os_str().is_empty() {
            return Err(LoadError::InvalidPath(
                "corpus directory cannot be empty".to_string(),
            ));
        }
        if !dir.is_absolute() {
            return Err(LoadError::InvalidPath(format!(
                "corpus directory must be an absolute path, got `{}`",
                dir.display()
            )));
        }
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn markdown_paths(&self) -> LoadResult<Vec<PathBuf>> {
        let entries = std::fs::read_dir(&self.dir).map_err(|source| LoadError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| LoadError::Io {
                path: self.dir.clone(),
                source,
            })?;
            let path = entry.path();
            let is_markdown = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("md"));
            if is_markdown && path.is_file() {
                paths.push(path);
            } else {
                debug!(
                    "event=corpus_scan module=document status=skip path={}",
                    path.display()
                );
            }
        }
        paths.sort();
        Ok(paths)
    }
}

impl CorpusSource for DirectorySource {
    fn describe(&self) -> String {
        format!("directory `{}`", self.dir.display())
    }

    fn load_documents(&self) -> LoadResult<Vec<SourceDocument>> {
        let paths = self.markdown_paths()?;
        if paths.is_empty() {
            return Err(LoadError::NoDocuments(self.describe()));
        }

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let variant = DocumentVariant::from_path(&path).ok_or_else(|| {
                LoadError::InvalidPath(format!(
                    "cannot derive a document variant from `{}`",
                    path.display()
                ))
            })?;
            let text = std::fs::read_to_string(&path).map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;
            documents.push(SourceDocument {
                variant,
                origin: path.display().to_string(),
                text,
            });
        }

        info!(
            "event=corpus_scan module=document status=ok dir={} documents={}",
            self.dir.display(),
            documents.len()
        );
        Ok(documents)
    }
}
