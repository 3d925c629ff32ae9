//! Core use-case services.
//!
//! # Responsibility
//! - Assemble the corpus components from a source.
//! - Keep CLI/renderer callers decoupled from parsing and storage details.

pub mod corpus_service;
