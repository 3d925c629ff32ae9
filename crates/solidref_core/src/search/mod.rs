//! Full-text search entry points.
//!
//! # Responsibility
//! - Expose keyword search backed by an SQLite FTS5 index of the corpus.
//! - Keep result shaping inside core.

pub mod fts;
