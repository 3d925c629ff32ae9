//! Domain model for the SOLID reference corpus.
//!
//! # Responsibility
//! - Define principle, example and citation records shared by every layer.
//! - Keep records plain data; lookup rules live in `catalog`.
//!
//! # Invariants
//! - Records are created at load time and never mutated afterwards.
//! - Every example is owned by exactly one principle.

pub mod citation;
pub mod example;
pub mod principle;
