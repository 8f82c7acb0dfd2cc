//! Query engine over the loaded publication set.
//!
//! # Responsibility
//! - Free-text search and conjunctive field filters.
//! - Facet values and summary counters for the whole set.
//!
//! # Invariants
//! - Every entry point is a pure function of its inputs.
//! - Input order is preserved; nothing here ranks or reorders records.

pub mod facets;
pub mod filter;
pub mod search;
