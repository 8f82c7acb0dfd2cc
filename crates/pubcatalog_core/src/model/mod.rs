//! Publication domain model.
//!
//! # Responsibility
//! - Define the normalized record consumed by query and presentation code.
//! - Resolve optionally-encoded list fields once, at load time.
//!
//! # Invariants
//! - Every publication carries the identifier assigned by its store.
//! - Encoded list fields never fail a load; malformed input degrades to an
//!   empty list.

pub mod encoded;
pub mod publication;
