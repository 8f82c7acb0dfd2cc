//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate store reads into catalog-level results.
//! - Keep front ends decoupled from store details.

pub mod loader;
