//! Presenter: page windows and display fragments.
//!
//! # Responsibility
//! - Slice a match list into fixed-size pages with pager metadata.
//! - Render publications as HTML or plain-text fragments.
//!
//! # Invariants
//! - The displayed page count is never below 1.
//! - Rendering never fails on missing optional fields.

pub mod paginate;
pub mod render;
