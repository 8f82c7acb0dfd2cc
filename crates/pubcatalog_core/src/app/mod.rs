//! Application state and the single interaction update path.
//!
//! # Responsibility
//! - Own the loaded set and all derived state (matches, current page).
//! - Map user interactions to explicit `Action`s applied by `dispatch`.
//! - Produce a render-ready `CatalogView` without touching any UI toolkit.
//!
//! # Invariants
//! - Derived state is always recomputed from the full set, never from a
//!   previous match list.
//! - No action has any effect before a successful load.

mod action;
mod state;
mod view;

pub use action::{Action, FilterSelection, QueryMode};
pub use state::{CatalogState, LoadStatus};
pub use view::{CatalogView, FilterOptions, SelectOption, ViewStatus, ANY_OPTION_LABEL};
