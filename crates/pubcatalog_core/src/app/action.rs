use serde::{Deserialize, Serialize};

/// How search and filter inputs interact.
///
/// `Independent` treats each interaction as a fresh query over the full
/// set: a search matches on the term alone while keeping the filter
/// selections, and a filter change clears the search term and applies every
/// current selection. `Compose` keeps both and applies them together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    #[default]
    Independent,
    Compose,
}

/// One discrete filter change. `None` selects "any".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSelection {
    Domain(Option<String>),
    System(Option<String>),
    Year(Option<i64>),
}

/// User interaction applied through `CatalogState::dispatch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Submit the free-text field.
    Search(String),
    SetFilter(FilterSelection),
    /// Clear search and filters.
    Reset,
    /// Step by `delta` pages; steps leaving the page range are ignored.
    ChangePage(isize),
    /// Jump to a page, clamped into range.
    GoToPage(usize),
}
