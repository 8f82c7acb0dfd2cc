use super::state::{CatalogState, LoadStatus};
use crate::present::paginate::PagerState;
use crate::present::render::{display_tag, render_page, RenderFormat, RenderOptions};
use crate::query::facets::{CatalogStats, Facets};
use serde::Serialize;

pub const ANY_OPTION_LABEL: &str = "Any";

/// What the results area shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum ViewStatus {
    Loading,
    Failed(String),
    Ready,
}

/// One entry of a discrete-choice selector. An empty `value` means "any".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    fn any() -> Self {
        Self {
            value: String::new(),
            label: ANY_OPTION_LABEL.to_string(),
        }
    }
}

/// Selector contents derived from facets, each led by an "any" entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub domains: Vec<SelectOption>,
    pub systems: Vec<SelectOption>,
    pub years: Vec<SelectOption>,
}

impl FilterOptions {
    pub fn from_facets(facets: &Facets) -> Self {
        let tags = |values: &[String]| {
            std::iter::once(SelectOption::any())
                .chain(values.iter().map(|value| SelectOption {
                    value: value.clone(),
                    label: display_tag(value),
                }))
                .collect::<Vec<_>>()
        };
        let years = std::iter::once(SelectOption::any())
            .chain(facets.years.iter().map(|year| SelectOption {
                value: year.to_string(),
                label: year.to_string(),
            }))
            .collect();

        Self {
            domains: tags(&facets.domains),
            systems: tags(&facets.systems),
            years,
        }
    }
}

/// Render-ready snapshot of the catalog page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogView {
    pub status: ViewStatus,
    pub stats: CatalogStats,
    /// Rendered cards, the empty-state message, or nothing while loading.
    pub results: String,
    /// Absent until the load succeeds.
    pub pager: Option<PagerState>,
    pub filter_options: FilterOptions,
    pub search_term: String,
    pub match_count: usize,
}

impl CatalogState {
    /// Builds the view for the current state.
    pub fn view(&self, format: RenderFormat, options: &RenderOptions) -> CatalogView {
        let (status, results, pager) = match self.status() {
            LoadStatus::Loading => (ViewStatus::Loading, String::new(), None),
            LoadStatus::Failed(message) => {
                (ViewStatus::Failed(message.clone()), message.clone(), None)
            }
            LoadStatus::Ready => (
                ViewStatus::Ready,
                render_page(&self.page_publications(), format, options),
                Some(self.page().pager()),
            ),
        };

        CatalogView {
            status,
            stats: self.stats(),
            results,
            pager,
            filter_options: FilterOptions::from_facets(self.facets()),
            search_term: self.search_term().to_string(),
            match_count: self.match_count(),
        }
    }
}
