use super::action::{Action, FilterSelection, QueryMode};
use crate::model::publication::Publication;
use crate::present::paginate::{clamp_page, page_count, paginate, Page};
use crate::query::facets::{facets, stats, CatalogStats, Facets};
use crate::query::filter::FilterCriteria;
use crate::query::search::SearchTerm;
use crate::service::loader::LoadError;
use log::{debug, error};
use std::num::NonZeroUsize;

/// Lifecycle of the one-time load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    /// Carries the user-facing message.
    Failed(String),
}

/// Everything the catalog page knows.
#[derive(Debug, Clone)]
pub struct CatalogState {
    publications: Vec<Publication>,
    facets: Facets,
    stats: CatalogStats,
    search_term: String,
    criteria: FilterCriteria,
    /// Whether `criteria` takes part in the current match set. Independent
    /// searches keep the selections but do not apply them.
    filters_applied: bool,
    /// Indices into `publications`, in load order.
    matches: Vec<usize>,
    current_page: usize,
    page_size: NonZeroUsize,
    mode: QueryMode,
    status: LoadStatus,
}

impl CatalogState {
    /// Creates an empty state waiting for the load to finish.
    pub fn new(page_size: NonZeroUsize, mode: QueryMode) -> Self {
        Self {
            publications: Vec::new(),
            facets: Facets::default(),
            stats: CatalogStats::default(),
            search_term: String::new(),
            criteria: FilterCriteria::default(),
            filters_applied: true,
            matches: Vec::new(),
            current_page: 1,
            page_size,
            mode,
            status: LoadStatus::Loading,
        }
    }

    /// Creates a ready state over an already loaded set.
    pub fn with_publications(
        publications: Vec<Publication>,
        page_size: NonZeroUsize,
        mode: QueryMode,
    ) -> Self {
        let mut state = Self::new(page_size, mode);
        state.finish_load(Ok(publications));
        state
    }

    /// Applies the load outcome. Only the first call has any effect.
    pub fn finish_load(&mut self, result: Result<Vec<Publication>, LoadError>) {
        if self.status != LoadStatus::Loading {
            debug!("event=state_load module=app status=ignored reason=already_finished");
            return;
        }

        match result {
            Ok(publications) => {
                self.facets = facets(&publications);
                self.stats = stats(&publications);
                self.publications = publications;
                self.status = LoadStatus::Ready;
                self.recompute();
            }
            Err(err) => {
                error!("event=state_load module=app status=error error={err}");
                self.status = LoadStatus::Failed(err.user_message().to_string());
            }
        }
    }

    /// Applies one interaction. Returns whether any state changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        if self.status != LoadStatus::Ready {
            debug!("event=state_dispatch module=app status=ignored reason=not_ready action={action:?}");
            return false;
        }

        match action {
            Action::Search(term) => {
                self.search_term = term.trim().to_string();
                self.filters_applied = self.mode == QueryMode::Compose;
                self.recompute();
                true
            }
            Action::SetFilter(selection) => {
                match selection {
                    FilterSelection::Domain(value) => self.criteria.domain = non_blank(value),
                    FilterSelection::System(value) => self.criteria.system = non_blank(value),
                    FilterSelection::Year(value) => self.criteria.year = value,
                }
                if self.mode == QueryMode::Independent {
                    self.search_term.clear();
                }
                self.filters_applied = true;
                self.recompute();
                true
            }
            Action::Reset => {
                self.search_term.clear();
                self.criteria = FilterCriteria::default();
                self.filters_applied = true;
                self.recompute();
                true
            }
            Action::ChangePage(delta) => {
                let Some(target) = self.current_page.checked_add_signed(delta) else {
                    return false;
                };
                if delta == 0 || target < 1 || target > self.display_page_count() {
                    return false;
                }
                self.current_page = target;
                true
            }
            Action::GoToPage(requested) => {
                let target = clamp_page(requested, self.matches.len(), self.page_size);
                let changed = target != self.current_page;
                self.current_page = target;
                changed
            }
        }
    }

    fn recompute(&mut self) {
        let term = SearchTerm::parse(&self.search_term);
        let criteria = self.filters_applied.then_some(&self.criteria);
        self.matches = self
            .publications
            .iter()
            .enumerate()
            .filter(|(_, publication)| {
                term.as_ref().map_or(true, |term| term.matches(publication))
                    && criteria.map_or(true, |criteria| criteria.matches(publication))
            })
            .map(|(index, _)| index)
            .collect();
        self.current_page = 1;

        debug!(
            "event=state_recompute module=app status=ok mode={:?} matches={} total={}",
            self.mode,
            self.matches.len(),
            self.publications.len()
        );
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn mode(&self) -> QueryMode {
        self.mode
    }

    pub fn publications(&self) -> &[Publication] {
        &self.publications
    }

    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    pub fn stats(&self) -> CatalogStats {
        self.stats
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// All matching publications, in load order.
    pub fn matches(&self) -> Vec<&Publication> {
        self.resolve(&self.matches)
    }

    /// Page window over the match indices.
    pub fn page(&self) -> Page<'_, usize> {
        paginate(&self.matches, self.current_page, self.page_size)
    }

    /// Publications on the current page.
    pub fn page_publications(&self) -> Vec<&Publication> {
        self.resolve(self.page().items)
    }

    fn display_page_count(&self) -> usize {
        page_count(self.matches.len(), self.page_size).max(1)
    }

    fn resolve(&self, indices: &[usize]) -> Vec<&Publication> {
        indices
            .iter()
            .filter_map(|index| self.publications.get(*index))
            .collect()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
