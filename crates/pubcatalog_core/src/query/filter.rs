//! Conjunctive field filters.

use crate::model::publication::Publication;

/// Active filter selections. `None` imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub domain: Option<String>,
    pub system: Option<String>,
    pub year: Option<i64>,
}

impl FilterCriteria {
    /// Returns whether no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.domain.is_none() && self.system.is_none() && self.year.is_none()
    }

    /// Returns whether `publication` satisfies every set criterion.
    pub fn matches(&self, publication: &Publication) -> bool {
        let domain_ok = self
            .domain
            .as_ref()
            .map_or(true, |domain| publication.research_domains.contains(domain));
        let system_ok = self
            .system
            .as_ref()
            .map_or(true, |system| publication.biological_systems.contains(system));
        let year_ok = self
            .year
            .map_or(true, |year| publication.known_year() == Some(year));

        domain_ok && system_ok && year_ok
    }
}

/// Returns the publications satisfying `criteria`, in input order.
pub fn filter<'a>(publications: &'a [Publication], criteria: &FilterCriteria) -> Vec<&'a Publication> {
    publications
        .iter()
        .filter(|publication| criteria.matches(publication))
        .collect()
}
