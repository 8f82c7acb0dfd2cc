//! Facet values and summary counters.

use crate::model::publication::Publication;
use serde::Serialize;
use std::collections::BTreeSet;

/// Distinct selectable values across a publication set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    /// Lexicographic order.
    pub domains: Vec<String>,
    /// Lexicographic order.
    pub systems: Vec<String>,
    /// Newest first.
    pub years: Vec<i64>,
}

/// Aggregate counters shown above the results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub domain_count: usize,
    /// Mean over publications that report a duration, rounded; `0` when none do.
    pub avg_duration_days: i64,
}

/// Collects distinct domains, systems and years.
///
/// Empty tags are skipped so no blank option is ever offered.
pub fn facets(publications: &[Publication]) -> Facets {
    let mut domains = BTreeSet::new();
    let mut systems = BTreeSet::new();
    let mut years = BTreeSet::new();

    for publication in publications {
        domains.extend(non_empty(&publication.research_domains));
        systems.extend(non_empty(&publication.biological_systems));
        years.extend(publication.known_year());
    }

    Facets {
        domains: domains.into_iter().map(str::to_string).collect(),
        systems: systems.into_iter().map(str::to_string).collect(),
        years: years.into_iter().rev().collect(),
    }
}

/// Computes total, distinct-domain count and average duration.
pub fn stats(publications: &[Publication]) -> CatalogStats {
    let domain_count = publications
        .iter()
        .flat_map(|publication| non_empty(&publication.research_domains))
        .collect::<BTreeSet<_>>()
        .len();

    let durations = publications
        .iter()
        .filter_map(Publication::known_duration_days)
        .collect::<Vec<_>>();
    let avg_duration_days = if durations.is_empty() {
        0
    } else {
        let sum = durations.iter().map(|days| *days as f64).sum::<f64>();
        (sum / durations.len() as f64).round() as i64
    };

    CatalogStats {
        total: publications.len(),
        domain_count,
        avg_duration_days,
    }
}

fn non_empty(tags: &[String]) -> impl Iterator<Item = &str> {
    tags.iter().map(String::as_str).filter(|tag| !tag.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{facets, stats};
    use crate::model::publication::Publication;

    #[test]
    fn blank_tags_are_not_facets() {
        let mut publication = Publication::with_id("p");
        publication.research_domains = vec![String::new(), "botany".to_string()];

        let facets = facets(&[publication.clone()]);
        assert_eq!(facets.domains, vec!["botany"]);
        assert_eq!(stats(&[publication]).domain_count, 1);
    }

    #[test]
    fn average_rounds_to_nearest_day() {
        let mut first = Publication::with_id("a");
        first.experiment_duration_days = Some(10);
        let mut second = Publication::with_id("b");
        second.experiment_duration_days = Some(11);
        let third = Publication::with_id("c");

        assert_eq!(stats(&[first, second, third]).avg_duration_days, 11);
    }

    #[test]
    fn zero_year_and_duration_count_as_missing() {
        let mut zero = Publication::with_id("a");
        zero.publication_year = Some(0);
        zero.experiment_duration_days = Some(0);
        let mut flown = Publication::with_id("b");
        flown.publication_year = Some(2021);
        flown.experiment_duration_days = Some(30);

        let publications = [zero, flown];
        assert_eq!(facets(&publications).years, vec![2021]);
        assert_eq!(stats(&publications).avg_duration_days, 30);
    }
}
