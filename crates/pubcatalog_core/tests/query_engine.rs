use pubcatalog_core::{
    facets, filter, search, stats, CatalogStats, Document, FilterCriteria, Publication,
};
use serde_json::json;

fn publication(id: &str, title: &str, domains: &[&str], year: Option<i64>) -> Publication {
    let mut publication = Publication::with_id(id);
    publication.title = Some(title.to_string());
    publication.research_domains = domains.iter().map(|d| d.to_string()).collect();
    publication.publication_year = year;
    publication
}

fn ids(publications: &[&Publication]) -> Vec<String> {
    publications.iter().map(|p| p.id.clone()).collect()
}

fn sample() -> Vec<Publication> {
    let mut first = publication("a", "Mars analog habitats", &["human_health"], Some(2021));
    first.biological_systems = vec!["homo_sapiens".to_string()];
    first.experiment_duration_days = Some(30);

    let mut second = publication("b", "Root growth", &["plant_biology"], Some(2020));
    second.abstract_text = Some("Arabidopsis grown on the ISS.".to_string());
    second.biological_systems = vec!["arabidopsis".to_string()];
    second.experiment_duration_days = Some(15);

    let mut third = publication("c", "Bone density", &["human_health", "bone"], Some(2021));
    third.key_findings = vec!["Loss persists after return from MARS missions".to_string()];
    third.biological_systems = vec!["mus_musculus".to_string()];

    vec![first, second, third]
}

#[test]
fn empty_search_returns_everything_in_order() {
    let records = sample();
    assert_eq!(ids(&search(&records, "")), vec!["a", "b", "c"]);
    assert_eq!(ids(&search(&records, "   ")), vec!["a", "b", "c"]);
}

#[test]
fn search_is_case_insensitive() {
    let records = sample();
    let upper = ids(&search(&records, "Mars"));
    let lower = ids(&search(&records, "mars"));
    assert_eq!(upper, lower);
    assert_eq!(upper, vec!["a", "c"]);
}

#[test]
fn search_covers_abstract_and_findings_and_trims_term() {
    let records = sample();
    assert_eq!(ids(&search(&records, "  Arabidopsis GROWN ")), vec!["b"]);
    assert_eq!(ids(&search(&records, "persists after")), vec!["c"]);
    assert!(search(&records, "nothing like this").is_empty());
}

#[test]
fn filter_is_conjunctive_and_never_grows() {
    let records = sample();

    let by_domain = FilterCriteria {
        domain: Some("human_health".to_string()),
        ..FilterCriteria::default()
    };
    let by_domain_and_system = FilterCriteria {
        system: Some("mus_musculus".to_string()),
        ..by_domain.clone()
    };
    let all_three = FilterCriteria {
        year: Some(2020),
        ..by_domain_and_system.clone()
    };

    let everything = filter(&records, &FilterCriteria::default());
    let one = filter(&records, &by_domain);
    let two = filter(&records, &by_domain_and_system);
    let three = filter(&records, &all_three);

    assert_eq!(everything.len(), 3);
    assert_eq!(ids(&one), vec!["a", "c"]);
    assert_eq!(ids(&two), vec!["c"]);
    assert!(three.is_empty());
    assert!(everything.len() >= one.len() && one.len() >= two.len() && two.len() >= three.len());
}

#[test]
fn malformed_encoded_domains_never_match() {
    let document = Document::from_value(
        "broken",
        json!({
            "title": "Broken tags",
            "research_domains": "not valid json",
        }),
    )
    .unwrap();
    let broken = Publication::from_document(document);
    assert!(broken.research_domains.is_empty());

    let records = vec![broken];
    for domain in ["not valid json", "not", ""] {
        let criteria = FilterCriteria {
            domain: Some(domain.to_string()),
            ..FilterCriteria::default()
        };
        assert!(filter(&records, &criteria).is_empty());
    }
}

#[test]
fn facets_are_distinct_and_sorted() {
    let facets = facets(&sample());
    assert_eq!(facets.domains, vec!["bone", "human_health", "plant_biology"]);
    assert_eq!(facets.systems, vec!["arabidopsis", "homo_sapiens", "mus_musculus"]);
    assert_eq!(facets.years, vec![2021, 2020]);
}

#[test]
fn records_without_tags_contribute_no_facets() {
    let bare = vec![Publication::with_id("x")];
    let facets = facets(&bare);
    assert!(facets.domains.is_empty());
    assert!(facets.systems.is_empty());
    assert!(facets.years.is_empty());
}

#[test]
fn stats_for_empty_set_are_zero() {
    assert_eq!(
        stats(&[]),
        CatalogStats {
            total: 0,
            domain_count: 0,
            avg_duration_days: 0,
        }
    );
}

#[test]
fn stats_average_only_counts_present_durations() {
    let stats = stats(&sample());
    assert_eq!(stats.total, 3);
    assert_eq!(stats.domain_count, 3);
    // (30 + 15) / 2 = 22.5
    assert_eq!(stats.avg_duration_days, 23);
}

#[test]
fn year_scenario_filters_in_original_order() {
    let records = vec![
        publication("first", "One", &[], Some(2020)),
        publication("second", "Two", &[], Some(2021)),
        publication("third", "Three", &[], Some(2021)),
    ];

    assert_eq!(facets(&records).years, vec![2021, 2020]);

    let criteria = FilterCriteria {
        year: Some(2021),
        ..FilterCriteria::default()
    };
    assert_eq!(ids(&filter(&records, &criteria)), vec!["second", "third"]);
}
