//! Publication record.
//!
//! # Responsibility
//! - Define the canonical catalog record built from one stored document.
//! - Keep every stored field reachable, modeled or not.
//!
//! # Invariants
//! - `id` is the store-assigned identifier and is never rewritten.
//! - Optional text and number fields stay `None` when missing or mistyped;
//!   fallbacks are applied by the presenter, not here.
//! - A year or duration of `0` is treated as missing.
//! - List fields are already decoded; consumers never see encoded text.

use crate::model::encoded::EncodedList;
use crate::store::Document;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Store-assigned identifier of a publication.
pub type PublicationId = String;

pub const FIELD_TITLE: &str = "title";
pub const FIELD_ABSTRACT: &str = "abstract";
pub const FIELD_LINK: &str = "link";
pub const FIELD_PUBLICATION_YEAR: &str = "publication_year";
pub const FIELD_DURATION_DAYS: &str = "experiment_duration_days";
pub const FIELD_RESEARCH_DOMAINS: &str = "research_domains";
pub const FIELD_BIOLOGICAL_SYSTEMS: &str = "biological_systems";
pub const FIELD_KEY_FINDINGS: &str = "key_findings";

const MODELED_FIELDS: &[&str] = &[
    FIELD_TITLE,
    FIELD_ABSTRACT,
    FIELD_LINK,
    FIELD_PUBLICATION_YEAR,
    FIELD_DURATION_DAYS,
    FIELD_RESEARCH_DOMAINS,
    FIELD_BIOLOGICAL_SYSTEMS,
    FIELD_KEY_FINDINGS,
];

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub id: PublicationId,
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub link: Option<String>,
    pub publication_year: Option<i64>,
    pub experiment_duration_days: Option<i64>,
    pub research_domains: Vec<String>,
    pub biological_systems: Vec<String>,
    pub key_findings: Vec<String>,
    /// Stored fields without a dedicated slot (`created_at` and friends).
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl Publication {
    /// Creates an empty publication with only an identifier.
    ///
    /// Used by tests and import paths that fill fields afterwards.
    pub fn with_id(id: impl Into<PublicationId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            abstract_text: None,
            link: None,
            publication_year: None,
            experiment_duration_days: None,
            research_domains: Vec::new(),
            biological_systems: Vec::new(),
            key_findings: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Publication year, with `0` read as unknown.
    pub fn known_year(&self) -> Option<i64> {
        self.publication_year.filter(|year| *year != 0)
    }

    /// Experiment duration in days, with `0` read as unknown.
    pub fn known_duration_days(&self) -> Option<i64> {
        self.experiment_duration_days.filter(|days| *days != 0)
    }

    /// Normalizes one stored document.
    ///
    /// No schema validation happens here: mistyped scalars become `None` and
    /// encoded lists go through [`EncodedList::resolve`].
    pub fn from_document(document: Document) -> Self {
        let Document { id, mut fields } = document;

        let list = |fields: &Map<String, Value>, name: &str| {
            EncodedList::from_value(fields.get(name)).resolve(&id, name)
        };
        let research_domains = list(&fields, FIELD_RESEARCH_DOMAINS);
        let biological_systems = list(&fields, FIELD_BIOLOGICAL_SYSTEMS);
        let key_findings = list(&fields, FIELD_KEY_FINDINGS);

        let title = text_field(&fields, FIELD_TITLE);
        let abstract_text = text_field(&fields, FIELD_ABSTRACT);
        let link = text_field(&fields, FIELD_LINK);
        let publication_year = integer_field(&fields, FIELD_PUBLICATION_YEAR);
        let experiment_duration_days = integer_field(&fields, FIELD_DURATION_DAYS);

        fields.retain(|name, _| !MODELED_FIELDS.contains(&name.as_str()));

        Self {
            id,
            title,
            abstract_text,
            link,
            publication_year,
            experiment_duration_days,
            research_domains,
            biological_systems,
            key_findings,
            extra: fields,
        }
    }
}

fn text_field(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields
        .get(name)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn integer_field(fields: &Map<String, Value>, name: &str) -> Option<i64> {
    let Value::Number(number) = fields.get(name)? else {
        return None;
    };
    let value = match number.as_i64() {
        Some(value) => value,
        // Whole floats show up when an integer was written through a JS client.
        None => number
            .as_f64()
            .filter(|value| value.fract() == 0.0 && value.is_finite())
            .map(|value| value as i64)?,
    };
    (value != 0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::Publication;
    use crate::store::Document;
    use serde_json::json;

    fn document(fields: serde_json::Value) -> Document {
        Document::from_value("doc-1", fields).unwrap()
    }

    #[test]
    fn from_document_maps_modeled_fields() {
        let publication = Publication::from_document(document(json!({
            "title": "Bone loss in microgravity",
            "abstract": "Mice flown for 30 days.",
            "link": "https://example.org/p/1",
            "publication_year": 2021,
            "experiment_duration_days": 30.0,
            "research_domains": ["bone_health"],
            "biological_systems": "[\"mus_musculus\"]",
            "key_findings": ["Loss of trabecular bone"],
            "created_at": 1_700_000_000_000_i64,
        })));

        assert_eq!(publication.id, "doc-1");
        assert_eq!(publication.title.as_deref(), Some("Bone loss in microgravity"));
        assert_eq!(publication.publication_year, Some(2021));
        assert_eq!(publication.experiment_duration_days, Some(30));
        assert_eq!(publication.research_domains, vec!["bone_health"]);
        assert_eq!(publication.biological_systems, vec!["mus_musculus"]);
        assert_eq!(publication.key_findings, vec!["Loss of trabecular bone"]);
        assert_eq!(publication.extra.len(), 1);
        assert!(publication.extra.contains_key("created_at"));
    }

    #[test]
    fn from_document_tolerates_missing_and_mistyped_fields() {
        let publication = Publication::from_document(document(json!({
            "title": 12,
            "publication_year": "2021",
            "research_domains": "not valid json",
        })));

        assert_eq!(publication.title, None);
        assert_eq!(publication.abstract_text, None);
        assert_eq!(publication.publication_year, None);
        assert!(publication.research_domains.is_empty());
        assert!(publication.key_findings.is_empty());
    }

    #[test]
    fn serialization_uses_stored_field_names() {
        let mut publication = Publication::with_id("doc-9");
        publication.abstract_text = Some("text".to_string());

        let value = serde_json::to_value(&publication).unwrap();
        assert_eq!(value["abstract"], "text");
        assert!(value.get("extra").is_none());
    }

    #[test]
    fn zero_year_and_duration_are_read_as_missing() {
        let publication = Publication::from_document(document(json!({
            "publication_year": 0,
            "experiment_duration_days": 0.0,
        })));

        assert_eq!(publication.publication_year, None);
        assert_eq!(publication.experiment_duration_days, None);
    }
}
