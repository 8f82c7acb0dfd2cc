//! Optionally-encoded list fields.
//!
//! # Responsibility
//! - Classify a stored list field as already structured, still encoded, or
//!   missing.
//! - Decode encoded values into a plain `Vec<String>` with a logged fallback.
//!
//! # Invariants
//! - `EncodedList::resolve` never fails; decode errors become an empty list.
//! - Non-string list elements are dropped, never stringified.

use crate::logging::sanitize_message;
use log::warn;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

const RAW_PREVIEW_CHARS: usize = 80;

/// Stored shape of a list-valued field before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedList {
    /// Stored as a native list.
    Decoded(Vec<String>),
    /// Stored as a string holding a serialized JSON list.
    Raw(String),
    /// Field missing or `null`.
    Absent,
}

/// Failure to decode a `Raw` list field.
#[derive(Debug)]
pub enum DecodeError {
    /// Raw text is not valid JSON.
    NotJson(serde_json::Error),
    /// Raw text is JSON but not a list.
    NotAList(&'static str),
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotJson(err) => write!(f, "encoded list is not valid JSON: {err}"),
            Self::NotAList(kind) => write!(f, "encoded value is a JSON {kind}, expected a list"),
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotJson(err) => Some(err),
            Self::NotAList(_) => None,
        }
    }
}

impl EncodedList {
    /// Classifies one stored field value.
    ///
    /// Scalars and objects are kept as `Raw` text so they fail decoding the
    /// same way a malformed string does.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Absent,
            Some(Value::Array(items)) => Self::Decoded(string_items(items)),
            Some(Value::String(text)) => Self::Raw(text.clone()),
            Some(other) => Self::Raw(other.to_string()),
        }
    }

    /// Resolves this field into a plain list.
    ///
    /// `record_id` and `field` only feed the fallback warning.
    pub fn resolve(self, record_id: &str, field: &str) -> Vec<String> {
        match self {
            Self::Decoded(items) => items,
            Self::Absent => Vec::new(),
            Self::Raw(text) => match decode_list(&text) {
                Ok(items) => items,
                Err(err) => {
                    warn!(
                        "event=field_decode module=model status=fallback record_id={} field={} error={} raw={}",
                        record_id,
                        field,
                        err,
                        sanitize_message(&text, RAW_PREVIEW_CHARS)
                    );
                    Vec::new()
                }
            },
        }
    }
}

/// Decodes serialized list text.
///
/// Blank text decodes to an empty list without error.
pub fn decode_list(raw: &str) -> Result<Vec<String>, DecodeError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<Value>(raw).map_err(DecodeError::NotJson)? {
        Value::Array(items) => Ok(string_items(&items)),
        Value::Null => Err(DecodeError::NotAList("null")),
        Value::Bool(_) => Err(DecodeError::NotAList("boolean")),
        Value::Number(_) => Err(DecodeError::NotAList("number")),
        Value::String(_) => Err(DecodeError::NotAList("string")),
        Value::Object(_) => Err(DecodeError::NotAList("object")),
    }
}

fn string_items(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| item.as_str().map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{decode_list, DecodeError, EncodedList};
    use serde_json::json;

    #[test]
    fn from_value_classifies_shapes() {
        assert_eq!(EncodedList::from_value(None), EncodedList::Absent);
        assert_eq!(EncodedList::from_value(Some(&json!(null))), EncodedList::Absent);
        assert_eq!(
            EncodedList::from_value(Some(&json!(["a", 1, "b"]))),
            EncodedList::Decoded(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(
            EncodedList::from_value(Some(&json!("[\"x\"]"))),
            EncodedList::Raw("[\"x\"]".to_string())
        );
        assert_eq!(
            EncodedList::from_value(Some(&json!(42))),
            EncodedList::Raw("42".to_string())
        );
    }

    #[test]
    fn decode_list_accepts_json_arrays() {
        assert_eq!(
            decode_list(r#"["space_biology", "plants"]"#).unwrap(),
            vec!["space_biology".to_string(), "plants".to_string()]
        );
        assert!(decode_list("   ").unwrap().is_empty());
    }

    #[test]
    fn decode_list_rejects_malformed_text() {
        assert!(matches!(
            decode_list("not valid json"),
            Err(DecodeError::NotJson(_))
        ));
        assert!(matches!(
            decode_list(r#"{"a": 1}"#),
            Err(DecodeError::NotAList("object"))
        ));
    }

    #[test]
    fn resolve_falls_back_to_empty_list() {
        let raw = EncodedList::Raw("not valid json".to_string());
        assert!(raw.resolve("doc-1", "research_domains").is_empty());

        let scalar = EncodedList::from_value(Some(&json!(7)));
        assert!(scalar.resolve("doc-1", "key_findings").is_empty());
    }
}
