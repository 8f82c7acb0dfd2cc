//! Case-insensitive substring search.

use crate::model::publication::Publication;

/// Normalized search term.
///
/// Built once per interaction, then tested against each record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Trims and lower-cases raw input. Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether the term occurs in the record's title, abstract or
    /// findings.
    pub fn matches(&self, publication: &Publication) -> bool {
        searchable_text(publication).contains(self.0.as_str())
    }
}

/// Lower-cased text a term is matched against.
///
/// Fields are separated by newlines so a term never matches across a field
/// boundary by accident of concatenation.
pub fn searchable_text(publication: &Publication) -> String {
    let mut text = String::new();
    text.push_str(publication.title.as_deref().unwrap_or_default());
    text.push('\n');
    text.push_str(publication.abstract_text.as_deref().unwrap_or_default());
    text.push('\n');
    text.push_str(&publication.key_findings.join(" "));
    text.to_lowercase()
}

/// Returns the publications matching `term`, in input order.
///
/// A blank term returns every publication.
pub fn search<'a>(publications: &'a [Publication], term: &str) -> Vec<&'a Publication> {
    let Some(term) = SearchTerm::parse(term) else {
        return publications.iter().collect();
    };
    publications
        .iter()
        .filter(|publication| term.matches(publication))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{searchable_text, SearchTerm};
    use crate::model::publication::Publication;

    #[test]
    fn parse_trims_and_lowercases() {
        assert_eq!(SearchTerm::parse("  Mars Rover ").unwrap().as_str(), "mars rover");
        assert_eq!(SearchTerm::parse("   "), None);
    }

    #[test]
    fn searchable_text_skips_missing_fields() {
        let mut publication = Publication::with_id("p");
        publication.key_findings = vec!["Alpha".to_string(), "Beta".to_string()];
        assert_eq!(searchable_text(&publication), "\n\nalpha beta");
    }
}
