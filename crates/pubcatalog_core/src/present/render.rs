//! Publication card rendering.
//!
//! # Responsibility
//! - Map one publication to a self-contained HTML or text fragment.
//! - Own display fallbacks for missing optional fields.
//!
//! # Invariants
//! - Every record-derived string is HTML-escaped in HTML output.
//! - The title is always a link; a missing link targets `#`.
//! - The abstract preview gets `...` only when it was actually shortened.

use crate::model::publication::Publication;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fmt::Write as _;

pub const UNTITLED: &str = "Untitled Publication";
pub const NO_ABSTRACT: &str = "No abstract available.";
pub const EMPTY_STATE_MESSAGE: &str = "No publications found matching your criteria.";
pub const DEFAULT_PREVIEW_CHARS: usize = 300;
const ELLIPSIS: &str = "...";
const MISSING_LINK_TARGET: &str = "#";

static WORD_START_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w").expect("valid word start regex"));

/// Output flavor for rendered fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    Html,
    Text,
}

/// Tunables for card rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Abstract preview length in characters.
    pub preview_chars: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

/// Formats a category tag for display: `space_biology` -> `Space Biology`.
pub fn display_tag(tag: &str) -> String {
    let spaced = tag.replace('_', " ");
    WORD_START_RE
        .replace_all(&spaced, |caps: &Captures<'_>| caps[0].to_uppercase())
        .into_owned()
}

/// Shortens `text` to `max_chars` characters, appending `...` only when
/// something was cut.
pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}

/// Abstract preview with the missing-abstract fallback applied.
pub fn abstract_preview(publication: &Publication, options: &RenderOptions) -> String {
    match non_blank(publication.abstract_text.as_deref()) {
        Some(text) => truncate_preview(text, options.preview_chars),
        None => NO_ABSTRACT.to_string(),
    }
}

/// Title with the untitled fallback applied.
pub fn display_title(publication: &Publication) -> &str {
    non_blank(publication.title.as_deref()).unwrap_or(UNTITLED)
}

/// Escapes HTML special characters for text and attribute positions.
pub fn html_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Renders one publication card as HTML.
pub fn render_card_html(publication: &Publication, options: &RenderOptions) -> String {
    let link = non_blank(publication.link.as_deref()).unwrap_or(MISSING_LINK_TARGET);

    let mut html = String::new();
    html.push_str("<article class=\"publication-card\">");
    let _ = write!(
        html,
        "<div class=\"publication-header\"><h2 class=\"publication-title\">\
         <a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></h2></div>",
        html_escape(link),
        html_escape(display_title(publication))
    );

    html.push_str("<div class=\"badges\">");
    for domain in &publication.research_domains {
        push_badge(&mut html, "badge-domain", &display_tag(domain));
    }
    for system in &publication.biological_systems {
        push_badge(&mut html, "badge-system", &display_tag(system));
    }
    if let Some(year) = publication.known_year() {
        push_badge(&mut html, "badge-year", &year.to_string());
    }
    if let Some(days) = publication.known_duration_days() {
        push_badge(&mut html, "badge-duration", &format!("{days} days"));
    }
    html.push_str("</div>");

    let _ = write!(
        html,
        "<p class=\"publication-abstract\">{}</p>",
        html_escape(&abstract_preview(publication, options))
    );

    if !publication.key_findings.is_empty() {
        html.push_str("<div class=\"findings\"><h4>Key Findings:</h4><ul>");
        for finding in &publication.key_findings {
            let _ = write!(html, "<li>{}</li>", html_escape(finding));
        }
        html.push_str("</ul></div>");
    }

    html.push_str("</article>");
    html
}

/// Renders one publication card as plain text for terminals.
pub fn render_card_text(publication: &Publication, options: &RenderOptions) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "{}", display_title(publication));
    let _ = writeln!(
        text,
        "  link: {}",
        non_blank(publication.link.as_deref()).unwrap_or(MISSING_LINK_TARGET)
    );

    let mut badges = publication
        .research_domains
        .iter()
        .chain(&publication.biological_systems)
        .map(|tag| format!("[{}]", display_tag(tag)))
        .collect::<Vec<_>>();
    if let Some(year) = publication.known_year() {
        badges.push(format!("[{year}]"));
    }
    if let Some(days) = publication.known_duration_days() {
        badges.push(format!("[{days} days]"));
    }
    if !badges.is_empty() {
        let _ = writeln!(text, "  {}", badges.join(" "));
    }

    let _ = writeln!(text, "  {}", abstract_preview(publication, options));

    if !publication.key_findings.is_empty() {
        text.push_str("  Key Findings:\n");
        for finding in &publication.key_findings {
            let _ = writeln!(text, "    - {finding}");
        }
    }
    text
}

/// Renders a page of publications, or the empty-state message when there
/// are none.
pub fn render_page(
    publications: &[&Publication],
    format: RenderFormat,
    options: &RenderOptions,
) -> String {
    match (format, publications.is_empty()) {
        (RenderFormat::Html, true) => {
            format!("<div class=\"empty-state\">{EMPTY_STATE_MESSAGE}</div>")
        }
        (RenderFormat::Text, true) => format!("{EMPTY_STATE_MESSAGE}\n"),
        (RenderFormat::Html, false) => publications
            .iter()
            .map(|publication| render_card_html(publication, options))
            .collect(),
        (RenderFormat::Text, false) => publications
            .iter()
            .map(|publication| render_card_text(publication, options))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn push_badge(html: &mut String, class: &str, label: &str) {
    let _ = write!(
        html,
        "<span class=\"badge {class}\">{}</span>",
        html_escape(label)
    );
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::{display_tag, html_escape, truncate_preview};

    #[test]
    fn display_tag_spaces_and_capitalizes() {
        assert_eq!(display_tag("space_biology"), "Space Biology");
        assert_eq!(display_tag("plants"), "Plants");
        assert_eq!(display_tag("mus_musculus_c57"), "Mus Musculus C57");
    }

    #[test]
    fn truncate_preview_counts_characters() {
        assert_eq!(truncate_preview("héllo", 5), "héllo");
        assert_eq!(truncate_preview("héllo wörld", 5), "héllo...");
    }

    #[test]
    fn html_escape_covers_attribute_quotes() {
        assert_eq!(
            html_escape("<a href=\"x\">it's & more</a>"),
            "&lt;a href=&quot;x&quot;&gt;it&#39;s &amp; more&lt;/a&gt;"
        );
    }
}
