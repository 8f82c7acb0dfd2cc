use pubcatalog_core::present::render::{render_card_text, EMPTY_STATE_MESSAGE, NO_ABSTRACT, UNTITLED};
use pubcatalog_core::{
    paginate, render_card_html, render_page, Publication, RenderFormat, RenderOptions,
    DEFAULT_PAGE_SIZE,
};
use std::num::NonZeroUsize;

fn numbers(count: usize) -> Vec<usize> {
    (1..=count).collect()
}

fn with_abstract(chars: usize) -> Publication {
    let mut publication = Publication::with_id("p");
    publication.abstract_text = Some("a".repeat(chars));
    publication
}

#[test]
fn paginate_first_and_last_pages() {
    let items = numbers(25);

    let first = paginate(&items, 1, DEFAULT_PAGE_SIZE);
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.items[0], 1);
    assert!(first.is_first_page);
    assert!(!first.is_last_page);
    assert_eq!(first.page_count, 3);

    let last = paginate(&items, 3, DEFAULT_PAGE_SIZE);
    assert_eq!(last.items, &[21, 22, 23, 24, 25]);
    assert!(last.is_last_page);
    assert!(!last.is_first_page);
}

#[test]
fn paginate_clamps_out_of_range_pages() {
    let items = numbers(25);

    let below = paginate(&items, 0, DEFAULT_PAGE_SIZE);
    assert_eq!(below.page_number, 1);
    assert_eq!(below.items.len(), 10);

    let above = paginate(&items, 4, DEFAULT_PAGE_SIZE);
    assert_eq!(above.page_number, 3);
    assert_eq!(above.items.len(), 5);
}

#[test]
fn paginate_empty_set_shows_one_disabled_page() {
    let items: Vec<usize> = Vec::new();
    let page = paginate(&items, 1, DEFAULT_PAGE_SIZE);

    assert!(page.is_empty());
    assert_eq!(page.page_count, 0);
    assert_eq!(page.display_page_count(), 1);

    let pager = page.pager();
    assert_eq!(pager.label(), "Page 1 of 1");
    assert!(!pager.prev_enabled);
    assert!(!pager.next_enabled);
}

#[test]
fn paginate_respects_custom_page_size() {
    let items = numbers(7);
    let size = NonZeroUsize::new(3).unwrap();
    let middle = paginate(&items, 2, size);
    assert_eq!(middle.items, &[4, 5, 6]);
    assert_eq!(middle.pager().label(), "Page 2 of 3");
    assert!(middle.pager().prev_enabled && middle.pager().next_enabled);
}

#[test]
fn long_abstract_is_truncated_with_ellipsis() {
    let html = render_card_html(&with_abstract(350), &RenderOptions::default());
    let expected = format!("{}...", "a".repeat(300));
    assert!(html.contains(&format!("<p class=\"publication-abstract\">{expected}</p>")));
}

#[test]
fn short_abstract_renders_unmodified() {
    let html = render_card_html(&with_abstract(200), &RenderOptions::default());
    let expected = "a".repeat(200);
    assert!(html.contains(&format!("<p class=\"publication-abstract\">{expected}</p>")));
    assert!(!html.contains("..."));
}

#[test]
fn exact_length_abstract_gets_no_ellipsis() {
    let html = render_card_html(&with_abstract(300), &RenderOptions::default());
    assert!(!html.contains("..."));
}

#[test]
fn missing_fields_use_fallbacks() {
    let html = render_card_html(&Publication::with_id("bare"), &RenderOptions::default());

    assert!(html.contains(&format!(">{UNTITLED}</a>")));
    assert!(html.contains("href=\"#\""));
    assert!(html.contains(NO_ABSTRACT));
    assert!(!html.contains("badge-year"));
    assert!(!html.contains("badge-duration"));
    assert!(!html.contains("findings"));
}

#[test]
fn badges_and_findings_render_when_present() {
    let mut publication = Publication::with_id("full");
    publication.title = Some("Spaceflight & muscle".to_string());
    publication.link = Some("https://example.org/?a=1&b=2".to_string());
    publication.research_domains = vec!["space_biology".to_string()];
    publication.biological_systems = vec!["mus_musculus".to_string()];
    publication.publication_year = Some(2022);
    publication.experiment_duration_days = Some(37);
    publication.key_findings = vec!["Atrophy <10%".to_string()];

    let html = render_card_html(&publication, &RenderOptions::default());

    assert!(html.contains("href=\"https://example.org/?a=1&amp;b=2\""));
    assert!(html.contains(">Spaceflight &amp; muscle</a>"));
    assert!(html.contains("<span class=\"badge badge-domain\">Space Biology</span>"));
    assert!(html.contains("<span class=\"badge badge-system\">Mus Musculus</span>"));
    assert!(html.contains("<span class=\"badge badge-year\">2022</span>"));
    assert!(html.contains("<span class=\"badge badge-duration\">37 days</span>"));
    assert!(html.contains("<h4>Key Findings:</h4><ul><li>Atrophy &lt;10%</li></ul>"));
}

#[test]
fn empty_page_renders_empty_state() {
    let html = render_page(&[], RenderFormat::Html, &RenderOptions::default());
    assert!(html.contains(EMPTY_STATE_MESSAGE));
    assert!(!html.contains("publication-card"));

    let text = render_page(&[], RenderFormat::Text, &RenderOptions::default());
    assert_eq!(text.trim(), EMPTY_STATE_MESSAGE);
}

#[test]
fn text_cards_share_fallbacks_and_tag_labels() {
    let mut publication = Publication::with_id("t");
    publication.research_domains = vec!["radiation_effects".to_string()];
    publication.publication_year = Some(2019);

    let text = render_card_text(&publication, &RenderOptions::default());
    assert!(text.starts_with(UNTITLED));
    assert!(text.contains("[Radiation Effects] [2019]"));
    assert!(text.contains(NO_ABSTRACT));
    assert!(!text.contains("Key Findings"));
}

#[test]
fn render_page_keeps_card_order() {
    let mut first = Publication::with_id("1");
    first.title = Some("First".to_string());
    let mut second = Publication::with_id("2");
    second.title = Some("Second".to_string());

    let html = render_page(&[&first, &second], RenderFormat::Html, &RenderOptions::default());
    let first_at = html.find("First").unwrap();
    let second_at = html.find("Second").unwrap();
    assert!(first_at < second_at);
    assert_eq!(html.matches("<article").count(), 2);
}

#[test]
fn zero_year_and_duration_render_no_badges() {
    let mut publication = Publication::with_id("p");
    publication.publication_year = Some(0);
    publication.experiment_duration_days = Some(0);

    let html = render_card_html(&publication, &RenderOptions::default());
    assert!(!html.contains("badge-year"));
    assert!(!html.contains("badge-duration"));
    assert!(!html.contains("0 days"));
}
