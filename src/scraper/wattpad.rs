//! Wattpad page parsing. All selector strings live here, behind named query
//! functions, so a markup change on the site is a one-module fix.
//!
//! The functions are pure over HTML text; fetching is the caller's concern.

use crate::model::{SearchResult, StoryPart};
use crate::scraper::error::ScraperError;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

/// Origin prefixed to relative links extracted from markup.
pub const WATTPAD_BASE: &str = "https://www.wattpad.com";

/// Paragraphs of chapter text carry a data-p-id marker attribute.
const CHAPTER_PARAGRAPHS: &str = "p[data-p-id]";
const PARTS_CONTAINER: &str = ".table-of-contents .story-parts ul";
const PART_ITEM: &str = "li";
const PART_TITLE: &str = ".part-title";
const PART_LINK: &str = "a";
const STORY_CARD: &str = ".story-card";
const CARD_TITLE: &str = ".title";
const CARD_DESCRIPTION: &str = ".description";
const CARD_THUMBNAIL: &str = ".cover img";
const CARD_STAT_ITEM: &str = ".new-story-stats .stats-item";
const STAT_LABEL: &str = ".stats-label__text";
const STAT_VALUE: &str = ".stats-value";
const CARD_AUTHOR: &str = ".username";

/// Parse a CSS selector or return a parse error (avoids panics from Selector::parse).
fn parse_selector(sel: &str) -> Result<Selector, ScraperError> {
    Selector::parse(sel).map_err(|e| ScraperError::ParsePage {
        message: format!("invalid selector {:?}: {}", sel, e),
    })
}

/// Text content of the first descendant matching `sel`, trimmed. Empty string
/// if nothing matches.
fn select_text(el: &ElementRef<'_>, sel: &Selector) -> String {
    el.select(sel)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Resolve an extracted href to an absolute URL: relative hrefs get the site
/// origin prefixed, absolute ones are kept as-is.
fn resolve_link(href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!("{}{}", WATTPAD_BASE, href)
    }
}

/// URL of page `n` of a chapter: `{chapter_url}/page/{n}`.
pub fn chapter_page_url(chapter_url: &str, page: u32) -> String {
    format!("{}/page/{}", chapter_url, page)
}

/// Search URL for a free-text query; the query is percent-encoded as a single
/// path segment.
pub fn search_url(query: &str) -> Result<String, ScraperError> {
    let mut url = Url::parse(WATTPAD_BASE).map_err(|e| ScraperError::InvalidUrl {
        input: WATTPAD_BASE.to_string(),
        reason: e.to_string(),
    })?;
    url.path_segments_mut()
        .map_err(|_| ScraperError::InvalidUrl {
            input: WATTPAD_BASE.to_string(),
            reason: "cannot be a base".to_string(),
        })?
        .pop_if_empty()
        .push("search")
        .push(query);
    Ok(url.to_string())
}

/// Extract chapter text from one page: every marked paragraph's text,
/// trimmed, joined with single spaces in document order. A page with no
/// marked paragraphs yields an empty string, not an error.
pub fn parse_chapter_text(html: &str) -> Result<String, ScraperError> {
    let doc = Html::parse_document(html);
    let p_sel = parse_selector(CHAPTER_PARAGRAPHS)?;
    let paragraphs: Vec<String> = doc
        .select(&p_sel)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect();
    Ok(paragraphs.join(" "))
}

/// Extract the part listing from a story main page, in document order.
///
/// An item missing a title or link yields an empty string for that field
/// rather than being skipped. A page without the listing container yields an
/// empty sequence.
pub fn parse_story_parts(html: &str) -> Result<Vec<StoryPart>, ScraperError> {
    let doc = Html::parse_document(html);
    let container_sel = parse_selector(PARTS_CONTAINER)?;
    let li_sel = parse_selector(PART_ITEM)?;
    let title_sel = parse_selector(PART_TITLE)?;
    let a_sel = parse_selector(PART_LINK)?;

    let mut parts = Vec::new();
    if let Some(container) = doc.select(&container_sel).next() {
        for li in container.select(&li_sel) {
            let title = select_text(&li, &title_sel);
            let link = li
                .select(&a_sel)
                .next()
                .and_then(|a| a.value().attr("href"))
                .map(resolve_link)
                .unwrap_or_default();
            parts.push(StoryPart { title, link });
        }
    }
    Ok(parts)
}

/// Extract search results from a results page, one per story card, in
/// document order. The card element is itself the anchor; its href becomes
/// the story link. Stats are matched by label text, case-insensitively,
/// against reads/votes/parts; unmatched or absent stats stay empty.
pub fn parse_search_results(html: &str) -> Result<Vec<SearchResult>, ScraperError> {
    let doc = Html::parse_document(html);
    let card_sel = parse_selector(STORY_CARD)?;
    let title_sel = parse_selector(CARD_TITLE)?;
    let desc_sel = parse_selector(CARD_DESCRIPTION)?;
    let thumb_sel = parse_selector(CARD_THUMBNAIL)?;
    let stat_sel = parse_selector(CARD_STAT_ITEM)?;
    let label_sel = parse_selector(STAT_LABEL)?;
    let value_sel = parse_selector(STAT_VALUE)?;
    let author_sel = parse_selector(CARD_AUTHOR)?;

    let mut results = Vec::new();
    for card in doc.select(&card_sel) {
        let link = card
            .value()
            .attr("href")
            .map(resolve_link)
            .unwrap_or_default();
        let thumbnail = card
            .select(&thumb_sel)
            .next()
            .and_then(|img| img.value().attr("src"))
            .unwrap_or_default()
            .to_string();

        let mut reads = String::new();
        let mut votes = String::new();
        let mut parts = String::new();
        for stat in card.select(&stat_sel) {
            let label = select_text(&stat, &label_sel).to_lowercase();
            let value = select_text(&stat, &value_sel);
            match label.as_str() {
                "reads" => reads = value,
                "votes" => votes = value,
                "parts" => parts = value,
                _ => {}
            }
        }

        results.push(SearchResult {
            title: select_text(&card, &title_sel),
            author: select_text(&card, &author_sel),
            link,
            thumbnail,
            reads,
            votes,
            parts,
            description: select_text(&card, &desc_sel),
        });
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chapter_text_joins_trimmed_paragraphs_in_order() -> Result<(), ScraperError> {
        let html = r#"<html><body>
<p data-p-id="a1">  First paragraph.  </p>
<p>Not chapter text.</p>
<p data-p-id="b2">Second paragraph.</p>
<p data-p-id="c3">
Third.
</p>
</body></html>"#;
        let text = parse_chapter_text(html)?;
        assert_eq!(text, "First paragraph. Second paragraph. Third.");
        Ok(())
    }

    #[test]
    fn chapter_text_empty_when_no_marked_paragraphs() -> Result<(), ScraperError> {
        let html = "<html><body><p>plain</p><div>other</div></body></html>";
        assert_eq!(parse_chapter_text(html)?, "");
        assert_eq!(parse_chapter_text("")?, "");
        Ok(())
    }

    #[test]
    fn story_parts_in_document_order_with_origin_prefix() -> Result<(), ScraperError> {
        let html = r#"<html><body>
<div class="table-of-contents"><div class="story-parts"><ul>
<li><div class="part-title">Part 1</div><a href="/100-part-1"></a></li>
<li><div class="part-title">Part 2</div><a href="/101-part-2"></a></li>
</ul></div></div>
</body></html>"#;
        let parts = parse_story_parts(html)?;
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].title, "Part 1");
        assert_eq!(parts[0].link, "https://www.wattpad.com/100-part-1");
        assert_eq!(parts[1].title, "Part 2");
        assert_eq!(parts[1].link, "https://www.wattpad.com/101-part-2");
        Ok(())
    }

    #[test]
    fn story_part_missing_title_or_link_yields_empty_field() -> Result<(), ScraperError> {
        let html = r#"<div class="table-of-contents"><div class="story-parts"><ul>
<li><a href="/100-untitled"></a></li>
<li><div class="part-title">No link here</div></li>
</ul></div></div>"#;
        let parts = parse_story_parts(html)?;
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].title, "");
        assert_eq!(parts[0].link, "https://www.wattpad.com/100-untitled");
        assert_eq!(parts[1].title, "No link here");
        assert_eq!(parts[1].link, "");
        Ok(())
    }

    #[test]
    fn story_parts_empty_when_container_missing() -> Result<(), ScraperError> {
        let parts = parse_story_parts("<html><body><ul><li>x</li></ul></body></html>")?;
        assert!(parts.is_empty());
        Ok(())
    }

    #[test]
    fn story_part_absolute_href_kept_as_is() -> Result<(), ScraperError> {
        let html = r#"<div class="table-of-contents"><div class="story-parts"><ul>
<li><div class="part-title">P</div><a href="https://www.wattpad.com/300-p"></a></li>
</ul></div></div>"#;
        let parts = parse_story_parts(html)?;
        assert_eq!(parts[0].link, "https://www.wattpad.com/300-p");
        Ok(())
    }

    fn search_fixture() -> &'static str {
        r#"<html><body>
<a class="story-card" href="/story/100-the-storm">
  <div class="cover"><img src="https://img.wattpad.com/cover/100.jpg"/></div>
  <div class="title">The Storm</div>
  <div class="username">stormwriter</div>
  <div class="new-story-stats">
    <div class="stats-item"><span class="stats-label__text">Reads</span><span class="stats-value">1.2M</span></div>
    <div class="stats-item"><span class="stats-label__text">Votes</span><span class="stats-value">45.1K</span></div>
    <div class="stats-item"><span class="stats-label__text">Parts</span><span class="stats-value">32</span></div>
  </div>
  <div class="description">A story about a storm.</div>
</a>
<a class="story-card" href="/story/200-calm">
  <div class="cover"></div>
  <div class="title">Calm</div>
  <div class="username">quietone</div>
  <div class="new-story-stats">
    <div class="stats-item"><span class="stats-label__text">Reads</span><span class="stats-value">300</span></div>
    <div class="stats-item"><span class="stats-label__text">Parts</span><span class="stats-value">5</span></div>
  </div>
  <div class="description">No votes stat on this card.</div>
</a>
</body></html>"#
    }

    #[test]
    fn search_results_in_card_order_with_all_fields() -> Result<(), ScraperError> {
        let results = parse_search_results(search_fixture())?;
        assert_eq!(results.len(), 2);
        let first = &results[0];
        assert_eq!(first.title, "The Storm");
        assert_eq!(first.author, "stormwriter");
        assert_eq!(first.link, "https://www.wattpad.com/story/100-the-storm");
        assert_eq!(first.thumbnail, "https://img.wattpad.com/cover/100.jpg");
        assert_eq!(first.reads, "1.2M");
        assert_eq!(first.votes, "45.1K");
        assert_eq!(first.parts, "32");
        assert_eq!(first.description, "A story about a storm.");
        assert_eq!(results[1].title, "Calm");
        Ok(())
    }

    #[test]
    fn search_card_missing_votes_and_thumbnail_yields_empty_strings() -> Result<(), ScraperError> {
        let results = parse_search_results(search_fixture())?;
        let second = &results[1];
        assert_eq!(second.votes, "");
        assert_eq!(second.thumbnail, "");
        assert_eq!(second.reads, "300");
        assert_eq!(second.parts, "5");
        Ok(())
    }

    #[test]
    fn search_stat_labels_match_case_insensitively() -> Result<(), ScraperError> {
        let html = r#"<a class="story-card" href="/story/1-x">
<div class="new-story-stats">
<div class="stats-item"><span class="stats-label__text">READS</span><span class="stats-value">7</span></div>
</div></a>"#;
        let results = parse_search_results(html)?;
        assert_eq!(results[0].reads, "7");
        Ok(())
    }

    #[test]
    fn search_results_idempotent_over_same_fixture() -> Result<(), ScraperError> {
        let first = parse_search_results(search_fixture())?;
        let second = parse_search_results(search_fixture())?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn search_url_encodes_query_as_path_segment() -> Result<(), ScraperError> {
        assert_eq!(
            search_url("time travel")?,
            "https://www.wattpad.com/search/time%20travel"
        );
        assert_eq!(
            search_url("a/b?c")?,
            "https://www.wattpad.com/search/a%2Fb%3Fc"
        );
        Ok(())
    }

    #[test]
    fn chapter_page_url_appends_page_suffix() {
        assert_eq!(
            chapter_page_url("https://www.wattpad.com/12345-chapter", 3),
            "https://www.wattpad.com/12345-chapter/page/3"
        );
    }
}
