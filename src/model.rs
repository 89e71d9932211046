//! Records returned by the scraping operations.
//!
//! All three are plain immutable values produced fresh per call; nothing is
//! shared or persisted. Serialized field names match what consumers of the
//! original package see (camelCase `pageNumber`).

use serde::{Deserialize, Serialize};

/// One fetched page of a chapter, in ascending page order with no gaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    /// 1-based page number within the chapter.
    #[serde(rename = "pageNumber")]
    pub page_number: u32,
    /// Full URL the page was fetched from (`{chapter_url}/page/{n}`).
    pub url: String,
    /// Trimmed paragraph texts joined with single spaces.
    pub content: String,
}

/// One entry of a story's part (chapter) listing, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryPart {
    pub title: String,
    /// Absolute URL; empty if the listing item had no link.
    pub link: String,
}

/// One search-result story card, in document order.
///
/// The stat fields (`reads`, `votes`, `parts`) are kept as the raw display
/// strings the site renders (e.g. "1.2M"), not parsed into numbers. A card
/// missing a sub-field yields an empty string for it, never a skipped card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub author: String,
    pub link: String,
    pub thumbnail: String,
    pub reads: String,
    pub votes: String,
    pub parts: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn page_content_serializes_with_camel_case_page_number() -> Result<(), Box<dyn Error>> {
        let page = PageContent {
            page_number: 3,
            url: "https://www.wattpad.com/12345-chapter/page/3".to_string(),
            content: "First paragraph. Second paragraph.".to_string(),
        };
        let json = serde_json::to_string(&page)?;
        assert!(json.contains("\"pageNumber\":3"));
        assert!(!json.contains("page_number"));
        let parsed: PageContent = serde_json::from_str(&json)?;
        assert_eq!(parsed, page);
        Ok(())
    }

    #[test]
    fn search_result_round_trips_all_fields() -> Result<(), Box<dyn Error>> {
        let result = SearchResult {
            title: "The Storm".to_string(),
            author: "stormwriter".to_string(),
            link: "https://www.wattpad.com/story/100-the-storm".to_string(),
            thumbnail: "https://img.wattpad.com/cover/100.jpg".to_string(),
            reads: "1.2M".to_string(),
            votes: "45.1K".to_string(),
            parts: "32".to_string(),
            description: "A story about a storm.".to_string(),
        };
        let json = serde_json::to_string(&result)?;
        let value: serde_json::Value = serde_json::from_str(&json)?;
        let obj = value.as_object().expect("root must be object");
        for key in [
            "title",
            "author",
            "link",
            "thumbnail",
            "reads",
            "votes",
            "parts",
            "description",
        ] {
            assert!(obj.contains_key(key), "missing {}", key);
        }
        let parsed: SearchResult = serde_json::from_str(&json)?;
        assert_eq!(parsed, result);
        Ok(())
    }

    #[test]
    fn story_part_serializes_title_and_link() -> Result<(), Box<dyn Error>> {
        let part = StoryPart {
            title: "Part 1 - The Beginning".to_string(),
            link: "https://www.wattpad.com/200-part-1".to_string(),
        };
        let json = serde_json::to_string(&part)?;
        assert!(json.contains("\"title\":\"Part 1 - The Beginning\""));
        assert!(json.contains("\"link\":\"https://www.wattpad.com/200-part-1\""));
        Ok(())
    }
}
