//! Scraping operations. Client over a fetch boundary, structured pagination
//! outcome, and the Wattpad parsing module.

mod client;
mod error;

pub mod wattpad;

pub use client::{Fetcher, PoliteClient, PoliteClientBuilder};
pub use error::ScraperError;

use crate::model::{PageContent, SearchResult, StoryPart};

/// Hard ceiling on chapter pages fetched per `read` call.
pub const PAGE_LIMIT: u32 = 99;

/// Why a paginated read stopped. Lets callers tell "site has no more pages"
/// from "a fetch failed mid-sequence" without the library logging anything.
#[derive(Debug)]
pub enum StopReason {
    /// Page `page` had no chapter paragraphs; pages beyond it were not tried.
    NoMoreContent { page: u32 },
    /// All pages up to [PAGE_LIMIT] had content.
    PageLimit,
    /// Fetching or parsing page `page` failed; earlier pages were kept.
    Failed { page: u32, error: ScraperError },
}

/// Outcome of a paginated read: the collected pages (a prefix of the
/// chapter's page sequence, possibly empty) and the reason the loop stopped.
#[derive(Debug)]
pub struct ReadOutcome {
    pub pages: Vec<PageContent>,
    pub stop: StopReason,
}

/// Stateless scraping client over a fetch boundary.
///
/// Each operation is an independent fetch-then-parse pass; nothing is shared
/// across calls. The default fetcher is a [PoliteClient] whose inter-request
/// delay provides the pause between chapter pages.
pub struct StoryClient<F = PoliteClient> {
    fetcher: F,
}

impl StoryClient<PoliteClient> {
    /// Client with default politeness settings (1 s delay, 30 s timeout).
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self {
            fetcher: PoliteClient::new()?,
        })
    }
}

impl<F: Fetcher> StoryClient<F> {
    /// Client over a custom fetcher (a configured [PoliteClient], or an
    /// in-memory fetcher in tests).
    pub fn with_fetcher(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Read a chapter across all of its pages.
    ///
    /// Fetches `{initial_url}/page/{n}` for n = 1.. strictly sequentially,
    /// collecting each page's paragraph text until a page comes back empty,
    /// a fetch or parse fails, or [PAGE_LIMIT] is reached. A failure on page
    /// n is not an error: the pages collected for earlier n are returned,
    /// with the failure recorded in the stop reason. The sequence is
    /// non-empty only if page 1 yields content.
    pub fn read(&mut self, initial_url: &str) -> ReadOutcome {
        self.read_with_progress(initial_url, None)
    }

    /// Like [read](Self::read), invoking `progress` with each page number
    /// before that page is fetched.
    pub fn read_with_progress(
        &mut self,
        initial_url: &str,
        progress: Option<&dyn Fn(u32)>,
    ) -> ReadOutcome {
        let mut pages = Vec::new();
        for n in 1..=PAGE_LIMIT {
            if let Some(p) = progress {
                p(n);
            }
            let url = wattpad::chapter_page_url(initial_url, n);
            let content = match self
                .fetcher
                .fetch(&url)
                .and_then(|html| wattpad::parse_chapter_text(&html))
            {
                Ok(content) => content,
                Err(error) => {
                    return ReadOutcome {
                        pages,
                        stop: StopReason::Failed { page: n, error },
                    }
                }
            };
            if content.is_empty() {
                return ReadOutcome {
                    pages,
                    stop: StopReason::NoMoreContent { page: n },
                };
            }
            pages.push(PageContent {
                page_number: n,
                url,
                content,
            });
        }
        ReadOutcome {
            pages,
            stop: StopReason::PageLimit,
        }
    }

    /// All parts (chapters) of a story, from its main page, in listing order.
    pub fn parts(&mut self, url: &str) -> Result<Vec<StoryPart>, ScraperError> {
        let html = self.fetcher.fetch(url)?;
        wattpad::parse_story_parts(&html)
    }

    /// Search for stories, in result-card order.
    pub fn search(&mut self, query: &str) -> Result<Vec<SearchResult>, ScraperError> {
        let url = wattpad::search_url(query)?;
        let html = self.fetcher.fetch(&url)?;
        wattpad::parse_search_results(&html)
    }
}
