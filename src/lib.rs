//! wattscrape: library and CLI scraper for Wattpad stories.
//!
//! Three independent, stateless operations: read a chapter across its pages,
//! list a story's parts, and search for stories. Each is a sequential
//! fetch-then-parse pass over the site's HTML.

pub mod cli;
pub mod config;
pub mod model;
pub mod scraper;

// Re-exports for CLI and consumers.
pub use model::{PageContent, SearchResult, StoryPart};
pub use scraper::{
    Fetcher, PoliteClient, PoliteClientBuilder, ReadOutcome, ScraperError, StopReason, StoryClient,
    PAGE_LIMIT,
};
