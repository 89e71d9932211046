//! Shared error type for the scraping operations.

use thiserror::Error;

/// Failure from the fetch/parse boundary. Carries the failing URL and HTTP
/// status where known so callers are not left with an opaque message.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Invalid URL: {input}: {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("Network error: could not reach {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("HTTP {status} when fetching: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to read response body from {url}: {source}")]
    BodyRead { url: String, source: reqwest::Error },

    #[error("Could not parse page: {message}")]
    ParsePage { message: String },
}
