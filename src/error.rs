//! Error taxonomy for the scrape pipeline
//!
//! Only two conditions abort a scrape: a bad input URL and a failed fetch.
//! Everything downstream of the fetch degrades to partial or empty fields.

use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// The caller passed an empty or unparseable URL. No fetch is attempted.
    #[error("missing or empty url")]
    InvalidInput,

    /// Non-2xx response or network-level failure while fetching the page.
    #[error("fetch failed: {0}")]
    FetchFailed(String),

    /// The fetch exceeded the configured deadline.
    #[error("fetch timed out after {0:?}")]
    FetchTimeout(Duration),
}
