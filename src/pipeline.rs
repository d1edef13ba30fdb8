//! Extraction pipeline driver
//!
//! Fetch, then run the strategy cascade — structured data, meta tags,
//! heuristics — merging each stage's output into fields the earlier stages
//! left unset, and finish with normalization. Each scrape is a pure
//! function of the URL and the fetched bytes; nothing is cached or shared
//! between calls.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::dom::Dom;
use crate::error::ScrapeError;
use crate::extractors::{
    extract_heuristics, extract_meta_tags, extract_structured_data, FieldSet,
};
use crate::fetch::{self, ScrapeConfig};

/// Terminal default when no strategy finds a title.
pub const UNKNOWN_TITLE: &str = "Unknown Product";

/// The only failure signal callers see.
const FAILURE_MESSAGE: &str = "Failed to scrape";

/// RPC-boundary input: the product page to analyze.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionRequest {
    pub url: String,
}

/// Normalized scrape output. Display fields are always present (possibly
/// empty); `error` is set only on total failure, in which case the JSON
/// shape carries no `product_url`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExtractionResult {
    pub title: String,
    pub price: String,
    pub image_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub product_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractionResult {
    /// The well-formed total-failure shape: empty display fields plus the
    /// failure message, rather than a transport-level error.
    pub fn failure() -> Self {
        Self {
            title: String::new(),
            price: String::new(),
            image_url: String::new(),
            product_url: String::new(),
            error: Some(FAILURE_MESSAGE.to_string()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Scrape with default configuration. Never fails: any pipeline error
/// becomes the failure-shaped result.
pub async fn scrape(url: &str) -> ExtractionResult {
    scrape_with(&ScrapeConfig::default(), url).await
}

/// Scrape with explicit configuration. Never fails; see [`try_scrape`] for
/// the error-reporting variant.
pub async fn scrape_with(config: &ScrapeConfig, url: &str) -> ExtractionResult {
    match try_scrape(config, url).await {
        Ok(result) => result,
        Err(e) => {
            warn!(url, error = %e, "scrape failed");
            ExtractionResult::failure()
        }
    }
}

/// Boundary entry point for deserialized requests.
pub async fn scrape_request(config: &ScrapeConfig, request: &ExtractionRequest) -> ExtractionResult {
    scrape_with(config, &request.url).await
}

/// Fetch and extract, surfacing the error classification instead of the
/// failure-shaped result.
pub async fn try_scrape(config: &ScrapeConfig, url: &str) -> Result<ExtractionResult, ScrapeError> {
    validate_url(url)?;
    let html = fetch::fetch_html(config, url).await?;
    Ok(extract_from_html(url, &html))
}

/// Blocking counterpart of [`scrape_with`], for callers without an async
/// runtime. Never fails.
pub fn scrape_blocking(config: &ScrapeConfig, url: &str) -> ExtractionResult {
    let attempt = || -> Result<ExtractionResult, ScrapeError> {
        validate_url(url)?;
        let html = fetch::fetch_html_blocking(config, url)?;
        Ok(extract_from_html(url, &html))
    };

    match attempt() {
        Ok(result) => result,
        Err(e) => {
            warn!(url, error = %e, "scrape failed");
            ExtractionResult::failure()
        }
    }
}

/// Run the strategy cascade over already-fetched bytes. Pure: no I/O, no
/// shared state. Later stages run only while fields are still missing.
pub fn extract_from_html(url: &str, html: &str) -> ExtractionResult {
    let dom = Dom::parse(html);

    let mut fields = extract_structured_data(&dom);
    debug!(?fields, "structured-data stage");

    if !fields.is_complete() {
        fields.merge_missing(extract_meta_tags(&dom));
        debug!(?fields, "meta-tag stage");
    }
    if !fields.is_complete() {
        fields.merge_missing(extract_heuristics(&dom));
        debug!(?fields, "heuristic stage");
    }

    normalize(url, fields)
}

fn validate_url(url: &str) -> Result<(), ScrapeError> {
    if url.trim().is_empty() {
        return Err(ScrapeError::InvalidInput);
    }
    Url::parse(url).map_err(|_| ScrapeError::InvalidInput)?;
    Ok(())
}

/// Final pass: trim strings, resolve root-relative images against the page
/// origin, apply terminal defaults. Applying it twice is a no-op.
fn normalize(url: &str, fields: FieldSet) -> ExtractionResult {
    let title = fields
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string());

    let price = fields
        .price
        .map(|p| p.trim().to_string())
        .unwrap_or_default();

    // Empty image stays empty: the caller offers a manual upload instead.
    let image_url = fields
        .image
        .map(|i| resolve_image_url(url, i))
        .unwrap_or_default();

    ExtractionResult {
        title,
        price,
        image_url,
        product_url: url.to_string(),
        error: None,
    }
}

/// Rewrite a root-relative image path to an absolute URL on the page's
/// scheme and host. Anything else passes through untouched.
fn resolve_image_url(page_url: &str, image: String) -> String {
    if !image.starts_with('/') {
        return image;
    }

    let Ok(base) = Url::parse(page_url) else {
        return image;
    };
    let Some(host) = base.host_str() else {
        return image;
    };

    match base.port() {
        Some(port) => format!("{}://{}:{}{}", base.scheme(), host, port, image),
        None => format!("{}://{}{}", base.scheme(), host, image),
    }
}
