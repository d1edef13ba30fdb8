//! Best-effort product metadata extraction from arbitrary shop pages
//!
//! Given a product-page URL, fetch the HTML with a browser-like request
//! signature and guess the product's title, price, and image through a
//! cascade of fallback strategies:
//! - JSON-LD structured data (schema.org Product / ItemPage)
//! - Open Graph / Twitter Card / product: meta tags
//! - Heuristics: price-shaped text patterns and the largest declared image
//!
//! Each later stage only fills fields the earlier stages left missing.
//! Output is always a well-formed [`ExtractionResult`]; only a bad URL or
//! a failed fetch counts as failure, and even that is returned as a value
//! with its `error` field set so callers can show an editable preview.

pub mod dom;
pub mod error;
pub mod extractors;
pub mod fetch;
pub mod pipeline;

pub use error::ScrapeError;
pub use fetch::ScrapeConfig;
pub use pipeline::{
    extract_from_html, scrape, scrape_blocking, scrape_request, scrape_with, try_scrape,
    ExtractionRequest, ExtractionResult,
};
