//! Product-page fetching
//!
//! One GET with a browser-like request signature, no retries. The async
//! path uses reqwest; `fetch_html_blocking` mirrors it over ureq for
//! callers without a runtime. A fresh client is built per call — the
//! pipeline keeps no shared state between scrapes.

use std::time::Duration;

use tracing::debug;

use crate::error::ScrapeError;

const DESKTOP_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Request signature and deadline for the fetch stage.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    /// Bound on the whole request. A hung third-party site fails the scrape
    /// with a timeout classification instead of hanging the caller.
    pub timeout: Duration,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            user_agent: DESKTOP_UA.to_string(),
            accept: ACCEPT.to_string(),
            accept_language: ACCEPT_LANGUAGE.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Fetch the page body as text. Non-2xx statuses and transport failures
/// abort with `FetchFailed`; deadline overruns with `FetchTimeout`.
pub async fn fetch_html(config: &ScrapeConfig, url: &str) -> Result<String, ScrapeError> {
    let client = reqwest::Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|e| ScrapeError::FetchFailed(e.to_string()))?;

    let response = client
        .get(url)
        .header("User-Agent", &config.user_agent)
        .header("Accept", &config.accept)
        .header("Accept-Language", &config.accept_language)
        .send()
        .await
        .map_err(|e| classify_reqwest_error(e, config.timeout))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::FetchFailed(format!("HTTP {}", status)));
    }

    let body = response
        .text()
        .await
        .map_err(|e| classify_reqwest_error(e, config.timeout))?;
    debug!(bytes = body.len(), %status, url, "fetched product page");
    Ok(body)
}

/// Blocking variant of [`fetch_html`] using ureq.
pub fn fetch_html_blocking(config: &ScrapeConfig, url: &str) -> Result<String, ScrapeError> {
    let agent = ureq::Agent::new_with_config(
        ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .user_agent(&config.user_agent)
            .build(),
    );

    match agent
        .get(url)
        .header("Accept", &config.accept)
        .header("Accept-Language", &config.accept_language)
        .call()
    {
        Ok(resp) => {
            let status = resp.status();
            if !status.is_success() {
                return Err(ScrapeError::FetchFailed(format!("HTTP {}", status)));
            }
            let body = resp
                .into_body()
                .read_to_string()
                .map_err(|e| ScrapeError::FetchFailed(e.to_string()))?;
            debug!(bytes = body.len(), %status, url, "fetched product page");
            Ok(body)
        }
        Err(ureq::Error::StatusCode(code)) => {
            Err(ScrapeError::FetchFailed(format!("HTTP {}", code)))
        }
        Err(ureq::Error::Timeout(_)) => Err(ScrapeError::FetchTimeout(config.timeout)),
        Err(e) => Err(ScrapeError::FetchFailed(e.to_string())),
    }
}

fn classify_reqwest_error(error: reqwest::Error, timeout: Duration) -> ScrapeError {
    if error.is_timeout() {
        ScrapeError::FetchTimeout(timeout)
    } else {
        ScrapeError::FetchFailed(error.to_string())
    }
}
