//! HTTP retrieval of feed documents with timeout and exponential backoff.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use std::time::Duration;
use thiserror::Error;

/// Accept header covering both feed flavors plus generic XML fallbacks.
const ACCEPT_FEEDS: &str =
    "application/rss+xml, application/atom+xml, application/xml, text/xml, */*";

/// Errors that can occur while fetching a feed document.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The attempt exceeded the per-attempt timeout and was aborted.
    #[error("request timed out")]
    Timeout,
    /// Network-level error (DNS, connection, TLS, body read, etc.)
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with a non-2xx status code
    #[error("HTTP {status}: {reason}")]
    HttpStatus { status: u16, reason: String },
    /// All attempts failed; carries the attempt count and last failure reason.
    #[error("fetch failed after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: String },
}

/// Per-feed retry behavior. Each attempt is bounded by `timeout`; failed
/// attempts back off `500ms * 2^(attempt-1)` before the next try.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub retries: u32,
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            timeout: Duration::from_secs(15),
        }
    }
}

/// Build the shared HTTP client: feed Accept header, distinguishing
/// User-Agent, redirects followed (reqwest default).
pub fn build_client(user_agent: &str) -> Result<reqwest::Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_FEEDS));
    reqwest::Client::builder()
        .user_agent(user_agent.to_string())
        .default_headers(headers)
        .build()
}

/// Fetch a feed document as text, retrying transient failures.
///
/// Timeouts, connection errors, and non-2xx responses all count as failed
/// attempts. Backoff between attempts is exponential with no jitter (500ms,
/// 1s, 2s, ...). After the final attempt the error is aggregated into
/// [`FetchError::RetriesExhausted`]; callers are expected to treat that as a
/// per-feed failure, not a pipeline failure.
pub async fn fetch_with_retry(
    client: &reqwest::Client,
    url: &str,
    policy: &RetryPolicy,
) -> Result<String, FetchError> {
    let mut last = String::from("no attempts were made");

    for attempt in 1..=policy.retries {
        match fetch_once(client, url, policy.timeout).await {
            Ok(body) => return Ok(body),
            Err(e) => {
                last = e.to_string();
                if attempt < policy.retries {
                    let delay = Duration::from_millis(500 * 2u64.pow(attempt - 1));
                    tracing::warn!(
                        url = url,
                        attempt = attempt,
                        retries = policy.retries,
                        error = %last,
                        delay_ms = delay.as_millis() as u64,
                        "Fetch attempt failed, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    Err(FetchError::RetriesExhausted {
        attempts: policy.retries,
        last,
    })
}

/// One bounded attempt: the timeout covers the whole request including
/// reading the body, and aborts the in-flight request on expiry.
async fn fetch_once(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<String, FetchError> {
    tokio::time::timeout(timeout, async {
        let response = client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }
        Ok(response.text().await?)
    })
    .await
    .map_err(|_| FetchError::Timeout)?
}
