//! Request plumbing shared by every endpoint adapter: URL building, the
//! browser-like header set the public API expects, status mapping and retries.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, trace, warn};
use serde_json::Value;

use crate::http_client::{HttpClient, HttpErrorKind, HttpRequest, HttpResponse};
use crate::retry::RetryConfig;
use crate::FetchError;

const API_PREFIX: &str = "/vanoms-be-core/rest/api/bymadata/free/";
const DOWNLOAD_PREFIX: &str = "/vanoms-be-core/rest/api/bymadata/free/sba/download/";

const BROWSER_HEADERS: [(&str, &str); 10] = [
    ("connection", "keep-alive"),
    (
        "sec-ch-ua",
        r#"" Not A;Brand";v="99", "Chromium";v="96", "Google Chrome";v="96""#,
    ),
    ("accept", "application/json, text/plain, */*"),
    ("sec-ch-ua-mobile", "?0"),
    (
        "user-agent",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/96.0.4664.93 Safari/537.36",
    ),
    ("sec-ch-ua-platform", r#""Windows""#),
    ("sec-fetch-site", "same-origin"),
    ("sec-fetch-mode", "cors"),
    ("sec-fetch-dest", "empty"),
    ("accept-language", "es-US,es-419;q=0.9,es;q=0.8,en;q=0.7"),
];

/// HTTP transport bound to one API host.
#[derive(Clone)]
pub struct Transport {
    http: Arc<dyn HttpClient>,
    base_url: String,
    timeout: Duration,
    retry: RetryConfig,
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl Transport {
    pub fn new(
        http: Arc<dyn HttpClient>,
        base_url: impl Into<String>,
        timeout: Duration,
        retry: RetryConfig,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            timeout,
            retry,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn retry(&self) -> &RetryConfig {
        &self.retry
    }

    /// `{base}/vanoms-be-core/rest/api/bymadata/free/{endpoint}`
    pub fn api_url(&self, endpoint: &str) -> String {
        format!("{}{API_PREFIX}{endpoint}", self.base_url)
    }

    /// Public download link for a filing or announcement attachment.
    pub fn download_url(&self, file: &str) -> String {
        format!("{}{DOWNLOAD_PREFIX}{file}", self.base_url)
    }

    pub fn site_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// POST a JSON payload to an API endpoint.
    pub async fn post_json(&self, endpoint: &str, payload: &Value) -> Result<String, FetchError> {
        let request = self
            .request(HttpRequest::post(self.api_url(endpoint)))
            .with_header("content-type", "application/json")
            .with_body(payload.to_string());
        self.send(endpoint, request).await
    }

    /// GET an API endpoint; `query` is appended verbatim.
    pub async fn get_api(&self, endpoint: &str, query: &str) -> Result<String, FetchError> {
        let url = if query.is_empty() {
            self.api_url(endpoint)
        } else {
            format!("{}?{query}", self.api_url(endpoint))
        };
        self.send(endpoint, self.request(HttpRequest::get(url))).await
    }

    /// GET a path relative to the site root.
    pub async fn get_site(&self, path: &str) -> Result<String, FetchError> {
        self.send(path, self.request(HttpRequest::get(self.site_url(path))))
            .await
    }

    fn request(&self, request: HttpRequest) -> HttpRequest {
        let referer = format!("{}/", self.base_url);
        request
            .with_headers(BROWSER_HEADERS)
            .with_header("origin", self.base_url.as_str())
            .with_header("referer", referer)
            .with_timeout(self.timeout)
    }

    async fn send(&self, label: &str, request: HttpRequest) -> Result<String, FetchError> {
        let attempts = self.retry.attempts();
        let mut attempt = 0;

        loop {
            debug!(
                "{} {} (attempt {}/{attempts})",
                request.method.as_str(),
                request.url,
                attempt + 1
            );

            let (error, retry_allowed) = match self.http.execute(request.clone()).await {
                Ok(response) if response.is_success() => {
                    trace!("{label} response body: {}", response.body);
                    return Ok(response.body);
                }
                Ok(HttpResponse { status, .. }) => (
                    FetchError::from_status(status),
                    self.retry.should_retry_status(status),
                ),
                Err(error) => {
                    let retry_allowed = self.retry.enabled
                        && match error.kind() {
                            HttpErrorKind::Timeout => self.retry.retry_on_timeout,
                            HttpErrorKind::Connect => self.retry.retry_on_connect,
                            HttpErrorKind::Other => true,
                        };
                    let mapped = if error.is_timeout() {
                        FetchError::timeout(error.message())
                    } else {
                        FetchError::unavailable(error.message())
                    };
                    (mapped, retry_allowed)
                }
            };

            let error = error.context(label);
            attempt += 1;
            if attempt >= attempts || !retry_allowed || !error.retryable() {
                warn!("request to {label} failed after {attempt} attempt(s): {error}");
                return Err(error);
            }

            let delay = self.retry.delay_for_attempt(attempt - 1);
            warn!("request to {label} failed: {error}; retrying in {delay:?}");
            tokio::time::sleep(delay).await;
        }
    }
}
