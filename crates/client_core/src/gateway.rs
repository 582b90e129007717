//! HTTP gateway to the shortening backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{redirect, Client, StatusCode};
use shared::{
    domain::{DeleteOutcome, ShortKey, ShortenResult, UNKNOWN_COUNT},
    error::ShortenerError,
    protocol::{describe_body, PingResponse, ShortenRequest, ShortenResponse},
};
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const EMPTY_INPUT_MESSAGE: &str = "Please enter a valid URL.";
const EMPTY_KEY_MESSAGE: &str = "Please enter a short URL key.";

#[async_trait]
pub trait ShortenerApi: Send + Sync {
    /// Number of stored mappings, or [`UNKNOWN_COUNT`] when it cannot be fetched.
    async fn fetch_count(&self) -> i64;
    async fn shorten(&self, long_url: &str) -> Result<ShortenResult, ShortenerError>;
    async fn remove(&self, key: &ShortKey) -> DeleteOutcome;
    /// Looks up the long URL behind `key`; `None` when the key is unknown.
    async fn resolve(&self, key: &ShortKey) -> Result<Option<String>, ShortenerError>;
}

pub struct HttpShortenerClient {
    http: Client,
    base_url: Url,
}

impl HttpShortenerClient {
    pub fn new(base_url: &str) -> Result<Self, ShortenerError> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ShortenerError> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| ShortenerError::Config(format!("invalid server url {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ShortenerError::Config(format!(
                "server url {base_url} cannot carry a path"
            )));
        }
        // Lookups answer with 302; the redirect target is the payload, not something to follow.
        let http = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| ShortenerError::Config(format!("failed to build http client: {e}")))?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[async_trait]
impl ShortenerApi for HttpShortenerClient {
    async fn fetch_count(&self) -> i64 {
        let response = match self.http.get(self.endpoint(&["ping"])).send().await {
            Ok(response) => response,
            Err(err) => {
                debug!(error = %err, "count fetch failed");
                return UNKNOWN_COUNT;
            }
        };
        match response.json::<PingResponse>().await {
            Ok(PingResponse { count: Some(count) }) => count,
            Ok(PingResponse { count: None }) => UNKNOWN_COUNT,
            Err(err) => {
                debug!(error = %err, "count response was not usable");
                UNKNOWN_COUNT
            }
        }
    }

    async fn shorten(&self, long_url: &str) -> Result<ShortenResult, ShortenerError> {
        let long_url = long_url.trim();
        if long_url.is_empty() {
            return Err(ShortenerError::validation(EMPTY_INPUT_MESSAGE));
        }

        let response = self
            .http
            .post(self.endpoint(&[]))
            .json(&ShortenRequest {
                url: long_url.to_string(),
            })
            .send()
            .await
            .map_err(|e| ShortenerError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ShortenerError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ShortenerError::remote(
                Some(status.as_u16()),
                describe_body(status.as_u16(), &body),
            ));
        }

        let parsed: ShortenResponse = serde_json::from_str(&body).map_err(|e| {
            ShortenerError::remote(Some(status.as_u16()), format!("malformed response: {e}"))
        })?;
        match (parsed.key, parsed.short_url) {
            (Some(key), Some(short_url)) => {
                let created = status == StatusCode::CREATED;
                debug!(key = %key, created, "shortened url");
                Ok(ShortenResult {
                    key: ShortKey(key),
                    short_url,
                    created,
                    long_url: parsed.long_url,
                })
            }
            _ => Err(ShortenerError::remote(
                Some(status.as_u16()),
                describe_body(status.as_u16(), &body),
            )),
        }
    }

    async fn remove(&self, key: &ShortKey) -> DeleteOutcome {
        // A blank key would address the backend root instead of a mapping.
        if key.as_str().trim().is_empty() {
            warn!("delete skipped: blank key");
            return DeleteOutcome::Failed;
        }
        match self
            .http
            .delete(self.endpoint(&[key.as_str()]))
            .send()
            .await
        {
            Ok(response) => {
                let outcome = DeleteOutcome::from_status(response.status().as_u16());
                if outcome == DeleteOutcome::Failed {
                    warn!(key = %key, status = response.status().as_u16(), "delete rejected");
                }
                outcome
            }
            Err(err) => {
                warn!(key = %key, error = %err, "delete request failed");
                DeleteOutcome::Failed
            }
        }
    }

    async fn resolve(&self, key: &ShortKey) -> Result<Option<String>, ShortenerError> {
        if key.as_str().trim().is_empty() {
            return Err(ShortenerError::validation(EMPTY_KEY_MESSAGE));
        }
        let response = self
            .http
            .get(self.endpoint(&[key.as_str()]))
            .send()
            .await
            .map_err(|e| ShortenerError::Network(e.to_string()))?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if status.is_redirection() {
            let location = response
                .headers()
                .get(reqwest::header::LOCATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            return match location {
                Some(location) => Ok(Some(location)),
                None => Err(ShortenerError::remote(
                    Some(status.as_u16()),
                    "redirect without location",
                )),
            };
        }
        let body = response.text().await.unwrap_or_default();
        Err(ShortenerError::remote(
            Some(status.as_u16()),
            describe_body(status.as_u16(), &body),
        ))
    }
}

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod tests;
