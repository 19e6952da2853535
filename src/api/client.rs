//! Rate-limited HTTP client
//!
//! All API traffic goes through [`RestClient::get_json`], which:
//! - attaches the bot-token credential and JSON Accept header,
//! - honors the server's dynamic rate-limit headers by sleeping before the
//!   body of an exhausted response is consumed,
//! - counts every attempt and every failure in the run counters,
//! - returns failures as tagged [`ApiError`] values so callers decide how to
//!   degrade, rather than coercing them to empty data at this layer.

use crate::api::counters::{CounterSnapshot, RunCounters};
use crate::config::{ApiConfig, TOKEN_ENV_VAR};
use crate::{ApiError, ConfigError, ScribeError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Remaining-quota header inspected after every response
const RATELIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// Seconds (possibly fractional) until the quota window resets
const RATELIMIT_RESET_AFTER: &str = "x-ratelimit-reset-after";

/// Authenticated client over the REST API with run-scoped counters
#[derive(Debug, Clone)]
pub struct RestClient {
    http: Client,
    base_url: String,
    counters: Arc<RunCounters>,
}

impl RestClient {
    /// Builds a client from the API configuration
    ///
    /// # Arguments
    ///
    /// * `config` - API access configuration (token, base URL)
    /// * `counters` - Counters the client records attempts and failures into
    ///
    /// # Returns
    ///
    /// * `Ok(RestClient)` - Successfully built client
    /// * `Err(ScribeError)` - Missing token or client construction failure
    pub fn new(config: &ApiConfig, counters: Arc<RunCounters>) -> Result<Self, ScribeError> {
        let token = config
            .token
            .as_deref()
            .ok_or(ConfigError::MissingToken(TOKEN_ENV_VAR))?;

        let mut auth = HeaderValue::from_str(&format!("Bot {}", token)).map_err(|_| {
            ScribeError::Config(ConfigError::Validation(
                "token contains characters not allowed in a header".to_string(),
            ))
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            counters,
        })
    }

    /// Snapshot of the request/error counters for this run
    pub fn counters(&self) -> CounterSnapshot {
        self.counters.snapshot()
    }

    /// Issues one authenticated GET and decodes the JSON body
    ///
    /// When the response reports an exhausted rate-limit window, the call
    /// sleeps for the advertised reset duration before consuming the body.
    /// The response itself is already received at that point; nothing is
    /// retried.
    ///
    /// # Arguments
    ///
    /// * `path` - API path starting with `/`, appended to the base URL
    /// * `query` - URL query parameters
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.counters.record_request();

        let url = format!("{}{}", self.base_url, path);
        let response = match self.http.get(&url).query(query).send().await {
            Ok(response) => response,
            Err(source) => {
                self.counters.record_error();
                tracing::warn!("Request to {} failed: {}", path, source);
                return Err(ApiError::Http {
                    path: path.to_string(),
                    source,
                });
            }
        };

        if let Some(wait) = rate_limit_delay(response.headers()) {
            tracing::info!("Rate limit hit, waiting {}ms", wait.as_millis());
            tokio::time::sleep(wait).await;
        }

        let status = response.status();
        if !status.is_success() {
            self.counters.record_error();
            tracing::warn!("Request to {} returned HTTP {}", path, status);
            return Err(ApiError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(source) => {
                self.counters.record_error();
                tracing::warn!("Failed to read body from {}: {}", path, source);
                return Err(ApiError::Http {
                    path: path.to_string(),
                    source,
                });
            }
        };

        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(e) => {
                self.counters.record_error();
                tracing::warn!("Failed to decode response from {}: {}", path, e);
                Err(ApiError::Decode {
                    path: path.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }
}

/// Computes the required backoff from a response's rate-limit headers
///
/// Returns a delay only when the remaining-quota header is exactly `"0"` and
/// the reset-after header parses to a positive number of seconds.
pub fn rate_limit_delay(headers: &HeaderMap) -> Option<Duration> {
    let remaining = headers.get(RATELIMIT_REMAINING)?.to_str().ok()?;
    if remaining != "0" {
        return None;
    }

    let reset_after: f64 = headers.get(RATELIMIT_RESET_AFTER)?.to_str().ok()?.parse().ok()?;
    if reset_after.is_finite() && reset_after > 0.0 {
        Some(Duration::from_secs_f64(reset_after))
    } else {
        None
    }
}
