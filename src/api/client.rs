// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::api::probe::RemoteProbe;
use crate::api::token_pool::GithubTokenPool;
use crate::config::IngestConfig;
use crate::error::{IngestError, Result};
use crate::user_agent;
use attohttpc::{RequestBuilder, Response, Session};
use log::{debug, trace, warn};
use retry::{OperationResult, delay::Exponential, retry_with_index};
use serde_json::Value;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const DEFAULT_TIMEOUT: u64 = 30;
const MAX_RETRIES: usize = 3;
const INITIAL_BACKOFF_MS: u64 = 1000;
pub const GITHUB_API_HOST: &str = "api.github.com";
pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// HTTP access for vendor feeds and for artifact probes.
#[derive(Debug, Clone)]
pub struct FeedClient {
    pub(crate) session: Session,
    tokens: Arc<GithubTokenPool>,
    github_api_host: String,
    github_accept: String,
    timeout: Duration,
    max_retries: usize,
    initial_backoff_ms: u64,
}

impl FeedClient {
    pub fn new(tokens: Arc<GithubTokenPool>) -> Self {
        let mut session = Session::new();
        session.header("User-Agent", user_agent::feed_client());
        let timeout = Duration::from_secs(DEFAULT_TIMEOUT);
        session.timeout(timeout);
        session.proxy_settings(attohttpc::ProxySettings::from_env());

        Self {
            session,
            tokens,
            github_api_host: GITHUB_API_HOST.to_string(),
            github_accept: GITHUB_ACCEPT.to_string(),
            timeout,
            max_retries: MAX_RETRIES,
            initial_backoff_ms: INITIAL_BACKOFF_MS,
        }
    }

    pub fn from_config(config: &IngestConfig, tokens: Arc<GithubTokenPool>) -> Self {
        let mut client = Self::new(tokens)
            .with_timeout(Duration::from_secs(config.http.timeout_secs))
            .with_max_retries(config.http.max_retries);
        client.github_accept = config.github.accept.clone();
        client
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.session.timeout(timeout);
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.session.header("User-Agent", user_agent.into());
        self
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_backoff(mut self, initial_backoff_ms: u64) -> Self {
        self.initial_backoff_ms = initial_backoff_ms;
        self
    }

    /// Host whose URLs receive the GitHub accept and authorization headers.
    pub fn with_github_api_host(mut self, host: impl Into<String>) -> Self {
        self.github_api_host = host.into();
        self
    }

    fn is_github_api(&self, url: &str) -> bool {
        url.contains(self.github_api_host.as_str())
    }

    fn get_request(&self, url: &str) -> RequestBuilder {
        let mut request = self.session.get(url);
        if self.is_github_api(url) {
            request = request.header("Accept", self.github_accept.as_str());
            if let Some(authorization) = self.tokens.next_authorization() {
                request = request.header("Authorization", authorization);
            }
        }
        request
    }

    /// GETs `url` and decodes the body as JSON.
    ///
    /// Non-success statuses, transport failures and malformed bodies are all
    /// reported as [`IngestError::FeedUnavailable`].
    pub fn fetch_json(&self, url: &str) -> Result<Value> {
        debug!("Fetching feed {url}");
        let response = self.send_with_retry(url, || self.get_request(url))?;

        if !response.is_success() {
            let status = response.status();
            return Err(IngestError::FeedUnavailable {
                url: url.to_string(),
                reason: format!(
                    "HTTP {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown error")
                ),
            });
        }

        let body = response.text().map_err(|e| IngestError::FeedUnavailable {
            url: url.to_string(),
            reason: format!("failed to read response body: {e}"),
        })?;
        trace!("Feed {url} returned {} bytes", body.len());

        serde_json::from_str(&body).map_err(|e| IngestError::FeedUnavailable {
            url: url.to_string(),
            reason: format!("malformed JSON: {e}"),
        })
    }

    /// Release documents of a feed: a top-level array yields its elements, a single
    /// object yields itself. Any failure is logged and yields nothing.
    pub fn fetch_feed(&self, url: &str) -> Vec<Value> {
        match self.fetch_json(url) {
            Ok(Value::Array(releases)) => releases,
            Ok(release @ Value::Object(_)) => vec![release],
            Ok(other) => {
                warn!("Ignoring feed {url}: unexpected top-level JSON {}", json_kind(&other));
                Vec::new()
            }
            Err(e) => {
                warn!("{e}");
                Vec::new()
            }
        }
    }

    fn send_with_retry<F>(&self, url: &str, request_builder: F) -> Result<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        // Attempts are numbered from 1; the first try is not a retry.
        let retries = self.max_retries as u64;
        let result = retry_with_index(
            Exponential::from_millis(self.initial_backoff_ms).take(self.max_retries),
            |current_try| {
                let response = match request_builder().send() {
                    Ok(resp) => resp,
                    Err(e) => {
                        let error = IngestError::FeedUnavailable {
                            url: url.to_string(),
                            reason: format!("network error: {e}"),
                        };
                        if current_try <= retries {
                            debug!("Retrying {url} after network error: {e}");
                            return OperationResult::Retry(error);
                        }
                        return OperationResult::Err(error);
                    }
                };

                if response.status() == attohttpc::StatusCode::TOO_MANY_REQUESTS
                    && current_try <= retries
                {
                    if let Some(seconds) = response
                        .headers()
                        .get("Retry-After")
                        .and_then(|value| value.to_str().ok())
                        .and_then(|value| value.parse::<u64>().ok())
                    {
                        // Never wait longer than a single request may take
                        let wait = Duration::from_secs(seconds).min(self.timeout);
                        debug!("Rate limited on {url}, waiting {wait:?}");
                        thread::sleep(wait);
                    }
                    return OperationResult::Retry(IngestError::FeedUnavailable {
                        url: url.to_string(),
                        reason: "too many requests".to_string(),
                    });
                }

                OperationResult::Ok(response)
            },
        );

        result.map_err(|e| e.error)
    }

    fn head(&self, url: &str) -> Option<Response> {
        match self.session.head(url).send() {
            Ok(response) => Some(response),
            Err(e) => {
                debug!("Probe of {url} failed: {e}");
                None
            }
        }
    }
}

impl RemoteProbe for FeedClient {
    fn exists(&self, url: &str) -> bool {
        let exists = self.head(url).is_some_and(|response| response.is_success());
        trace!("Probe {url}: exists={exists}");
        exists
    }

    fn file_size(&self, url: &str) -> Option<u64> {
        let response = self.head(url)?;
        if !response.is_success() {
            return None;
        }
        response
            .headers()
            .get("Content-Length")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok())
    }
}

impl Default for FeedClient {
    fn default() -> Self {
        Self::new(Arc::new(GithubTokenPool::empty()))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
