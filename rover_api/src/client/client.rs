//! RoVer HTTP client.
//!
//! A [`RoverClient`] owns the API key and the HTTP transport. Opening the
//! client acquires the transport; [`RoverClient::close`] (or simply dropping
//! the client, e.g. on an early `?` return) releases it. Calls take `&self`,
//! so any number of requests can be in flight on one client at once; wrap it
//! in an `Arc` to share it between spawned tasks.

use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, ClientBuilder, Method, Proxy, Response};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::config::ClientConfig;
use crate::error::{map_error_response, ApiError, RoverError};
use crate::types::rate_limit::RateLimitInfo;

/// The HTTP side of a client. Dropped exactly once, when its client goes away.
struct Transport {
    http: Client,
}

impl Drop for Transport {
    fn drop(&mut self) {
        debug!("releasing RoVer HTTP transport");
    }
}

/// Main client to interact with the RoVer API.
pub struct RoverClient {
    pub base_url: String,
    transport: Arc<Transport>,
    /// `None` once the key has been revoked through `delete_api_key`.
    api_key: RwLock<Option<String>>,
    /// Last rate-limit headers seen per bucket. Only recorded, never waited on.
    rate_limits: Mutex<HashMap<String, RateLimitInfo>>,
}

impl Debug for RoverClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoverClient")
            .field("base_url", &self.base_url)
            .field("http", &"reqwest::Client")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl RoverClient {
    /// Open a client with the default configuration for `api_key`.
    pub fn new(api_key: impl Into<String>) -> Result<Self, RoverError> {
        Self::open(ClientConfig::new(api_key))
    }

    /// Validate `config` and acquire the HTTP transport.
    pub fn open(config: ClientConfig) -> Result<Self, RoverError> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = ClientBuilder::new()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .default_headers(headers)
            .user_agent(&config.user_agent)
            .use_rustls_tls();

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(full) = config.proxy_url() {
            let proxy = Proxy::all(&full)
                .map_err(|e| RoverError::Config(format!("invalid proxy `{full}`: {e}")))?;
            builder = builder.proxy(proxy);
        }

        let http = builder.build().map_err(RoverError::Transport)?;
        debug!(base_url = %config.base_url, "opened RoVer client");

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            transport: Arc::new(Transport { http }),
            api_key: RwLock::new(Some(config.api_key)),
            rate_limits: Mutex::new(HashMap::new()),
        })
    }

    /// Release the transport. Equivalent to dropping the client.
    pub fn close(self) {
        drop(self);
    }

    /// Whether `delete_api_key` has revoked the key held by this client.
    pub async fn is_revoked(&self) -> bool {
        self.api_key.read().await.is_none()
    }

    /// Forget the held key; later calls fail with `Authentication`.
    pub(crate) async fn revoke(&self) {
        *self.api_key.write().await = None;
    }

    /// Most recent rate-limit state RoVer reported for `bucket`, from any
    /// response (successful or not) made through this client.
    pub fn rate_limit(&self, bucket: &str) -> Option<RateLimitInfo> {
        self.rate_limits
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(bucket)
            .cloned()
    }

    /// Snapshot of every bucket seen so far.
    pub fn rate_limits(&self) -> HashMap<String, RateLimitInfo> {
        self.rate_limits
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn record_rate_limit(&self, info: RateLimitInfo) {
        if let Some(bucket) = info.bucket.clone() {
            self.rate_limits
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .insert(bucket, info);
        }
    }

    /* ───────────── Convenience wrappers around HTTP verbs ───────────── */

    /// Build an authenticated request, failing locally if the key was revoked.
    async fn authed_request(
        &self,
        method: Method,
        url: &str,
    ) -> Result<reqwest::RequestBuilder, RoverError> {
        let key = self
            .api_key
            .read()
            .await
            .clone()
            .ok_or_else(RoverError::revoked)?;

        Ok(self.transport.http.request(method, url).bearer_auth(key))
    }

    async fn send(&self, method: Method, url: &str) -> Result<Response, RoverError> {
        debug!(%method, url, "sending RoVer request");
        let resp = self.authed_request(method, url).await?.send().await?;
        debug!(status = resp.status().as_u16(), url, "RoVer responded");
        self.record_rate_limit(RateLimitInfo::from_headers(resp.headers()));
        Ok(resp)
    }

    pub async fn authed_get(&self, url: &str) -> Result<Response, RoverError> {
        self.send(Method::GET, url).await
    }

    pub async fn authed_post_empty(&self, url: &str) -> Result<Response, RoverError> {
        self.send(Method::POST, url).await
    }

    pub async fn authed_delete(&self, url: &str) -> Result<Response, RoverError> {
        self.send(Method::DELETE, url).await
    }
}

/// Read the body and decode it as `T` **iff** the status is success;
/// otherwise map it onto [`RoverError`].
pub async fn parse_json_if_ok<T: DeserializeOwned>(resp: Response) -> Result<T, RoverError> {
    let status = resp.status();
    let rate_limit = RateLimitInfo::from_headers(resp.headers());
    let bytes = resp.bytes().await?;

    if !status.is_success() {
        return Err(error_for(status, rate_limit, &bytes));
    }

    serde_json::from_slice::<T>(&bytes).map_err(|e| RoverError::Server {
        error: ApiError {
            message: format!("unexpected response shape: {e}"),
            status: Some(status.as_u16()),
            error_code: None,
            detail: None,
        },
        body: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

/// Like [`parse_json_if_ok`] for endpoints whose success body is ignored.
pub async fn expect_success(resp: Response) -> Result<(), RoverError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(());
    }
    let rate_limit = RateLimitInfo::from_headers(resp.headers());
    let bytes = resp.bytes().await?;
    Err(error_for(status, rate_limit, &bytes))
}

fn error_for(status: reqwest::StatusCode, rate_limit: RateLimitInfo, body: &[u8]) -> RoverError {
    let err = map_error_response(status, rate_limit, body);
    if let RoverError::RateLimit { retry_after, info, .. } = &err {
        warn!(
            bucket = info.bucket.as_deref().unwrap_or("-"),
            retry_after_secs = retry_after.map(|d| d.as_secs_f64()),
            "RoVer rate limit hit"
        );
    }
    err
}
