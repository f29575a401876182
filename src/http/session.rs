//! Transport session with retry, rate-limit backoff and pagination
//!
//! The session is the single place where requests hit the network:
//! - 429 responses back off exponentially (or per `Retry-After`) without
//!   touching the retry budget, up to a hard cap
//! - 5xx responses, connection errors (including a body cut short) and
//!   timeouts use the retry budget
//! - other 4xx responses fail immediately
//! - redirects are followed by hand so the credential survives a host change

use super::backoff::{jitter, parse_retry_after, transient_delay, RateLimitPolicy, RateLimitState};
use super::cancel::{with_deadline, CallOptions};
use super::response::{error_message, ApiResponse};
use super::throttle::{Throttle, ThrottleConfig};
use crate::auth::{AuthConfig, Authenticator};
use crate::error::{Error, Result};
use crate::pagination::Pager;
use crate::params::QueryParams;
use crate::request::{Metadata, RequestDescriptor};
use crate::types::{BackoffType, Direction, JsonValue, Method, TotalPages};
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE, LOCATION};
use reqwest::{redirect, Client, StatusCode};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use url::Url;

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.meraki.com/api/v1";

/// Redirects followed for one attempt before giving up
const MAX_REDIRECTS: u32 = 10;

/// Configuration for the transport session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Base URL for all requests
    pub base_url: String,
    /// Timeout for a single HTTP exchange
    pub timeout: Duration,
    /// Retry budget for transient failures
    pub max_retries: u32,
    /// Initial delay for transient backoff
    pub initial_backoff: Duration,
    /// Maximum delay for transient backoff
    pub max_backoff: Duration,
    /// Transient backoff strategy
    pub backoff_type: BackoffType,
    /// 429 handling
    pub rate_limit: RateLimitPolicy,
    /// Client-side throttle
    pub throttle: Option<ThrottleConfig>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
    /// Log writes instead of sending them
    pub simulate: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 3,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(10),
            backoff_type: BackoffType::Linear,
            rate_limit: RateLimitPolicy::default(),
            throttle: Some(ThrottleConfig::default()),
            default_headers: HashMap::new(),
            user_agent: default_user_agent(),
            simulate: false,
        }
    }
}

fn default_user_agent() -> String {
    format!("meraki-dashboard-rs/{}", env!("CARGO_PKG_VERSION"))
}

impl SessionConfig {
    /// Create a new config builder
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }
}

/// Builder for session config
#[derive(Default)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the transient retry budget
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set transient backoff
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.config.backoff_type = backoff_type;
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Set 429 handling
    pub fn rate_limit(mut self, policy: RateLimitPolicy) -> Self {
        self.config.rate_limit = policy;
        self
    }

    /// Set the client-side throttle
    pub fn throttle(mut self, config: ThrottleConfig) -> Self {
        self.config.throttle = Some(config);
        self
    }

    /// Disable the client-side throttle
    pub fn no_throttle(mut self) -> Self {
        self.config.throttle = None;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Identify the calling application in the user agent
    pub fn caller(mut self, caller: impl AsRef<str>) -> Self {
        let caller = caller.as_ref().trim();
        if !caller.is_empty() {
            self.config.user_agent = format!("{} {caller}", default_user_agent());
        }
        self
    }

    /// Enable or disable simulate mode
    pub fn simulate(mut self, simulate: bool) -> Self {
        self.config.simulate = simulate;
        self
    }

    /// Build the config
    pub fn build(self) -> SessionConfig {
        self.config
    }
}

/// Authenticated transport session
///
/// Cheap to clone; clones share the connection pool, throttle and rate
/// limit state.
#[derive(Clone)]
pub struct Session {
    client: Client,
    config: Arc<SessionConfig>,
    authenticator: Authenticator,
    throttle: Option<Throttle>,
    rate_limit: Arc<Mutex<RateLimitState>>,
}

impl Session {
    /// Create a session
    pub fn new(config: SessionConfig, auth: AuthConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .redirect(redirect::Policy::none())
            .build()?;

        let throttle = config.throttle.as_ref().map(Throttle::new);

        Ok(Self {
            client,
            config: Arc::new(config),
            authenticator: Authenticator::new(auth),
            throttle,
            rate_limit: Arc::new(Mutex::new(RateLimitState::default())),
        })
    }

    /// Create a session with a bearer API key and default settings
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        Self::new(SessionConfig::default(), AuthConfig::bearer(api_key))
    }

    /// Session configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Snapshot of the rate limit state
    pub async fn rate_limit_state(&self) -> RateLimitState {
        self.rate_limit.lock().await.clone()
    }

    /// Execute one request
    pub async fn execute(&self, request: &RequestDescriptor) -> Result<ApiResponse> {
        self.execute_with(request, &CallOptions::default()).await
    }

    /// Execute one request with per-call options
    pub async fn execute_with(
        &self,
        request: &RequestDescriptor,
        options: &CallOptions,
    ) -> Result<ApiResponse> {
        with_deadline(options.deadline, self.send_with_retries(request)).await
    }

    /// Execute a list request across pages
    pub async fn execute_paginated(
        &self,
        request: &RequestDescriptor,
        total_pages: TotalPages,
        direction: Direction,
    ) -> Result<Vec<JsonValue>> {
        Pager::new(self)
            .paginate(request, total_pages, direction)
            .await
    }

    /// Execute a list request across pages with per-call options
    pub async fn execute_paginated_with(
        &self,
        request: &RequestDescriptor,
        total_pages: TotalPages,
        direction: Direction,
        options: &CallOptions,
    ) -> Result<Vec<JsonValue>> {
        Pager::new(self)
            .with_options(*options)
            .paginate(request, total_pages, direction)
            .await
    }

    /// GET a resource path
    pub async fn get(&self, path: &str, query: QueryParams) -> Result<JsonValue> {
        let request = ad_hoc(Method::GET, path).with_query(query);
        Ok(self.execute(&request).await?.into_body())
    }

    /// GET every page of a list resource
    pub async fn get_pages(
        &self,
        path: &str,
        query: QueryParams,
        total_pages: TotalPages,
        direction: Direction,
    ) -> Result<Vec<JsonValue>> {
        let request = ad_hoc(Method::GET, path).with_query(query);
        self.execute_paginated(&request, total_pages, direction)
            .await
    }

    /// POST a JSON body
    pub async fn post(&self, path: &str, body: JsonValue) -> Result<JsonValue> {
        let request = ad_hoc(Method::POST, path).with_body(body);
        Ok(self.execute(&request).await?.into_body())
    }

    /// PUT a JSON body
    pub async fn put(&self, path: &str, body: JsonValue) -> Result<JsonValue> {
        let request = ad_hoc(Method::PUT, path).with_body(body);
        Ok(self.execute(&request).await?.into_body())
    }

    /// DELETE a resource path
    pub async fn delete(&self, path: &str) -> Result<JsonValue> {
        let request = ad_hoc(Method::DELETE, path);
        Ok(self.execute(&request).await?.into_body())
    }

    /// Retry loop for a single descriptor
    async fn send_with_retries(&self, request: &RequestDescriptor) -> Result<ApiResponse> {
        let mut url = self.build_url(request)?;
        let method = request.method();

        if self.config.simulate && method.is_write() {
            info!(
                "Simulated {} {} ({}), request not sent",
                method,
                url,
                request.operation()
            );
            return Ok(ApiResponse::simulated());
        }

        let policy = &self.config.rate_limit;
        let mut transient_retries = 0;
        let mut rate_limit_retries = 0;
        let mut redirects = 0;

        loop {
            if let Some(ref throttle) = self.throttle {
                throttle.wait().await;
            }

            let req = self.build_request(request, &url)?;

            let response = match req.send().await {
                Ok(response) => response,
                Err(e) if is_transient_transport_error(&e) => {
                    if self.pause_before_retry(request, &mut transient_retries, &e).await {
                        continue;
                    }
                    return Err(Error::transient(transient_retries + 1, None, e.to_string()));
                }
                Err(e) => return Err(Error::Http(e)),
            };

            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after = parse_retry_after(response.headers());
                let delay = self.rate_limit.lock().await.record_429(policy, retry_after);
                rate_limit_retries += 1;

                if !policy.wait_on_rate_limit || rate_limit_retries > policy.max_retries {
                    return Err(Error::RateLimited {
                        attempts: rate_limit_retries,
                        retry_after_seconds: retry_after.map(|d| d.as_secs()),
                    });
                }

                let delay = delay + jitter(policy.jitter);
                warn!(
                    "{} rate limited (429), attempt {}/{}, waiting {:?}",
                    request.operation(),
                    rate_limit_retries,
                    policy.max_retries,
                    delay
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            self.rate_limit.lock().await.reset();

            if status.is_redirection() {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .ok_or_else(|| {
                        Error::Other(format!("HTTP {} without a Location header", status.as_u16()))
                    })?;
                redirects += 1;
                if redirects > MAX_REDIRECTS {
                    return Err(Error::Other(format!(
                        "{} exceeded {MAX_REDIRECTS} redirects",
                        request.operation()
                    )));
                }
                url = url.join(location)?;
                debug!("{} redirected to {}", request.operation(), url);
                continue;
            }

            if status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                let reason = format!("HTTP {}", status.as_u16());
                if self.pause_before_retry(request, &mut transient_retries, &reason).await {
                    continue;
                }
                return Err(Error::transient(
                    transient_retries + 1,
                    Some(status.as_u16()),
                    error_message(status, &body),
                ));
            }

            if status.is_client_error() {
                let body = response.text().await.unwrap_or_default();
                return Err(Error::client_error(
                    status.as_u16(),
                    error_message(status, &body),
                ));
            }

            let headers = response.headers().clone();
            match response.bytes().await {
                Ok(bytes) => {
                    debug!("{} {} succeeded ({})", method, url, status.as_u16());
                    return ApiResponse::from_bytes(status.as_u16(), headers, &bytes);
                }
                // connection dropped mid-body
                Err(e) if e.is_body() || is_transient_transport_error(&e) => {
                    if self.pause_before_retry(request, &mut transient_retries, &e).await {
                        continue;
                    }
                    return Err(Error::transient(transient_retries + 1, None, e.to_string()));
                }
                Err(e) => return Err(Error::Http(e)),
            }
        }
    }

    /// Sleep before the next transient retry; false once the budget is spent
    async fn pause_before_retry(
        &self,
        request: &RequestDescriptor,
        retries: &mut u32,
        reason: &(dyn std::fmt::Display + Sync),
    ) -> bool {
        let max_retries = self.config.max_retries;
        if *retries >= max_retries {
            return false;
        }

        let delay = self.calculate_backoff(*retries);
        warn!(
            "{} failed ({}), attempt {}/{}, retrying in {:?}",
            request.operation(),
            reason,
            *retries + 1,
            max_retries + 1,
            delay
        );
        tokio::time::sleep(delay).await;
        *retries += 1;
        true
    }

    /// Build the HTTP request for one attempt
    fn build_request(
        &self,
        request: &RequestDescriptor,
        url: &Url,
    ) -> Result<reqwest::RequestBuilder> {
        let mut req = self
            .client
            .request(request.method().into(), url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"));

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if let Some(body) = request.body() {
            req = req
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .json(body);
        }

        self.authenticator.apply(req)
    }

    /// Resolve base URL, resource path and query string
    fn build_url(&self, request: &RequestDescriptor) -> Result<Url> {
        let path = request.path();
        let full = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            let base = self.config.base_url.trim_end_matches('/');
            let path = path.trim_start_matches('/');
            format!("{base}/{path}")
        };

        let mut url = Url::parse(&full)?;
        if !request.query().is_empty() {
            url.query_pairs_mut()
                .extend_pairs(request.query().to_pairs());
        }
        Ok(url)
    }

    /// Transient backoff delay for a zero-based retry number
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        transient_delay(
            self.config.backoff_type,
            self.config.initial_backoff,
            self.config.max_backoff,
            attempt,
        )
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("auth", self.authenticator.config())
            .field("has_throttle", &self.throttle.is_some())
            .finish_non_exhaustive()
    }
}

/// Descriptor for calls made without an endpoint definition
fn ad_hoc(method: Method, path: &str) -> RequestDescriptor {
    RequestDescriptor::new(method, path, Metadata::new(format!("{method} {path}")))
}

/// Connection-level failures worth retrying
fn is_transient_transport_error(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect() || e.is_request()
}
