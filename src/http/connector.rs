//! Credential-bound connector with a per-connector concurrency ceiling
//!
//! A [`Connector`] owns one network client bound to one credential (or
//! none), admits requests through a counting semaphore, and assembles
//! full collections across pages for GET.

use crate::error::{Error, Result};
use crate::pagination::LastPage;
use crate::types::Params;
use bytes::Bytes;
use futures::future;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::debug;

/// Page size forced on the first request of every full-collection fetch
pub(crate) const PER_PAGE: u32 = 1000;

/// Configuration applied uniformly to every connector
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    /// Maximum simultaneous in-flight requests per connector
    pub max_connections: usize,
    /// Per-request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            timeout: Duration::from_secs(20),
            user_agent: format!("lms-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// One credential-bound endpoint handle with its own concurrency ceiling
///
/// Cloning is cheap and clones share the same ceiling and task accounting,
/// so a connector can be handed to spawned tasks freely.
#[derive(Clone)]
pub struct Connector {
    service: Client,
    base_url: String,
    timeout: Duration,
    authenticated: bool,
    gate: Arc<Semaphore>,
    pending: Arc<AtomicUsize>,
}

/// Decrements the pending-task count when a request finishes, on any path
struct TaskGuard<'a>(&'a AtomicUsize);

impl Drop for TaskGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Raw response parts retained after the admission gate is released
struct RawResponse {
    headers: HeaderMap,
    body: Bytes,
}

impl Connector {
    /// Create a connector for an API origin, optionally bound to a bearer
    /// credential
    pub fn new(origin: &str, token: Option<&str>, config: &ConnectorConfig) -> Result<Self> {
        if config.max_connections == 0 {
            return Err(Error::config("max_connections must be at least 1"));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| Error::config("credential is not a valid header value"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let service = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            service,
            base_url: format!("{}/api/v1", origin.trim_end_matches('/')),
            timeout: config.timeout,
            authenticated: token.is_some(),
            gate: Arc::new(Semaphore::new(config.max_connections)),
            pending: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Current count of in-flight plus queued requests on this connector
    ///
    /// A load-balancing signal only: the value may be stale by the time the
    /// caller acts on it.
    pub fn tasks(&self) -> usize {
        self.pending.load(Ordering::Relaxed)
    }

    /// Whether this connector carries a bearer credential
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    // ========================================================================
    // Verbs
    // ========================================================================

    /// Issue a single GET and decode the response body
    pub async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T> {
        let response = self.request(Method::GET, path, params, None).await?;
        decode(&response.body)
    }

    /// Fetch a full collection across all pages
    ///
    /// Forces `page=1` and a large page size on the first request, then
    /// inspects the Link header for a `last` page. Remaining pages are
    /// fetched concurrently through the same admission gate as every other
    /// call and concatenated in page order regardless of completion order.
    /// Any page failure fails the whole aggregate.
    pub async fn getall<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let mut query: Params = params
            .iter()
            .filter(|(key, _)| *key != "page" && *key != "per_page")
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        query.push(("page".to_string(), "1".to_string()));
        query.push(("per_page".to_string(), PER_PAGE.to_string()));

        let first = self.request(Method::GET, path, &query, None).await?;
        let mut items = decode_page::<T>(&first.body)?;

        if let Some(last) = LastPage::from_headers(&first.headers) {
            if last.page > 1 {
                debug!(path, pages = last.page, "fetching remaining pages");
                let pages = future::try_join_all(
                    (2..=last.page).map(|page| self.fetch_page::<T>(path, last.query_for(page))),
                )
                .await?;
                for page in pages {
                    items.extend(page);
                }
            }
        }

        Ok(items)
    }

    /// Issue a single DELETE and decode the response body
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let response = self.request(Method::DELETE, path, params, None).await?;
        decode(&response.body)
    }

    /// Issue a single PUT with a JSON payload and decode the response body
    pub async fn put<T, P>(&self, path: &str, payload: &P) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let body = serde_json::to_value(payload)?;
        let response = self
            .request(Method::PUT, path, &[] as &[(&str, &str)], Some(&body))
            .await?;
        decode(&response.body)
    }

    /// Issue a single POST with a JSON payload and decode the response body
    pub async fn post<T, P>(&self, path: &str, payload: &P) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let body = serde_json::to_value(payload)?;
        let response = self
            .request(Method::POST, path, &[] as &[(&str, &str)], Some(&body))
            .await?;
        decode(&response.body)
    }

    /// Probe a path with HEAD
    ///
    /// Returns whether the status landed in `[200, 400)`. A pure existence
    /// probe: every failure, network-level included, resolves to `false`.
    pub async fn head(&self, path: &str) -> bool {
        self.pending.fetch_add(1, Ordering::Relaxed);
        let _task = TaskGuard(&self.pending);
        let Ok(_permit) = self.gate.acquire().await else {
            return false;
        };

        match self.service.head(self.build_url(path)).send().await {
            Ok(response) => (200..400).contains(&response.status().as_u16()),
            Err(_) => false,
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Fetch one follow-up page of a collection
    async fn fetch_page<T: DeserializeOwned>(&self, path: &str, query: Params) -> Result<Vec<T>> {
        let response = self.request(Method::GET, path, &query, None).await?;
        decode_page(&response.body)
    }

    /// Execute one request through the admission gate
    ///
    /// The pending count covers the wait for a permit as well as the
    /// request itself; the permit is held until the body is fully read.
    async fn request<Q>(
        &self,
        method: Method,
        path: &str,
        query: &Q,
        body: Option<&Value>,
    ) -> Result<RawResponse>
    where
        Q: Serialize + ?Sized,
    {
        self.pending.fetch_add(1, Ordering::Relaxed);
        let _task = TaskGuard(&self.pending);
        let _permit = self
            .gate
            .acquire()
            .await
            .expect("connector admission gate closed");

        let url = self.build_url(path);
        let mut req = self.service.request(method.clone(), &url).query(query);
        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        debug!("Request succeeded: {} {}", method, url);
        Ok(RawResponse { headers, body })
    }

    /// Map a transport failure, distinguishing timeout expiry
    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            Error::Http(e)
        }
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl std::fmt::Debug for Connector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connector")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.authenticated)
            .field("tasks", &self.tasks())
            .finish_non_exhaustive()
    }
}

/// Decode a JSON body, treating an empty body as JSON `null`
fn decode<T: DeserializeOwned>(body: &Bytes) -> Result<T> {
    if body.is_empty() {
        return Ok(serde_json::from_slice(b"null")?);
    }
    Ok(serde_json::from_slice(body)?)
}

/// Decode one page of a collection, treating empty and `null` bodies as an
/// empty page
fn decode_page<T: DeserializeOwned>(body: &Bytes) -> Result<Vec<T>> {
    if body.is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_slice::<Option<Vec<T>>>(body)?.unwrap_or_default())
}
