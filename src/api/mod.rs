//! Dispatcher module
//!
//! [`LmsClient`] presents one logical client surface backed by a fixed set
//! of connectors (one per credential, or a single anonymous one), picks the
//! least-busy connector for every call, and exposes the domain endpoint
//! catalogue on top of the five primitive verbs.

mod catalogue;

use crate::error::{Error, Result};
use crate::http::{Connector, ConnectorConfig};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::trace;

/// Load-balancing client over one or more credentialed connectors
///
/// The connector list is fixed at construction and never changes.
#[derive(Debug, Clone)]
pub struct LmsClient {
    connectors: Vec<Connector>,
    default_course_time_zone: String,
}

impl LmsClient {
    /// Create a builder for a client against the given API origin
    pub fn builder(origin: impl Into<String>) -> LmsClientBuilder {
        LmsClientBuilder {
            origin: origin.into(),
            tokens: None,
            config: ConnectorConfig::default(),
            course_time_zone: "America/Chicago".to_string(),
        }
    }

    /// Create an anonymous client relying on ambient trust (e.g. cookies)
    pub fn new(origin: impl Into<String>) -> Result<Self> {
        Self::builder(origin).build()
    }

    /// Number of connectors backing this client
    pub fn connector_count(&self) -> usize {
        self.connectors.len()
    }

    /// Default time zone applied to courses created without one
    pub fn default_course_time_zone(&self) -> &str {
        &self.default_course_time_zone
    }

    /// Pick the connector with the fewest in-flight + queued requests
    ///
    /// Greedy and non-predictive: reacts to current queue depth only. Ties
    /// go to the first connector in construction order; that stability is
    /// incidental, not a priority scheme.
    fn connector(&self) -> &Connector {
        let connector = self
            .connectors
            .iter()
            .min_by_key(|connector| connector.tasks())
            .expect("connector list is never empty");
        trace!(tasks = connector.tasks(), "selected connector");
        connector
    }

    // ========================================================================
    // Primitive Verbs
    // ========================================================================

    /// Issue a single GET on the least-busy connector
    pub async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T> {
        self.connector().get(path, params).await
    }

    /// Fetch a full collection across all pages on the least-busy connector
    ///
    /// The whole aggregate, page fan-out included, runs on the connector
    /// selected here.
    pub async fn getall<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        self.connector().getall(path, params).await
    }

    /// Issue a single DELETE on the least-busy connector
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        self.connector().delete(path, params).await
    }

    /// Issue a single PUT on the least-busy connector
    pub async fn put<T, P>(&self, path: &str, payload: &P) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.connector().put(path, payload).await
    }

    /// Issue a single POST on the least-busy connector
    pub async fn post<T, P>(&self, path: &str, payload: &P) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.connector().post(path, payload).await
    }

    /// Probe a path with HEAD on the least-busy connector; never fails
    pub async fn head(&self, path: &str) -> bool {
        self.connector().head(path).await
    }
}

/// Builder for [`LmsClient`]
///
/// Omitting credentials entirely yields one anonymous connector. Supplying
/// an explicitly empty credential list is rejected as ambiguous
/// configuration.
#[derive(Debug, Clone)]
pub struct LmsClientBuilder {
    origin: String,
    tokens: Option<Vec<String>>,
    config: ConnectorConfig,
    course_time_zone: String,
}

impl LmsClientBuilder {
    /// Add one bearer credential
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.tokens.get_or_insert_with(Vec::new).push(token.into());
        self
    }

    /// Supply the full bearer credential list
    #[must_use]
    pub fn tokens(mut self, tokens: Vec<String>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Set the per-connector concurrency ceiling (default 10)
    #[must_use]
    pub fn max_connections(mut self, max_connections: usize) -> Self {
        self.config.max_connections = max_connections;
        self
    }

    /// Set the per-request timeout (default 20s)
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the user agent string
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the default time zone for created courses
    #[must_use]
    pub fn course_time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.course_time_zone = time_zone.into();
        self
    }

    /// Build the client, validating the configuration
    ///
    /// Fails with a configuration error on a missing origin, an explicitly
    /// empty credential list, or a zero concurrency ceiling. No partial
    /// client is produced.
    pub fn build(self) -> Result<LmsClient> {
        if self.origin.is_empty() {
            return Err(Error::config("client requires an API origin URL"));
        }

        let connectors = match &self.tokens {
            None => vec![Connector::new(&self.origin, None, &self.config)?],
            Some(tokens) if tokens.is_empty() => {
                return Err(Error::config(
                    "credential list is empty; omit it entirely for cookie-based access",
                ));
            }
            Some(tokens) => tokens
                .iter()
                .map(|token| Connector::new(&self.origin, Some(token), &self.config))
                .collect::<Result<Vec<_>>>()?,
        };

        Ok(LmsClient {
            connectors,
            default_course_time_zone: self.course_time_zone,
        })
    }
}
