//! HTTP connector module
//!
//! Provides the credential-bound [`Connector`] with per-connector
//! concurrency admission and full-collection pagination.

mod connector;

pub use connector::{Connector, ConnectorConfig};
