//! Sales query API - read-only HTTP service over an in-memory sales dataset
//!
//! This library provides the core of a small sales analytics service:
//! - A Record Store loaded once from CSV at startup, immutable thereafter
//! - A Filter Engine for (date-range, dimension-key) queries
//! - An Aggregator for per-entity mean and total statistics
//! - A Query Façade exposing the six named operations with uniform contracts
//!
//! The HTTP boundary lives in the `sales-server` binary; identity-token
//! verification is delegated through the [`auth::TokenVerifier`] seam.
//! Queries are pure functions over the shared read-only [`Dataset`], so
//! arbitrarily many requests may run concurrently without coordination.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod config;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod query;
pub mod types;

// Re-export main types
pub use config::ApplicationConfig;
pub use dataset::Dataset;
pub use error::{AuthError, DatasetError, Error, Result};
pub use types::{DateRange, Dimension, KeyType, KeyValue, SalesRecord};
