//! Request and Response Types for the Sales API HTTP Server
//!
//! This module contains all serialization/deserialization types used by the
//! HTTP API. Statistics responses keep the camelCase field names of the
//! public contract.

use serde::{Deserialize, Serialize};

// =============================================================================
// Filter Query Types
// =============================================================================

/// Query parameters for `GET /sales-by-employee`
#[derive(Debug, Deserialize)]
pub struct SalesByEmployeeParams {
    /// The key identifying the employee
    pub key_employee: String,
    /// Start date in YYYY-MM-DD format (inclusive)
    pub start_date_str: String,
    /// End date in YYYY-MM-DD format (inclusive)
    pub end_date_str: String,
}

/// Query parameters for `GET /sales-by-product`
#[derive(Debug, Deserialize)]
pub struct SalesByProductParams {
    /// The key identifying the product
    pub key_product: String,
    /// Start date in YYYY-MM-DD format (inclusive)
    pub start_date_str: String,
    /// End date in YYYY-MM-DD format (inclusive)
    pub end_date_str: String,
}

/// Query parameters for `GET /sales-by-store`
#[derive(Debug, Deserialize)]
pub struct SalesByStoreParams {
    /// The key identifying the store
    pub key_store: String,
    /// Start date in YYYY-MM-DD format (inclusive)
    pub start_date_str: String,
    /// End date in YYYY-MM-DD format (inclusive)
    pub end_date_str: String,
}

// =============================================================================
// Statistics Query Types
// =============================================================================

/// Query parameters for `GET /statistics-by-employee`
#[derive(Debug, Deserialize)]
pub struct StatisticsByEmployeeParams {
    /// The key identifying the employee
    pub key_employee: String,
}

/// Query parameters for `GET /statistics-by-product`
#[derive(Debug, Deserialize)]
pub struct StatisticsByProductParams {
    /// The key identifying the product
    pub key_product: String,
}

/// Query parameters for `GET /statistics-by-store`
#[derive(Debug, Deserialize)]
pub struct StatisticsByStoreParams {
    /// The key identifying the store
    pub key_store: String,
}

/// Response for `GET /statistics-by-employee`
#[derive(Debug, Serialize)]
pub struct EmployeeStatisticsResponse {
    /// The employee key queried
    #[serde(rename = "keyEmployee")]
    pub key_employee: String,
    /// Mean sale amount for this employee
    #[serde(rename = "meanEmployee")]
    pub mean_employee: f64,
    /// Total sale amount for this employee
    #[serde(rename = "totalEmployee")]
    pub total_employee: f64,
}

/// Response for `GET /statistics-by-product`
#[derive(Debug, Serialize)]
pub struct ProductStatisticsResponse {
    /// The product key queried
    #[serde(rename = "keyProduct")]
    pub key_product: String,
    /// Mean sale amount for this product
    #[serde(rename = "meanProduct")]
    pub mean_product: f64,
    /// Total sale amount for this product
    #[serde(rename = "totalProduct")]
    pub total_product: f64,
}

/// Response for `GET /statistics-by-store`
#[derive(Debug, Serialize)]
pub struct StoreStatisticsResponse {
    /// The store key queried
    #[serde(rename = "keyStore")]
    pub key_store: String,
    /// Mean sale amount for this store
    #[serde(rename = "meanStore")]
    pub mean_store: f64,
    /// Total sale amount for this store
    #[serde(rename = "totalStore")]
    pub total_store: f64,
}

// =============================================================================
// Service Types
// =============================================================================

/// Error body for 400/403/404 responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable failure reason
    pub error: String,
}

/// Service banner returned at `/`
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    /// Service name
    pub service: &'static str,
    /// Crate version
    pub version: &'static str,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Liveness status
    pub status: &'static str,
    /// Crate version
    pub version: &'static str,
}
