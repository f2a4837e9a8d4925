//! HTTP Handlers for the Sales API Server
//!
//! This module contains all HTTP endpoint handlers for the REST API. Each
//! handler parses and validates request parameters, delegates to the query
//! façade, and maps the outcome to a status code:
//!
//! - malformed dates → 400 before the core is invoked
//! - empty filter result / undefined mean → 404
//! - otherwise → 200 with the JSON payload

use super::config::ServerConfig;
use super::types::*;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use sales_api::auth::TokenVerifier;
use sales_api::types::DateRange;
use sales_api::{metrics, query, Dataset, SalesRecord};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Date format accepted by the filter endpoints
const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the dataset, configuration, and the
/// token verifier used by the auth guard
pub struct AppState {
    /// The sales dataset, loaded once at startup and read-only thereafter
    pub dataset: Arc<Dataset>,
    /// Server configuration
    pub config: ServerConfig,
    /// Identity-token verifier backing the bearer guard
    pub verifier: Arc<dyn TokenVerifier>,
}

// =============================================================================
// Service & Health Handlers
// =============================================================================

/// Service banner
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: "sales-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Prometheus metrics endpoint
pub async fn metrics_text() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4")],
        metrics::gather(),
    )
}

// =============================================================================
// Filter Handlers
// =============================================================================

/// Retrieve sales by employee within a given date range
pub async fn sales_by_employee(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SalesByEmployeeParams>,
) -> Response {
    let started = Instant::now();
    info!(
        key_employee = %params.key_employee,
        start_date = %params.start_date_str,
        end_date = %params.end_date_str,
        "Endpoint /sales-by-employee called"
    );

    let response = match parse_range(&params.start_date_str, &params.end_date_str) {
        Ok(range) => {
            let records = query::sales_by_employee(&state.dataset, range, &params.key_employee);
            sales_response("sales_by_employee", "employee", records)
        }
        Err(response) => response,
    };
    finish("/sales-by-employee", started, response)
}

/// Retrieve sales by product within a given date range
pub async fn sales_by_product(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SalesByProductParams>,
) -> Response {
    let started = Instant::now();
    info!(
        key_product = %params.key_product,
        start_date = %params.start_date_str,
        end_date = %params.end_date_str,
        "Endpoint /sales-by-product called"
    );

    let response = match parse_range(&params.start_date_str, &params.end_date_str) {
        Ok(range) => {
            let records = query::sales_by_product(&state.dataset, range, &params.key_product);
            sales_response("sales_by_product", "product", records)
        }
        Err(response) => response,
    };
    finish("/sales-by-product", started, response)
}

/// Retrieve sales by store within a given date range
pub async fn sales_by_store(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SalesByStoreParams>,
) -> Response {
    let started = Instant::now();
    info!(
        key_store = %params.key_store,
        start_date = %params.start_date_str,
        end_date = %params.end_date_str,
        "Endpoint /sales-by-store called"
    );

    let response = match parse_range(&params.start_date_str, &params.end_date_str) {
        Ok(range) => {
            let records = query::sales_by_store(&state.dataset, range, &params.key_store);
            sales_response("sales_by_store", "store", records)
        }
        Err(response) => response,
    };
    finish("/sales-by-store", started, response)
}

// =============================================================================
// Statistics Handlers
// =============================================================================

/// Retrieve mean and total sales for a specific employee
pub async fn statistics_by_employee(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatisticsByEmployeeParams>,
) -> Response {
    let started = Instant::now();
    info!(key_employee = %params.key_employee, "Endpoint /statistics-by-employee called");

    let stats = query::statistics_by_employee(&state.dataset, &params.key_employee);
    metrics::observe_query("statistics_by_employee", stats.mean.is_some());

    let response = match stats.mean {
        Some(mean) => (
            StatusCode::OK,
            Json(EmployeeStatisticsResponse {
                key_employee: stats.key,
                mean_employee: mean,
                total_employee: stats.total,
            }),
        )
            .into_response(),
        None => not_found(&stats.key, "employee"),
    };
    finish("/statistics-by-employee", started, response)
}

/// Retrieve mean and total sales for a specific product
pub async fn statistics_by_product(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatisticsByProductParams>,
) -> Response {
    let started = Instant::now();
    info!(key_product = %params.key_product, "Endpoint /statistics-by-product called");

    let stats = query::statistics_by_product(&state.dataset, &params.key_product);
    metrics::observe_query("statistics_by_product", stats.mean.is_some());

    let response = match stats.mean {
        Some(mean) => (
            StatusCode::OK,
            Json(ProductStatisticsResponse {
                key_product: stats.key,
                mean_product: mean,
                total_product: stats.total,
            }),
        )
            .into_response(),
        None => not_found(&stats.key, "product"),
    };
    finish("/statistics-by-product", started, response)
}

/// Retrieve mean and total sales for a specific store
pub async fn statistics_by_store(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatisticsByStoreParams>,
) -> Response {
    let started = Instant::now();
    info!(key_store = %params.key_store, "Endpoint /statistics-by-store called");

    let stats = query::statistics_by_store(&state.dataset, &params.key_store);
    metrics::observe_query("statistics_by_store", stats.mean.is_some());

    let response = match stats.mean {
        Some(mean) => (
            StatusCode::OK,
            Json(StoreStatisticsResponse {
                key_store: stats.key,
                mean_store: mean,
                total_store: stats.total,
            }),
        )
            .into_response(),
        None => not_found(&stats.key, "store"),
    };
    finish("/statistics-by-store", started, response)
}

// =============================================================================
// Shared Mapping Helpers
// =============================================================================

/// Parse both date parameters, rejecting the request with 400 on failure
///
/// An inverted but well-formed range is accepted: the core treats it as
/// empty by construction, which the caller then maps to 404.
fn parse_range(start: &str, end: &str) -> Result<DateRange, Response> {
    let parse = |s: &str| NaiveDate::parse_from_str(s, DATE_FORMAT);
    match (parse(start), parse(end)) {
        (Ok(s), Ok(e)) => Ok(DateRange::new(s, e)),
        _ => {
            warn!(start_date = %start, end_date = %end, "Invalid date format");
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Invalid date format. Please provide date in YYYY-MM-DD format."
                        .to_string(),
                }),
            )
                .into_response())
        }
    }
}

/// Map a filter result to 200 with the records, or 404 when empty
fn sales_response(operation: &'static str, entity: &str, records: Vec<&SalesRecord>) -> Response {
    metrics::observe_query(operation, !records.is_empty());

    if records.is_empty() {
        warn!(entity, "No data found for the given date range and key");
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!(
                    "No data found for the given date range and key {}.",
                    entity
                ),
            }),
        )
            .into_response();
    }

    let owned: Vec<SalesRecord> = records.into_iter().cloned().collect();
    (StatusCode::OK, Json(owned)).into_response()
}

fn not_found(key: &str, entity: &str) -> Response {
    warn!(key, entity, "No data found for the given key");
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("No data found for the given key {}.", entity),
        }),
    )
        .into_response()
}

fn finish(endpoint: &'static str, started: Instant, response: Response) -> Response {
    metrics::observe_request(
        endpoint,
        response.status().as_u16(),
        started.elapsed().as_secs_f64(),
    );
    response
}
