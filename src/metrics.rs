//! Prometheus metrics for the sales query API

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, TextEncoder,
};

lazy_static! {
    /// Total HTTP requests by endpoint and status code
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = register_counter_vec!(
        "sales_http_requests_total",
        "Total HTTP requests",
        &["endpoint", "status"]
    )
    .unwrap();

    /// Query outcomes by operation (found vs empty)
    pub static ref QUERIES_TOTAL: CounterVec = register_counter_vec!(
        "sales_queries_total",
        "Query operations by outcome",
        &["operation", "outcome"]
    )
    .unwrap();

    /// Auth rejections by reason
    pub static ref AUTH_REJECTIONS_TOTAL: CounterVec = register_counter_vec!(
        "sales_auth_rejections_total",
        "Rejected requests by auth failure reason",
        &["reason"]
    )
    .unwrap();

    /// Request handling latency by endpoint
    pub static ref REQUEST_DURATION: HistogramVec = register_histogram_vec!(
        "sales_request_duration_seconds",
        "Request handling latency in seconds",
        &["endpoint"],
        vec![0.0001, 0.001, 0.01, 0.1, 0.5, 1.0]
    )
    .unwrap();
}

/// Record one handled request
pub fn observe_request(endpoint: &str, status: u16, seconds: f64) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[endpoint, &status.to_string()])
        .inc();
    REQUEST_DURATION
        .with_label_values(&[endpoint])
        .observe(seconds);
}

/// Record one query operation outcome
pub fn observe_query(operation: &str, found: bool) {
    let outcome = if found { "found" } else { "empty" };
    QUERIES_TOTAL.with_label_values(&[operation, outcome]).inc();
}

/// Text exposition of all registered metrics
pub fn gather() -> String {
    let encoder = TextEncoder::new();
    let families = prometheus::gather();
    let mut buffer = Vec::new();
    if encoder.encode(&families, &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gather_includes_registered_counters() {
        observe_request("/sales-by-employee", 200, 0.001);
        observe_query("sales_by_employee", true);
        let text = gather();
        assert!(text.contains("sales_http_requests_total"));
        assert!(text.contains("sales_queries_total"));
    }
}
