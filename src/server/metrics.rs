use axum::{http::StatusCode, response::IntoResponse};
use lazy_static::lazy_static;
use prometheus::{
    Counter, CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};
use std::time::Duration;

/// Metric name prefix for all service metrics
const PREFIX: &str = "mood";

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_http_requests_total"), "Total number of HTTP requests"),
        &["method", "path", "status"]
    ).expect("Failed to create http_requests_total metric");

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_http_request_duration_seconds"),
            "HTTP request duration in seconds"
        )
        .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0]),
        &["method", "path"]
    ).expect("Failed to create http_request_duration_seconds metric");

    // Recommendations
    pub static ref RECOMMENDATIONS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_recommendations_total"), "Recommendation requests by outcome"),
        &["outcome"]
    ).expect("Failed to create recommendations_total metric");

    pub static ref QUERY_SOURCE_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_query_source_total"), "Search queries by how they were built"),
        &["source"]
    ).expect("Failed to create query_source_total metric");

    pub static ref BLOCKED_CANDIDATES_TOTAL: Counter = Counter::new(
        format!("{PREFIX}_blocked_candidates_total"),
        "Catalog results removed by the content policy"
    ).expect("Failed to create blocked_candidates_total metric");

    // Outbound calls
    pub static ref UPSTREAM_CALLS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_upstream_calls_total"), "Calls to external services"),
        &["upstream", "status"]
    ).expect("Failed to create upstream_calls_total metric");

    pub static ref UPSTREAM_CALL_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_upstream_call_duration_seconds"),
            "External call duration in seconds"
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.0, 5.0, 10.0, 15.0]),
        &["upstream"]
    ).expect("Failed to create upstream_call_duration_seconds metric");
}

/// Initialize all metrics and register them with the Prometheus registry
pub fn init_metrics() {
    // Already registered is fine, tests call this repeatedly
    let _ = REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(RECOMMENDATIONS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(QUERY_SOURCE_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(BLOCKED_CANDIDATES_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(UPSTREAM_CALLS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(UPSTREAM_CALL_DURATION_SECONDS.clone()));

    tracing::info!("Metrics system initialized successfully");
}

/// Record an HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration.as_secs_f64());
}

/// Record the outcome of a recommendation, "success" or an error kind
pub fn record_recommendation(outcome: &str) {
    RECOMMENDATIONS_TOTAL.with_label_values(&[outcome]).inc();
}

pub fn record_query_source(source: &str) {
    QUERY_SOURCE_TOTAL.with_label_values(&[source]).inc();
}

pub fn record_blocked_candidates(count: usize) {
    if count > 0 {
        BLOCKED_CANDIDATES_TOTAL.inc_by(count as f64);
    }
}

/// Record a call to an external service. Transport failures never reach
/// this point, only calls that produced an HTTP status.
pub fn record_upstream_call(upstream: &str, status: u16, duration: Duration) {
    UPSTREAM_CALLS_TOTAL
        .with_label_values(&[upstream, &status.to_string()])
        .inc();

    UPSTREAM_CALL_DURATION_SECONDS
        .with_label_values(&[upstream])
        .observe(duration.as_secs_f64());
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = vec![];
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => {
            let response = String::from_utf8(buffer).unwrap_or_default();
            (StatusCode::OK, response)
        }
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
        }
    }
}
