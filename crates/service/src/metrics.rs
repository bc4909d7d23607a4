use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter_vec, Encoder, Histogram, IntCounterVec, TextEncoder,
};

use crate::errors::ServiceError;

// Prometheus metrics (default registry)
pub static STORE_OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "catalog_store_operations_total",
        "Product store operations by kind and outcome",
        &["op", "outcome"]
    )
    .expect("register store_operations_total")
});

pub static STORE_WRITE_DURATION: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "catalog_store_write_duration_seconds",
        "Time spent persisting the full collection",
        vec![0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("register store_write_duration")
});

/// Count one store operation; the outcome label is `ok` or the error kind.
pub fn record<T>(op: &str, result: &Result<T, ServiceError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    STORE_OPERATIONS_TOTAL.with_label_values(&[op, outcome]).inc();
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
