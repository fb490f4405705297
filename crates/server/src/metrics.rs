use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};
use service::errors::ServiceError;

// Prometheus metrics (default registry)
pub static OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "medicine_store_operations_total",
        "Medicine store operations by outcome",
        &["operation", "outcome"]
    )
    .expect("register operations_total")
});

/// Count one call of `operation` under `ok`, `not_found` or `error`.
pub fn observe<T>(operation: &str, result: &Result<T, ServiceError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(ServiceError::NotFound(_)) => "not_found",
        Err(_) => "error",
    };
    OPERATIONS_TOTAL.with_label_values(&[operation, outcome]).inc();
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}"));
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_are_labelled() {
        let before = OPERATIONS_TOTAL.with_label_values(&["metrics_test", "not_found"]).get();
        observe::<()>("metrics_test", &Err(ServiceError::not_found("Medicine")));
        observe("metrics_test", &Ok(()));
        assert_eq!(OPERATIONS_TOTAL.with_label_values(&["metrics_test", "not_found"]).get(), before + 1);

        let (status, body) = encode_metrics();
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("medicine_store_operations_total"));
    }
}
