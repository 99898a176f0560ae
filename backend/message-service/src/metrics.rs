//! Prometheus metrics for message-service.
//!
//! Exposes submission/listing counters and an HTTP handler for the
//! `/metrics` endpoint.

use actix_web::HttpResponse;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

pub static MESSAGES_SUBMITTED: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "messages_submitted_total",
        "Messages accepted and persisted"
    )
    .expect("register messages_submitted_total")
});

pub static MESSAGES_REJECTED: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "messages_rejected_total",
        "Submissions rejected for empty or whitespace-only text"
    )
    .expect("register messages_rejected_total")
});

pub static LIST_REQUESTS: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "message_list_requests_total",
        "Listing queries served"
    )
    .expect("register message_list_requests_total")
});

pub static CLASSIFIER_FALLBACKS: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "sentiment_classifier_fallbacks_total",
        "Remote classifications that degraded to the keyword fallback"
    )
    .expect("register sentiment_classifier_fallbacks_total")
});

/// Actix handler that renders Prometheus metrics in text format.
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
