use axum::response::{IntoResponse, Response};
use hyper::StatusCode;
use prometheus::Encoder;

use crate::metrics::REGISTRY;

pub async fn metrics_handler() -> Response {
    let encoder = prometheus::TextEncoder::new();

    let mut body = encode(&encoder, &REGISTRY.gather(), "custom");
    body.push_str(&encode(&encoder, &prometheus::gather(), "prometheus"));

    (StatusCode::OK, body).into_response()
}

fn encode(
    encoder: &prometheus::TextEncoder,
    metric_families: &[prometheus::proto::MetricFamily],
    kind: &str,
) -> String {
    let mut buffer = Vec::new();
    if let Err(error) = encoder.encode(metric_families, &mut buffer) {
        log::error!("Could not encode {kind} metrics: {error}");
    };
    String::from_utf8(buffer).unwrap_or_else(|error| {
        log::error!("The {kind} metrics could not be from_utf8'd: {error}");
        String::default()
    })
}
