//! Per-request log line and metrics.
//!
//! Emits `Received request` with the method, path and client address,
//! where the client is either the resolved forwarded-for origin or the raw
//! peer depending on `request_log.client_address`.

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::config::ClientAddressSource;
use crate::http::client_ip::ClientAddress;
use crate::http::request::request_id;
use crate::http::state::AppState;
use crate::observability::metrics;

/// Client address as it should appear in the log line.
pub fn log_client(client: &ClientAddress, source: ClientAddressSource) -> String {
    match source {
        ClientAddressSource::ForwardedFor => client.resolved.clone(),
        ClientAddressSource::Peer => client.peer.to_string(),
    }
}

pub async fn log_request(
    State(state): State<AppState>,
    client: ClientAddress,
    request: Request<Body>,
    next: Next,
) -> Response {
    let start_time = Instant::now();
    let settings = state.settings();
    let method = request.method().clone();

    if settings.request_log.enabled {
        tracing::info!(
            request_id = request_id(&request).unwrap_or("unknown"),
            method = %method,
            path = %request.uri().path(),
            client = %log_client(&client, settings.request_log.client_address),
            "Received request"
        );
    }

    let response = next.run(request).await;
    metrics::record_request(method.as_str(), response.status().as_u16(), start_time);
    response
}
