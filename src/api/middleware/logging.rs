//! Access log: one line in, one line out, credentials redacted

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{header, HeaderName, Request},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

/// Headers worth logging; the ones marked true are replaced by `[REDACTED]`
const LOGGED_HEADERS: &[(HeaderName, bool)] = &[
    (header::AUTHORIZATION, true),
    (header::COOKIE, true),
    (header::CONTENT_TYPE, false),
    (header::CONTENT_LENGTH, false),
    (header::USER_AGENT, false),
];

pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    // Route template keeps usernames and ids out of the log line
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let request_id = request_id(&request);

    info!(
        %method,
        route = %route,
        request_id = %request_id,
        headers = %loggable_headers(&request),
        "Request started"
    );

    let response = next.run(request).await;
    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis() as u64;

    if response.status().is_server_error() {
        warn!(%method, route = %route, request_id = %request_id, status, duration_ms, "Request failed");
    } else {
        info!(%method, route = %route, request_id = %request_id, status, duration_ms, "Request finished");
    }

    response
}

fn request_id(request: &Request<Body>) -> String {
    request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

fn loggable_headers(request: &Request<Body>) -> String {
    LOGGED_HEADERS
        .iter()
        .filter_map(|(name, secret)| {
            let value = request.headers().get(name)?;
            let shown = if *secret {
                "[REDACTED]"
            } else {
                value.to_str().unwrap_or("[binary]")
            };
            Some(format!("{}={}", name, shown))
        })
        .collect::<Vec<_>>()
        .join(" ")
}
