use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};

/// Per-request access log. Pipeline runs take multiple remote calls, so
/// the elapsed time is the number operators actually ask about.
pub async fn request_logger(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed_ms = start.elapsed().as_millis() as u64;

    if status.is_server_error() {
        warn!(%method, path, status = status.as_u16(), elapsed_ms, "request failed");
    } else {
        info!(%method, path, status = status.as_u16(), elapsed_ms, "request handled");
    }

    response
}
