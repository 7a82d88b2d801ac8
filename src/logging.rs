//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{Method, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::internal_server_error::InternalServerError;

/// The maximum number of bytes of a response body to include in the `info` log.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request line and the response for each request.
///
/// The request is logged at the `info` level. The response status and body
/// are logged at `info`, or `error` for server errors. If the response body is
/// longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is truncated and the full
/// body is logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    tracing::info!("Received request: {method} {uri}");

    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("could not read response body for {method} {uri}: {error}");
            return InternalServerError::default().into_response();
        }
    };

    log_response(&method, &uri, parts.status, &body_bytes);

    Response::from_parts(parts, Body::from(body_bytes))
}

fn log_response(method: &Method, uri: &Uri, status: StatusCode, body: &Bytes) {
    let body_text = String::from_utf8_lossy(body);
    let display_text = truncate(&body_text, LOG_BODY_LENGTH_LIMIT);

    if status.is_server_error() {
        tracing::error!("Sending response to {method} {uri}: {status}\nbody: {display_text}");
    } else {
        tracing::info!("Sending response to {method} {uri}: {status}\nbody: {display_text}");
    }

    if body_text.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::debug!("Full response body: {body_text:?}");
    }
}

/// Cut `text` to at most `limit` bytes without splitting a character.
fn truncate(text: &str, limit: usize) -> String {
    if text.len() <= limit {
        return text.to_owned();
    }

    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    format!("{}...", &text[..end])
}
