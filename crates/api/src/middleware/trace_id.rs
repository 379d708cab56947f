//! Per-request correlation IDs.

use axum::{
    body::Body,
    http::{header::HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Correlation ID carried in request extensions.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Attaches a request ID to every request. Incoming `X-Request-ID` headers
/// are honored so callers can thread their own IDs through; otherwise a
/// fresh UUID is minted. The ID labels the request span and is echoed back
/// in the response headers.
pub async fn trace_id(mut req: Request<Body>, next: Next) -> Response {
    let id = match req.headers().get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok()) {
        Some(incoming) => incoming.to_string(),
        None => Uuid::new_v4().to_string(),
    };
    req.extensions_mut().insert(RequestId(id.clone()));

    let span = tracing::info_span!(
        "request",
        request_id = %id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    let started = Instant::now();
    let mut response = async {
        let response = next.run(req).await;
        tracing::info!(
            status = response.status().as_u16(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Request completed"
        );
        response
    }
    .instrument(span)
    .await;

    if let Ok(value) = HeaderValue::from_str(&id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static("x-request-id"), value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_id_is_a_valid_header_value() {
        let id = Uuid::new_v4().to_string();
        assert!(HeaderValue::from_str(&id).is_ok());
    }

    #[test]
    fn test_request_id_clone_preserves_value() {
        let id = RequestId("abc-123".to_string());
        assert_eq!(id.clone().0, "abc-123");
    }
}
