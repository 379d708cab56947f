//! Hardening headers applied to every response.

use axum::{
    body::Body,
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

const BASE_HEADERS: [(&str, &str); 3] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("x-xss-protection", "1; mode=block"),
];

fn hsts_enabled() -> bool {
    std::env::var("ATT__SECURITY__HSTS_ENABLED")
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Adds standard hardening headers to every response. HSTS is opt-in via
/// `ATT__SECURITY__HSTS_ENABLED=true` and must only be enabled behind
/// proper HTTPS termination.
pub async fn security_headers_middleware(req: Request<Body>, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    for (name, value) in BASE_HEADERS {
        headers.insert(
            header::HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    if hsts_enabled() {
        headers.insert(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_header_names_are_lowercase_statics() {
        for (name, value) in BASE_HEADERS {
            assert_eq!(name, name.to_lowercase());
            assert!(HeaderValue::from_static(value).to_str().is_ok());
        }
    }

    #[test]
    fn test_hsts_disabled_by_default() {
        std::env::remove_var("ATT__SECURITY__HSTS_ENABLED");
        assert!(!hsts_enabled());
    }
}
