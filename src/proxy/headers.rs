//! Request header filtering for transparent forwarding.
//!
//! # Responsibilities
//! - Strip hop-by-hop headers (RFC 9110 §7.6.1)
//! - Strip headers the inbound `Connection` header nominates
//! - Drop `Host` so the client derives it from the upstream URI
//! - Drop `Accept-Encoding`; only Content-Type is relayed back, so the
//!   upstream must answer with an identity-encoded body

use axum::http::header::{self, HeaderMap, HeaderName};

const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

pub fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(name)
}

/// Copy the end-to-end headers of an inbound request.
pub fn forwardable_headers(inbound: &HeaderMap) -> HeaderMap {
    let nominated: Vec<String> = inbound
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(|name| name.trim().to_ascii_lowercase())
        .filter(|name| !name.is_empty())
        .collect();

    let mut headers = HeaderMap::with_capacity(inbound.len());
    for (name, value) in inbound {
        if name == header::HOST
            || name == header::ACCEPT_ENCODING
            || is_hop_by_hop(name)
            || nominated.iter().any(|n| n == name.as_str())
        {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn strips_hop_by_hop_and_host() {
        let mut inbound = HeaderMap::new();
        inbound.insert(header::HOST, HeaderValue::from_static("shim:3001"));
        inbound.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        inbound.insert("keep-alive", HeaderValue::from_static("timeout=5"));
        inbound.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        inbound.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        inbound.insert("x-request-id", HeaderValue::from_static("abc"));

        let headers = forwardable_headers(&inbound);
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[header::ACCEPT], "application/json");
        assert_eq!(headers["x-request-id"], "abc");
    }

    #[test]
    fn strips_headers_named_by_connection() {
        let mut inbound = HeaderMap::new();
        inbound.insert(header::CONNECTION, HeaderValue::from_static("close, X-Debug-Token"));
        inbound.insert("x-debug-token", HeaderValue::from_static("secret"));
        inbound.insert("x-trace", HeaderValue::from_static("1"));

        let headers = forwardable_headers(&inbound);
        assert!(headers.get("x-debug-token").is_none());
        assert_eq!(headers["x-trace"], "1");
    }

    #[test]
    fn strips_accept_encoding() {
        let mut inbound = HeaderMap::new();
        inbound.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate, br"));
        inbound.insert(header::ACCEPT, HeaderValue::from_static("text/html"));

        let headers = forwardable_headers(&inbound);
        assert!(headers.get(header::ACCEPT_ENCODING).is_none());
        assert_eq!(headers[header::ACCEPT], "text/html");
    }

    #[test]
    fn keeps_repeated_values() {
        let mut inbound = HeaderMap::new();
        inbound.append(header::COOKIE, HeaderValue::from_static("a=1"));
        inbound.append(header::COOKIE, HeaderValue::from_static("b=2"));

        let headers = forwardable_headers(&inbound);
        assert_eq!(headers.get_all(header::COOKIE).iter().count(), 2);
    }
}
