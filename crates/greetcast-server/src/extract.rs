//! Client address derivation from request metadata.

use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Derive the originating client address.
///
/// Prefers the FIRST entry of `x-forwarded-for` (the closest original client
/// in the forwarding chain), falling back to the transport peer address. The
/// value is not validated as an address.
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|chain| chain.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
        .unwrap_or_else(|| peer.ip().to_string())
}
