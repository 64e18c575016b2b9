//! Client address resolution.
//!
//! # Responsibilities
//! - Read the `X-Forwarded-For` chain from the request headers
//! - Pick the leftmost hop as the originating client
//! - Fall back to the transport peer address when no chain was sent
//!
//! # Design Decisions
//! - No validation of the extracted value: the header is client-supplied,
//!   so the result is only fit for logging, never for access decisions
//! - Only an empty header triggers the fallback; a blank first hop is
//!   returned as an empty string

use std::net::SocketAddr;

use axum::{
    extract::{rejection::ExtensionRejection, ConnectInfo, FromRequestParts},
    http::{request::Parts, HeaderMap},
};

/// Header carrying the proxy chain.
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Inputs for a single resolution.
#[derive(Debug, Clone, Copy)]
pub struct RequestAddressContext<'a> {
    /// Raw `X-Forwarded-For` value, if the header was sent.
    pub forwarded_for: Option<&'a str>,
    /// Address of the directly connected peer.
    pub peer_address: &'a str,
}

impl<'a> RequestAddressContext<'a> {
    pub fn new(forwarded_for: Option<&'a str>, peer_address: &'a str) -> Self {
        Self {
            forwarded_for,
            peer_address,
        }
    }

    /// Resolve the best-effort originating client address.
    pub fn resolve(&self) -> String {
        match self.forwarded_for {
            Some(chain) if !chain.is_empty() => chain
                .split(',')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string(),
            _ => self.peer_address.to_string(),
        }
    }
}

/// Resolve the client address for a request from its headers and peer.
pub fn resolve_from_headers(headers: &HeaderMap, peer: SocketAddr) -> String {
    let forwarded_for = headers
        .get(X_FORWARDED_FOR)
        .map(|value| String::from_utf8_lossy(value.as_bytes()));
    let peer_address = peer.to_string();

    RequestAddressContext::new(forwarded_for.as_deref(), &peer_address).resolve()
}

/// Extractor yielding the resolved client address alongside the raw peer.
///
/// Requires the server to be started with connect info
/// (`into_make_service_with_connect_info::<SocketAddr>()`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAddress {
    /// Result of resolving the forwarded-for chain.
    pub resolved: String,
    /// Transport peer, unaffected by proxy headers.
    pub peer: SocketAddr,
}

impl ClientAddress {
    pub fn from_parts(headers: &HeaderMap, peer: SocketAddr) -> Self {
        Self {
            resolved: resolve_from_headers(headers, peer),
            peer,
        }
    }
}

impl<S> FromRequestParts<S> for ClientAddress
where
    S: Send + Sync,
{
    type Rejection = ExtensionRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ConnectInfo(peer) = ConnectInfo::<SocketAddr>::from_request_parts(parts, state).await?;
        Ok(Self::from_parts(&parts.headers, peer))
    }
}
