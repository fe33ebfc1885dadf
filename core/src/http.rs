//! HTTP transport types.
//!
//! # Design
//! Requests and responses are plain data. The client builds an `HttpRequest`,
//! hands it to a `Transport`, and interprets the returned `HttpResponse`
//! itself, so status handling stays in one place and tests can swap in a
//! fake transport without touching the network.
//!
//! A `Transport` only fails for I/O-level problems. Every status code,
//! including 4xx and 5xx, comes back as an `HttpResponse`. Only 200 bodies
//! are read, so a broken body on an error response still surfaces as a
//! status.

use crate::error::TransportError;

/// A GET request against a fully resolved URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
}

/// An HTTP response described as plain data. `body` is empty unless
/// `status` is 200.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Executes a single GET round-trip.
pub trait Transport {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).get(request)
    }
}

/// Blocking transport backed by a single reused `ureq::Agent`.
///
/// The agent is configured with `http_status_as_error(false)` so non-200
/// responses are returned as data and the client decides what they mean.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut response = self
            .agent
            .get(&request.url)
            .call()
            .map_err(TransportError::new)?;
        let status = response.status().as_u16();
        if status != 200 {
            return Ok(HttpResponse {
                status,
                body: String::new(),
            });
        }
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(TransportError::new)?;

        Ok(HttpResponse { status, body })
    }
}
