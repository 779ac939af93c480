//! HTTP transport seam.
//!
//! # Design
//! The core never touches the network. It hands a fully merged
//! [`HttpRequest`] — verb, resolved URL, parameter set — to a [`Transport`]
//! supplied by the caller and gets back a plain-data [`HttpResponse`].
//! Whether parameters travel as a query string or as body fields is the
//! transport's convention, not the core's; so is connection management,
//! TLS, timeouts, and retries.
//!
//! All fields use owned types so requests and responses can be captured,
//! logged, or replayed by test doubles without lifetime concerns.

use crate::error::BoxError;

/// An HTTP request described as plain data.
///
/// `params` is the merged parameter set in final merge order (constants,
/// then provided implicits, then positional arguments; later sources
/// overwrite earlier values for the same name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub params: Vec<(String, String)>,
}

/// An HTTP response described as plain data, produced by the transport.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Executes one HTTP round-trip.
///
/// Implementations are expected to block until the response is available
/// (or fail with their own error). They must be safe to share across
/// threads: one transport instance backs every executor of a client.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError>;
}
