//! The request and response-head types behind [`HttpClient`].
//!
//! Built on `http` crate types so the checker never names the client
//! library.

use std::future::Future;

use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use url::Url;

use super::HttpError;

/// A bodiless request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Request method; the health check only issues `GET`.
    pub method: Method,
    /// Target URL
    pub url: Url,
    /// Extra request headers
    pub headers: HeaderMap,
}

impl HttpRequest {
    /// Creates a `GET` request for `url`.
    #[must_use]
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            headers: HeaderMap::new(),
        }
    }

    /// Adds a header; repeated names keep every value.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }
}

/// Status line and headers of an answer. The body is never part of it.
#[derive(Debug, Clone)]
pub struct ResponseHead {
    /// Status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
}

impl ResponseHead {
    /// Creates a head from its parts.
    #[must_use]
    pub const fn new(status: StatusCode, headers: HeaderMap) -> Self {
        Self { status, headers }
    }

    /// Creates a head carrying only `status`.
    #[must_use]
    pub fn status_only(status: StatusCode) -> Self {
        Self::new(status, HeaderMap::new())
    }
}

/// Sends one request and hands back the head of the answer.
///
/// Implementations must drop the response without reading the body so the
/// connection is released on every path.
pub trait HttpClient: Send + Sync {
    /// Sends `req`.
    ///
    /// Any status, including 4xx and 5xx, is a successful exchange.
    ///
    /// # Errors
    ///
    /// - [`HttpError::Connection`] if the endpoint cannot be reached
    /// - [`HttpError::Timeout`] if no answer arrives in time
    /// - [`HttpError::InvalidUrl`] if the request cannot be formed
    fn request(&self, req: HttpRequest)
    -> impl Future<Output = Result<ResponseHead, HttpError>> + Send;
}
