//! The endpoint health check.

use std::fmt;

use super::{HttpClient, HttpError, HttpRequest};

/// Outcome of a completed health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthReport {
    /// Status code returned by the endpoint.
    pub status: http::StatusCode,
}

impl HealthReport {
    /// The endpoint is healthy only if it answered exactly `200 OK`.
    #[must_use]
    pub fn healthy(&self) -> bool {
        self.status == http::StatusCode::OK
    }
}

impl fmt::Display for HealthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status.as_u16())
    }
}

/// Issues one GET to a fixed URL and classifies the answer.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
#[derive(Debug)]
pub struct HealthChecker<H> {
    client: H,
    url: url::Url,
}

impl<H> HealthChecker<H> {
    /// Creates a checker for `url`.
    #[must_use]
    pub const fn new(client: H, url: url::Url) -> Self {
        Self { client, url }
    }

    /// Returns the HTTP client.
    #[must_use]
    pub const fn client(&self) -> &H {
        &self.client
    }

    /// Returns the checked URL.
    #[must_use]
    pub const fn url(&self) -> &url::Url {
        &self.url
    }
}

impl<H: HttpClient> HealthChecker<H> {
    /// Performs the check.
    ///
    /// Any answer, whatever its status, is a [`HealthReport`].
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if no answer was obtained.
    pub async fn check(&self) -> Result<HealthReport, HttpError> {
        let request = HttpRequest::get(self.url.clone()).with_header(
            http::header::USER_AGENT,
            http::HeaderValue::from_static(concat!("netconsole/", env!("CARGO_PKG_VERSION"))),
        );

        tracing::debug!("GET {}", self.url);
        let response = self.client.request(request).await.inspect_err(|e| {
            tracing::warn!("Health check of {} failed: {e}", self.url);
        })?;
        tracing::debug!("{} answered {}", self.url, response.status);

        Ok(HealthReport {
            status: response.status,
        })
    }
}
