//! Failures to obtain any answer from the endpoint.

use std::error::Error as StdError;

use thiserror::Error;

type BoxError = Box<dyn StdError + Send + Sync>;

/// The endpoint could not be asked.
///
/// Distinct from an unhealthy answer: a 503 is a [`HealthReport`], not an
/// error.
///
/// [`HealthReport`]: super::HealthReport
#[derive(Debug, Error)]
pub enum HttpError {
    /// DNS, TCP or TLS failure.
    #[error("cannot connect: {0}")]
    Connection(#[source] BoxError),

    /// No answer before the client timeout.
    #[error("no answer before the timeout")]
    Timeout,

    /// The request could not be formed from the URL.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    /// The client could not be created.
    #[error("cannot create HTTP client: {0}")]
    Build(#[source] BoxError),
}
