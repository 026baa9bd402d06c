//! [`HttpClient`] over reqwest.

use std::time::Duration;

use super::{HttpClient, HttpError, HttpRequest, ResponseHead};

/// The production client.
///
/// Only the head of each answer is kept; the response is dropped before
/// its body is downloaded.
///
/// # Example
///
/// ```no_run
/// use netconsole::health::{HttpClient, HttpRequest, ReqwestClient};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::with_timeout(None)?;
/// let head = client.request(HttpRequest::get(Url::parse("https://example.com/")?)).await?;
/// println!("{}", head.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a client, bounding every request by `timeout` if given.
    ///
    /// Without a timeout reqwest's own defaults apply.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Build`] if the TLS backend cannot be initialized.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, HttpError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let inner = builder.build().map_err(|e| HttpError::Build(Box::new(e)))?;
        Ok(Self { inner })
    }
}

fn classify(error: reqwest::Error) -> HttpError {
    if error.is_timeout() {
        HttpError::Timeout
    } else if error.is_builder() {
        HttpError::InvalidUrl(error.to_string())
    } else {
        HttpError::Connection(Box::new(error))
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<ResponseHead, HttpError> {
        let response = self
            .inner
            .request(req.method, req.url)
            .headers(req.headers)
            .send()
            .await
            .map_err(classify)?;

        let head = ResponseHead::new(response.status(), response.headers().clone());
        drop(response);
        Ok(head)
    }
}
