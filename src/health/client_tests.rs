//! Tests for `ReqwestClient`.

use std::time::Duration;

use super::{HttpClient, HttpError, HttpRequest, ReqwestClient};

#[test]
fn builds_with_and_without_timeout() {
    assert!(ReqwestClient::with_timeout(Some(Duration::from_secs(3))).is_ok());
    assert!(ReqwestClient::with_timeout(None).is_ok());
}

#[test]
fn client_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestClient>();
}

#[tokio::test]
async fn refused_connection_is_connection_error() {
    // Port 1 (tcpmux) is closed on any ordinary host
    let client = ReqwestClient::with_timeout(Some(Duration::from_secs(5))).unwrap();
    let url = url::Url::parse("http://127.0.0.1:1/").unwrap();

    let result = client.request(HttpRequest::get(url)).await;

    assert!(matches!(result, Err(HttpError::Connection(_))));
}

#[test]
fn error_messages_name_the_failure() {
    assert_eq!(HttpError::Timeout.to_string(), "no answer before the timeout");
    assert!(
        HttpError::InvalidUrl("relative URL".into())
            .to_string()
            .starts_with("invalid request URL")
    );
}
