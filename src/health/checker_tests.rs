//! Tests for the health check.

use super::mock::{Answer, MockClient};
use super::{HealthChecker, HealthReport, HttpError};

fn endpoint() -> url::Url {
    url::Url::parse("https://api.threathunting.com.cn/").unwrap()
}

mod report {
    use super::*;

    #[test]
    fn only_200_is_healthy() {
        for (code, healthy) in [(200, true), (204, false), (301, false), (503, false)] {
            let report = HealthReport {
                status: http::StatusCode::from_u16(code).unwrap(),
            };
            assert_eq!(report.healthy(), healthy, "{code}");
        }
    }

    #[test]
    fn display_is_numeric_code() {
        let report = HealthReport {
            status: http::StatusCode::SERVICE_UNAVAILABLE,
        };
        assert_eq!(report.to_string(), "503");
    }
}

mod check {
    use super::*;

    #[tokio::test]
    async fn ok_answer_is_healthy() {
        let checker = HealthChecker::new(MockClient::new(Answer::Status(200)), endpoint());

        let report = checker.check().await.unwrap();

        assert!(report.healthy());
    }

    #[tokio::test]
    async fn service_unavailable_is_unhealthy_not_error() {
        let checker = HealthChecker::new(MockClient::new(Answer::Status(503)), endpoint());

        let report = checker.check().await.unwrap();

        assert!(!report.healthy());
        assert_eq!(report.status, http::StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn unreachable_host_is_error() {
        let checker = HealthChecker::new(MockClient::new(Answer::Unreachable), endpoint());

        let result = checker.check().await;

        assert!(matches!(result, Err(HttpError::Connection(_))));
    }

    #[tokio::test]
    async fn timeout_is_error() {
        let checker = HealthChecker::new(MockClient::new(Answer::Timeout), endpoint());

        assert!(matches!(checker.check().await, Err(HttpError::Timeout)));
    }

    #[tokio::test]
    async fn sends_single_get_to_configured_url() {
        let checker = HealthChecker::new(MockClient::new(Answer::Status(200)), endpoint());

        checker.check().await.unwrap();

        let requests = checker.client().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, http::Method::GET);
        assert_eq!(requests[0].url, endpoint());
        assert!(requests[0].headers.contains_key(http::header::USER_AGENT));
    }
}
