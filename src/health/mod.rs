//! Endpoint health checking over HTTP.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Response heads ([`ResponseHead`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - The health check itself ([`HealthChecker`], [`HealthReport`])

mod checker;
mod client;
mod error;
mod http;

#[cfg(test)]
mod checker_tests;
#[cfg(test)]
mod client_tests;

pub use checker::{HealthChecker, HealthReport};
pub use client::ReqwestClient;
pub use error::HttpError;
pub use http::{HttpClient, HttpRequest, ResponseHead};
