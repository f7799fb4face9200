//! HTTP transport for load test submissions.
//!
//! [`Transport`] is the boundary between building a submission and putting
//! it on the wire. [`ApiClient`] is the blocking `reqwest` implementation;
//! tests substitute their own.

use reqwest::{
    StatusCode,
    header::{self, HeaderMap},
};
use tracing::debug;
use url::Url;

use crate::prelude::*;

/// A fully built submission: target, content type and encoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTestRequest {
    pub url: Url,
    pub content_type: &'static str,
    pub body: String,
}

/// Raw response of the server, uninterpreted.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl Response {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Sends one [`LoadTestRequest`] and blocks until the response arrives.
pub trait Transport {
    fn send(&self, request: &LoadTestRequest) -> Result<Response>;
}

/// Blocking HTTP client posting submissions with `reqwest`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub client: reqwest::blocking::Client,
}

impl ApiClient {
    /// Creates a client with `reqwest`'s default timeouts and TLS setup.
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::ClientBuilder::new()
            .user_agent(concat!("dzclient/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for ApiClient {
    fn send(&self, request: &LoadTestRequest) -> Result<Response> {
        debug!(url = %request.url, bytes = request.body.len(), "Posting load test");
        let response = self
            .client
            .post(request.url.clone())
            .header(header::CONTENT_TYPE, request.content_type)
            .body(request.body.clone())
            .send()?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text()?;
        debug!(%status, "Load test response");
        Ok(Response {
            status,
            headers,
            body,
        })
    }
}
