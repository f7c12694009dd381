//! HTTP transport seam
//!
//! The auth and API layers only see [`HttpRequest`] / [`HttpResponse`]; the
//! production implementation is [`ReqwestTransport`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Method};
use serde_json::Value;
use tracing::debug;

use crate::error::{TickTickError, TickTickResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(Value),
    /// `application/x-www-form-urlencoded` pairs
    Form(Vec<(String, String)>),
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// Full `Authorization` header value (`Bearer ...` / `Basic ...`)
    pub authorization: Option<String>,
    pub body: Body,
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"))
    }
}

/// Sends one HTTP request and returns the raw response
///
/// Non-2xx statuses are not errors at this level; callers inspect `status`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> TickTickResult<HttpResponse>;
}

/// reqwest-backed transport with a fixed per-call timeout
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> TickTickResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("ticktick-mcp/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| TickTickError::Transport(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> TickTickResult<HttpResponse> {
        debug!(method = %request.method, url = %request.url, "sending request");

        let mut builder = self.client.request(request.method, &request.url);
        if let Some(authorization) = &request.authorization {
            builder = builder.header(header::AUTHORIZATION, authorization);
        }
        builder = match request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(&value),
            Body::Form(pairs) => builder.form(&pairs),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| TickTickError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .map_err(|e| TickTickError::Transport(e.to_string()))?;

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_json_matches_charset_variants() {
        assert!(json(200, json!({})).is_json());
        assert!(!empty(200).is_json());
        assert!(!text(500, "oops").is_json());
    }

    #[tokio::test]
    async fn test_fake_transport_records_requests() {
        let transport = FakeTransport::new(|_| empty(204));
        let response = transport
            .send(HttpRequest {
                method: Method::DELETE,
                url: "https://example.test/project/p1".to_string(),
                authorization: Some("Bearer t".to_string()),
                body: Body::Empty,
            })
            .await
            .unwrap();

        assert_eq!(response.status, 204);
        assert_eq!(transport.count(Method::DELETE, "/project/p1"), 1);
    }
}
