//! `reqwest` transport for the shared API client.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use blog_client::error::ClientError;
use blog_client::net::api::{ApiRequest, ApiResponse, Method, Transport};

#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn http_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let mut builder = self.client.request(http_method(request.method), &request.url);
        if let Some(token) = request.bearer.as_deref() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.body.as_ref() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| ClientError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        tracing::debug!(status, bytes = text.len(), "response received");
        Ok(ApiResponse { status, body: serde_json::from_str(&text).ok() })
    }
}
