//! Browser transport backed by `gloo-net` (`fetch`).

use gloo_net::http::Request;

use super::api::{ApiRequest, ApiResponse, Method, Transport};
use crate::error::ClientError;

/// `fetch`-based transport. Relies on the browser's default timeout.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        };
        if let Some(token) = request.bearer.as_deref() {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }
        let prepared = match request.body.as_ref() {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|e| ClientError::Network(e.to_string()))?;

        let resp = prepared.send().await.map_err(|e| ClientError::Network(e.to_string()))?;
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).ok();
        Ok(ApiResponse { status, body })
    }
}
