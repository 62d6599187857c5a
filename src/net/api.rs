//! REST API client for the blog service.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ApiClient` owns endpoint paths and response interpretation. The actual
//! HTTP exchange sits behind [`Transport`] so the browser (`gloo-net`), the
//! CLI (`reqwest`) and the tests (scripted responses) share every rule about
//! status codes, error messages and body shapes.
//!
//! ERROR HANDLING
//! ==============
//! A `401` on an authenticated endpoint becomes `ClientError::Auth`; any other
//! non-success status becomes `ClientError::Network` carrying the server's
//! `message` when it sent one.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde_json::Value;

use super::types::{Post, PostBody, PostsPage, SignInRequest, SignUpRequest};
use crate::config::ApiConfig;
use crate::error::{
    ClientError, DELETE_POST_FAILED, FETCH_POSTS_FAILED, REQUEST_FAILED, SESSION_EXPIRED, SIGN_IN_FAILED,
    SIGN_UP_FAILED, server_message,
};

const STATUS_UNAUTHORIZED: u16 = 401;
const STATUS_FORBIDDEN: u16 = 403;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// One outgoing HTTP exchange.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// Bearer token for the `Authorization` header.
    pub bearer: Option<String>,
    /// JSON body; sent with `Content-Type: application/json`.
    pub body: Option<Value>,
}

/// Status plus the decoded JSON body, if the response had one.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a single HTTP exchange.
///
/// Implementations return `Err` only for transport-level failures (DNS,
/// connection reset, CORS). Any HTTP status, including errors, is `Ok`.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError>;
}

fn sign_up_endpoint() -> &'static str {
    "/auth/sign-up"
}

fn sign_in_endpoint() -> &'static str {
    "/auth/sign-in"
}

fn posts_page_endpoint(page: u32, limit: u32) -> String {
    format!("/posts?page={page}&limit={limit}")
}

fn posts_endpoint() -> &'static str {
    "/posts"
}

fn post_endpoint(id: &str) -> String {
    format!("/posts/{id}")
}

/// Typed client over a [`Transport`].
#[derive(Clone, Debug)]
pub struct ApiClient<T> {
    transport: T,
    config: ApiConfig,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, config: ApiConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `POST /auth/sign-up`. Success carries no data.
    ///
    /// # Errors
    ///
    /// `Network` with the server's message (or a generic one) on rejection.
    pub async fn sign_up(&self, form: &SignUpRequest) -> Result<(), ClientError> {
        let resp = self.send(Method::Post, sign_up_endpoint(), None, Some(to_json(form)?)).await?;
        if !resp.is_success() {
            return Err(ClientError::Network(server_message(resp.body.as_ref(), SIGN_UP_FAILED)));
        }
        Ok(())
    }

    /// `POST /auth/sign-in`, returning the issued token.
    ///
    /// # Errors
    ///
    /// `Auth` when the credentials are rejected, `Network` otherwise.
    pub async fn sign_in(&self, creds: &SignInRequest) -> Result<String, ClientError> {
        let resp = self.send(Method::Post, sign_in_endpoint(), None, Some(to_json(creds)?)).await?;
        if !resp.is_success() {
            let message = server_message(resp.body.as_ref(), SIGN_IN_FAILED);
            if matches!(resp.status, STATUS_UNAUTHORIZED | STATUS_FORBIDDEN) {
                return Err(ClientError::Auth(message));
            }
            return Err(ClientError::Network(message));
        }
        resp.body
            .as_ref()
            .and_then(|b| b.get("token"))
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(ToOwned::to_owned)
            .ok_or_else(|| ClientError::Network(SIGN_IN_FAILED.to_owned()))
    }

    /// `GET /posts?page=N&limit=L`.
    ///
    /// # Errors
    ///
    /// `Auth` on `401`, `Network` on any other failure.
    pub async fn list_posts(&self, token: &str, page: u32) -> Result<PostsPage, ClientError> {
        let path = posts_page_endpoint(page, self.config.page_size);
        let resp = self.send(Method::Get, &path, Some(token), None).await?;
        if resp.status == STATUS_UNAUTHORIZED {
            return Err(ClientError::Auth(SESSION_EXPIRED.to_owned()));
        }
        if !resp.is_success() {
            return Err(ClientError::Network(FETCH_POSTS_FAILED.to_owned()));
        }
        Ok(PostsPage::from_body(resp.body.as_ref().unwrap_or(&Value::Null)))
    }

    /// `POST /posts`.
    ///
    /// # Errors
    ///
    /// `Auth` on `401`, `Network` on any other failure.
    pub async fn create_post(&self, token: &str, body: &PostBody) -> Result<Post, ClientError> {
        let resp = self.send(Method::Post, posts_endpoint(), Some(token), Some(to_json(body)?)).await?;
        post_from_response(resp)
    }

    /// `PUT /posts/:id`.
    ///
    /// # Errors
    ///
    /// `Auth` on `401`, `Network` on any other failure.
    pub async fn update_post(&self, token: &str, id: &str, body: &PostBody) -> Result<Post, ClientError> {
        let resp = self.send(Method::Put, &post_endpoint(id), Some(token), Some(to_json(body)?)).await?;
        post_from_response(resp)
    }

    /// `DELETE /posts/:id`.
    ///
    /// # Errors
    ///
    /// `Auth` on `401`, `Network` on any other failure.
    pub async fn delete_post(&self, token: &str, id: &str) -> Result<(), ClientError> {
        let resp = self.send(Method::Delete, &post_endpoint(id), Some(token), None).await?;
        if resp.status == STATUS_UNAUTHORIZED {
            return Err(ClientError::Auth(SESSION_EXPIRED.to_owned()));
        }
        if !resp.is_success() {
            return Err(ClientError::Network(DELETE_POST_FAILED.to_owned()));
        }
        Ok(())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        bearer: Option<&str>,
        body: Option<Value>,
    ) -> Result<ApiResponse, ClientError> {
        let request = ApiRequest { method, url: self.config.url(path), bearer: bearer.map(ToOwned::to_owned), body };
        log::debug!("{:?} {}", request.method, request.url);
        let resp = self.transport.send(request).await?;
        if !resp.is_success() {
            log::warn!("{:?} {} -> {}", method, path, resp.status);
        }
        Ok(resp)
    }
}

fn post_from_response(resp: ApiResponse) -> Result<Post, ClientError> {
    if resp.status == STATUS_UNAUTHORIZED {
        return Err(ClientError::Auth(server_message(resp.body.as_ref(), SESSION_EXPIRED)));
    }
    if !resp.is_success() {
        return Err(ClientError::Network(server_message(resp.body.as_ref(), REQUEST_FAILED)));
    }
    resp.body
        .and_then(|mut b| b.get_mut("post").map(Value::take))
        .and_then(|post| serde_json::from_value::<Post>(post).ok())
        .ok_or_else(|| ClientError::Network(REQUEST_FAILED.to_owned()))
}

fn to_json<S: serde::Serialize>(value: &S) -> Result<Value, ClientError> {
    serde_json::to_value(value).map_err(|e| ClientError::Network(e.to_string()))
}
