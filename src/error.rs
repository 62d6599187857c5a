//! Client error taxonomy.
//!
//! ERROR HANDLING
//! ==============
//! Every action boundary (submit, delete, page load, sign-in, sign-up)
//! collapses failures into one `ClientError` whose `Display` is the message
//! shown in the view. Nothing is retried.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;

pub const FETCH_POSTS_FAILED: &str = "Failed to fetch posts";
pub const DELETE_POST_FAILED: &str = "Failed to delete post";
pub const REQUEST_FAILED: &str = "Request failed";
pub const SIGN_IN_FAILED: &str = "Sign in failed";
pub const SIGN_UP_FAILED: &str = "Sign up failed";
pub const POST_FIELDS_REQUIRED: &str = "Title and content are required";
pub const SIGN_IN_FIELDS_REQUIRED: &str = "Email and password are required";
pub const SIGN_UP_FIELDS_REQUIRED: &str = "All fields are required";
pub const SESSION_EXPIRED: &str = "Session expired, please sign in again";
pub const SIGN_IN_REQUIRED: &str = "Please sign in";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// Required local input is missing; never reaches the network.
    #[error("{0}")]
    Validation(String),
    /// Token missing, invalid, or expired; callers force a logout.
    #[error("{0}")]
    Auth(String),
    /// Transport failure or a non-success status without a more specific cause.
    #[error("{0}")]
    Network(String),
    /// An action of the same kind is still outstanding.
    #[error("another request is still in progress")]
    Busy,
}

impl ClientError {
    pub fn validation(message: &str) -> Self {
        Self::Validation(message.to_owned())
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// Whether the view should surface this error. `Busy` is swallowed.
    pub fn is_reportable(&self) -> bool {
        !matches!(self, Self::Busy)
    }
}

/// Pull the server-provided `message` out of an error body, or fall back.
pub fn server_message(body: Option<&Value>, fallback: &str) -> String {
    body.and_then(|b| b.get("message"))
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(fallback)
        .to_owned()
}
