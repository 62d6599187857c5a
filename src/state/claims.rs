//! Unverified identity claims carried in the bearer token.
//!
//! The signature is never checked here. Decoded claims only decide which
//! controls the UI offers (edit/delete on the user's own posts); the server
//! remains the authority on what the token may do.

#[cfg(test)]
#[path = "claims_test.rs"]
mod claims_test;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Decode the claims segment of `token`. Returns `None` for anything malformed.
pub fn decode_claims(token: &str) -> Option<Claims> {
    let mut segments = token.split('.');
    let _header = segments.next()?;
    let payload = segments.next()?;
    let bytes = decode_segment(payload)?;
    serde_json::from_slice(&bytes).ok()
}

/// Accept base64url or standard base64, with or without padding.
fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    let normalized: String = segment
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    if normalized.is_empty() {
        return None;
    }
    URL_SAFE_NO_PAD.decode(normalized).ok()
}
