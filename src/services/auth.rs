//! Sign-in and sign-up: one-shot credential exchanges.
//!
//! Sign-in installs the issued token in the session; sign-up only registers
//! the account and leaves the caller to sign in afterwards.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::error::{ClientError, SIGN_IN_FIELDS_REQUIRED, SIGN_UP_FIELDS_REQUIRED};
use crate::net::api::{ApiClient, Transport};
use crate::net::types::{SignInRequest, SignUpRequest};
use crate::state::cell::StateCell;
use crate::state::session::Session;

/// Trim the email and require both fields. The password is sent verbatim.
///
/// # Errors
///
/// `ClientError::Validation` when either field is blank.
pub fn validate_sign_in(email: &str, password: &str) -> Result<SignInRequest, ClientError> {
    let email = email.trim();
    if email.is_empty() || password.trim().is_empty() {
        return Err(ClientError::validation(SIGN_IN_FIELDS_REQUIRED));
    }
    Ok(SignInRequest { email: email.to_owned(), password: password.to_owned() })
}

/// Trim every field except the password and require all five.
///
/// # Errors
///
/// `ClientError::Validation` when any field is blank.
pub fn validate_sign_up(form: &SignUpRequest) -> Result<SignUpRequest, ClientError> {
    let cleaned = SignUpRequest {
        name: form.name.trim().to_owned(),
        email: form.email.trim().to_owned(),
        password: form.password.clone(),
        phone_number: form.phone_number.trim().to_owned(),
        address: form.address.trim().to_owned(),
    };
    let any_blank = [&cleaned.name, &cleaned.email, &cleaned.phone_number, &cleaned.address]
        .iter()
        .any(|field| field.is_empty())
        || cleaned.password.trim().is_empty();
    if any_blank {
        return Err(ClientError::validation(SIGN_UP_FIELDS_REQUIRED));
    }
    Ok(cleaned)
}

/// Exchange credentials for a token and install it in `session`.
///
/// # Errors
///
/// `Validation`, `Auth` (credentials rejected), or `Network`. The session is
/// left untouched on failure.
pub async fn sign_in<T: Transport>(
    api: &ApiClient<T>,
    session: &impl StateCell<Session>,
    email: &str,
    password: &str,
) -> Result<String, ClientError> {
    let creds = validate_sign_in(email, password)?;
    let token = api.sign_in(&creds).await?;
    session.update_state(|s| s.set_token(&token));
    log::debug!("signed in as {}", creds.email);
    Ok(token)
}

/// Register a new account. Does not sign in.
///
/// # Errors
///
/// `Validation` or `Network` carrying the server's message.
pub async fn sign_up<T: Transport>(api: &ApiClient<T>, form: &SignUpRequest) -> Result<(), ClientError> {
    let cleaned = validate_sign_up(form)?;
    api.sign_up(&cleaned).await?;
    log::debug!("registered {}", cleaned.email);
    Ok(())
}
