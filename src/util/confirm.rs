//! Blocking confirmation prompt.

pub const DELETE_POST_PROMPT: &str = "Are you sure you want to delete this post?";

/// Ask the user to confirm `message` with `window.confirm`.
///
/// Returns `false` when there is no browser window or the dialog is
/// suppressed, so destructive actions default to not happening.
pub fn confirm(message: &str) -> bool {
    #[cfg(feature = "csr")]
    {
        web_sys::window().and_then(|w| w.confirm_with_message(message).ok()).unwrap_or(false)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = message;
        false
    }
}
