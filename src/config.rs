//! API endpoint configuration.
//!
//! The base URL is baked in at compile time (`BLOG_API_BASE_URL`) because a
//! static CSR bundle has no process environment to read at runtime. The CLI
//! overrides it from its own flags.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "https://cs2-hm11-beta.vercel.app";
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// `localStorage` key holding the bearer token.
pub const TOKEN_STORAGE_KEY: &str = "token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub page_size: u32,
}

impl ApiConfig {
    /// Build a config for `base_url`, dropping any trailing slash.
    pub fn with_base_url(base_url: &str) -> Self {
        Self { base_url: normalize_base_url(base_url), page_size: DEFAULT_PAGE_SIZE }
    }

    /// Join an absolute API path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::with_base_url(option_env!("BLOG_API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL))
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}
