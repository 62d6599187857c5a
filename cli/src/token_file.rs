//! File-backed token store: the terminal counterpart of `localStorage`.
//!
//! TRADE-OFFS
//! ==========
//! Like the browser store, failures are logged and swallowed. A token that
//! cannot be written still serves the current command.

#[cfg(test)]
#[path = "token_file_test.rs"]
mod token_file_test;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use blog_client::state::session::TokenStore;

const TOKEN_DIR: &str = ".blog-cli";
const TOKEN_FILE: &str = "token";

/// `$HOME/.blog-cli/token`, or `None` without a home directory.
pub fn default_token_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME").filter(|h| !h.is_empty())?;
    Some(Path::new(&home).join(TOKEN_DIR).join(TOKEN_FILE))
}

#[derive(Clone, Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let token = raw.trim();
        (!token.is_empty()).then(|| token.to_owned())
    }

    fn save(&self, token: &str) {
        if let Err(error) = self.write(token) {
            tracing::warn!(path = %self.path.display(), %error, "failed to persist token");
        }
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(error) if error.kind() == io::ErrorKind::NotFound => {}
            Err(error) => tracing::warn!(path = %self.path.display(), %error, "failed to remove token"),
        }
    }
}
