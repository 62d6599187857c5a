//! Trunk entry point for the CSR build.

fn main() {
    #[cfg(feature = "csr")]
    blog_client::start();
}
