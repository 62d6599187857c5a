//! Networking modules for the blog REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` owns endpoints and response rules, `types` defines the wire schema,
//! and `http` is the browser transport.

pub mod api;
#[cfg(feature = "csr")]
pub mod http;
pub mod types;

#[cfg(test)]
pub(crate) mod scripted;
