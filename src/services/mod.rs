//! Client-side operations the views and the CLI invoke.
//!
//! ARCHITECTURE
//! ============
//! Services sequence API calls and state transitions. They hold no state of
//! their own: the session and post page live in `StateCell`s owned by the
//! caller, which is what lets the browser and the terminal share them.

pub mod auth;
pub mod posts;
