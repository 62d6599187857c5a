//! Client state: session, post page cache, and the post draft.
//!
//! DESIGN
//! ======
//! State types are plain structs with pure transition methods. The web app
//! wraps them in `RwSignal`s provided via context; the CLI and tests wrap them
//! in `RefCell`s. `cell::StateCell` lets the synchronizer treat both alike.

pub mod cell;
pub mod claims;
pub mod draft;
pub mod posts;
pub mod request;
pub mod session;
