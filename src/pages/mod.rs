//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components` and state transitions to `services`.

pub mod home;
pub mod sign_in;
pub mod sign_up;
