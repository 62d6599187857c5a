//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render pieces of the home screen from props and report user
//! intent through callbacks; the page owns every state transition.

pub mod pager;
pub mod post_card;
pub mod post_form;
