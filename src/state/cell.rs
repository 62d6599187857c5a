//! Uniform read/mutate access to state held in a `RefCell` or a Leptos signal.

#[cfg(test)]
#[path = "cell_test.rs"]
mod cell_test;

use std::cell::RefCell;

use leptos::prelude::{RwSignal, WithUntracked, Write};

/// A container the synchronizer can read and mutate without holding a borrow
/// across an `.await`.
pub trait StateCell<T> {
    fn with_state<R>(&self, f: impl FnOnce(&T) -> R) -> R;
    fn update_state<R>(&self, f: impl FnOnce(&mut T) -> R) -> R;
}

impl<T> StateCell<T> for RefCell<T> {
    fn with_state<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.borrow())
    }

    fn update_state<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

/// Reads are untracked; writes notify subscribers when the guard drops.
impl<T: Send + Sync + 'static> StateCell<T> for RwSignal<T> {
    fn with_state<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.with_untracked(f)
    }

    fn update_state<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.write();
        f(&mut *guard)
    }
}
