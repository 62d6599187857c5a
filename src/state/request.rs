//! Monotonic request ids for latest-only page loads.

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;

/// Opaque id issued per page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

/// Tracks the most recent load; responses for any older id are stale.
#[derive(Debug, Clone, Default)]
pub struct LatestOnly {
    next: u64,
    active: Option<RequestId>,
}

impl LatestOnly {
    /// Start a new request, superseding any outstanding one.
    pub fn begin(&mut self) -> RequestId {
        let id = RequestId(self.next);
        self.next += 1;
        self.active = Some(id);
        id
    }

    /// Forget the outstanding request; its response will be dropped.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn is_active(&self, id: RequestId) -> bool {
        self.active == Some(id)
    }

    pub fn has_active(&self) -> bool {
        self.active.is_some()
    }

    /// Finish `id` if it is still the latest; returns false for stale ids.
    pub fn finish_if_active(&mut self, id: RequestId) -> bool {
        if self.is_active(id) {
            self.active = None;
            true
        } else {
            false
        }
    }
}
