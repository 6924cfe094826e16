//! Process-wide stop request
//!
//! Set from the receive path, polled by the motion engine once per tick.

use portable_atomic::{AtomicBool, Ordering};

/// Cooperative cancellation flag shared between the receive path and the
/// motion engine
#[derive(Debug, Default)]
pub struct StopFlag {
    requested: AtomicBool,
}

impl StopFlag {
    pub const fn new() -> Self {
        Self {
            requested: AtomicBool::new(false),
        }
    }

    /// Ask the motion in progress (or the next one) to stop
    pub fn request(&self) {
        self.requested.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    pub fn clear(&self) {
        self.requested.store(false, Ordering::Release);
    }

    /// Clear the flag, returning whether it was set
    pub fn take(&self) -> bool {
        self.requested.swap(false, Ordering::AcqRel)
    }
}
