//! Cooperative cancellation for the shrink loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Polled once at the top of every search iteration.
pub trait Cancellation {
    fn is_cancelled(&self) -> bool;
}

/// Never cancels. Used by the convenience entry points.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl Cancellation for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Shareable flag: clone it, hand one copy to the search, call
/// [`CancelFlag::cancel`] on another.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

impl Cancellation for CancelFlag {
    fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
