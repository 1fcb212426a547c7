//! Mount tracking for views that issue async fetches.
//!
//! In-flight requests are never aborted. A view holds a [`Mount`] and checks
//! it before applying a response, so results arriving after the view is gone
//! are dropped instead of written into stale state.

#[cfg(test)]
#[path = "mount_test.rs"]
mod mount_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone, Debug)]
pub struct Mount {
    alive: Arc<AtomicBool>,
}

impl Mount {
    /// A freshly mounted view.
    pub fn new() -> Self {
        Self { alive: Arc::new(AtomicBool::new(true)) }
    }

    pub fn is_mounted(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Mark the view gone. Every clone observes it.
    pub fn unmount(&self) {
        self.alive.store(false, Ordering::Release);
    }

    /// Pass `value` through only while still mounted.
    pub fn accept<T>(&self, value: T) -> Option<T> {
        if self.is_mounted() {
            Some(value)
        } else {
            tracing::debug!("discarding response for unmounted view");
            None
        }
    }
}

impl Default for Mount {
    fn default() -> Self {
        Self::new()
    }
}
