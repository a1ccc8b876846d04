//! Single-flight guard for async operations.

use std::sync::atomic::{AtomicBool, Ordering};

/// Tracks whether a logical operation is currently running.
#[derive(Debug, Default)]
pub struct InFlight(AtomicBool);

impl InFlight {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the operation as running, or `None` if it already is.
    #[must_use]
    pub fn try_acquire(&self) -> Option<InFlightGuard<'_>> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(&self.0))
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Clears the flag when dropped, including when the owning future is dropped mid-await.
#[derive(Debug)]
pub struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_until_guard_drops() {
        let flag = InFlight::new();

        let guard = flag.try_acquire();

        assert!(guard.is_some());
        assert!(flag.try_acquire().is_none());
        assert!(flag.is_running());

        drop(guard);

        assert!(flag.try_acquire().is_some());
    }
}
