//! Millisecond clock abstraction.
//!
//! The scheduler and animation engine take timestamps rather than reading
//! time themselves, so tests can drive them with a fake clock.

use std::time::Instant;

/// A monotonic millisecond clock.
pub trait Clock {
    /// Milliseconds elapsed since some fixed origin.
    fn now_ms(&self) -> u64;
}

/// Wall clock anchored at construction.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}
