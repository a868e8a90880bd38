//! Time sources for the frame scheduler
//!
//! Timestamps are milliseconds as `f64`, the unit platform frame callbacks
//! report. Only differences between two readings are meaningful.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Source of frame timestamps
pub trait Clock {
    /// Current timestamp in milliseconds
    fn now_ms(&self) -> f64;
}

/// Monotonic wall clock measured from its creation
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    /// Create a clock reading zero now
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven clock
///
/// Clones share the same reading, so a test can keep one copy and hand the
/// other to the scheduler.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    /// Create a clock reading `start_ms`
    pub fn new(start_ms: f64) -> Self {
        Self { now: Rc::new(Cell::new(start_ms)) }
    }

    /// Set the reading
    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    /// Move the reading forward
    pub fn advance(&self, delta_ms: f64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}
