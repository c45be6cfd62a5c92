// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling.
//!
//! History events are stamped with wall-clock nanoseconds, so the clock
//! resolution here is nanoseconds since the Unix epoch.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A clock that provides the current time
pub trait Clock: Clone + Send + Sync {
    fn now_nanos(&self) -> i64;
}

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_nanos(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as i64
    }
}

/// Fake clock for testing with controllable time
#[derive(Clone)]
pub struct FakeClock {
    nanos: Arc<Mutex<i64>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self { nanos: Arc::new(Mutex::new(1_000_000_000)) }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        *self.nanos.lock() += duration.as_nanos() as i64;
    }

    /// Set the clock to an absolute nanosecond timestamp
    pub fn set_nanos(&self, nanos: i64) {
        *self.nanos.lock() = nanos;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now_nanos(&self) -> i64 {
        *self.nanos.lock()
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
