// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wall clock abstraction for testable timestamps

use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, Mutex};

/// Seconds between the Unix epoch and the GPS epoch (1980-01-06)
const GPS_EPOCH_OFFSET: i64 = 315_964_800;

/// Leap seconds accumulated since the GPS epoch
const LEAP_SECONDS: i64 = 18;

/// A clock that provides the current UTC time
pub trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;

    /// Current time in GPS seconds
    fn gps_now(&self) -> f64 {
        gps_time(self.now())
    }
}

/// Convert a UTC timestamp to GPS seconds
pub fn gps_time(at: DateTime<Utc>) -> f64 {
    let seconds = at.timestamp() - GPS_EPOCH_OFFSET + LEAP_SECONDS;
    seconds as f64 + f64::from(at.timestamp_subsec_micros()) / 1e6
}

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fake clock for testing with controllable time
#[derive(Clone)]
pub struct FakeClock {
    current: Arc<Mutex<DateTime<Utc>>>,
}

impl FakeClock {
    /// A clock stopped at `at`
    pub fn at(at: DateTime<Utc>) -> Self {
        Self {
            current: Arc::new(Mutex::new(at)),
        }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current += duration;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::at(DateTime::<Utc>::default())
    }
}

impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
