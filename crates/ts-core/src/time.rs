//! Clock time model.
//!
//! # Design
//!
//! Time is an absolute millisecond counter, `Time(u64)`.  Durations (delay,
//! transition length, frame interval) are plain `u64` milliseconds.  Integer
//! milliseconds keep all timer arithmetic exact; only normalized progress
//! (`elapsed / duration`) is computed in floating point.
//!
//! A [`Clock`] supplies monotonically non-decreasing `now()` values and a way
//! to wait for the next frame.  [`ManualClock`] is virtual and deterministic
//! (tests, offline renders); [`SystemClock`] follows the OS monotonic clock.

use std::fmt;
use std::time::{Duration, Instant};

// ── Time ──────────────────────────────────────────────────────────────────────

/// An absolute clock timestamp in milliseconds.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Time(pub u64);

impl Time {
    pub const ZERO: Time = Time(0);

    /// Return the time `ms` milliseconds after `self`.
    #[inline]
    pub fn offset(self, ms: u64) -> Time {
        Time(self.0 + ms)
    }

    /// Milliseconds elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Time) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Time {
    type Output = Time;
    #[inline]
    fn add(self, rhs: u64) -> Time {
        Time(self.0 + rhs)
    }
}

impl std::ops::Sub for Time {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Time) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

// ── Clock ─────────────────────────────────────────────────────────────────────

/// A frame time source.
///
/// Implementations must never return a `now()` smaller than a previous one.
pub trait Clock {
    /// The current timestamp.
    fn now(&self) -> Time;

    /// Block (or advance virtually) for `ms` milliseconds.
    fn wait(&mut self, ms: u64);
}

/// A virtual clock that only moves when told to.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Time,
}

impl ManualClock {
    pub fn new(start: Time) -> Self {
        Self { now: start }
    }

    /// Move the clock forward by `ms`.
    #[inline]
    pub fn advance(&mut self, ms: u64) -> Time {
        self.now = self.now + ms;
        self.now
    }

    /// Jump to `t`.  Earlier timestamps are ignored so the clock stays
    /// monotonic.
    pub fn set(&mut self, t: Time) {
        if t > self.now {
            self.now = t;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Time {
        self.now
    }

    fn wait(&mut self, ms: u64) {
        self.advance(ms);
    }
}

/// Wall-clock time source backed by `std::time::Instant`.
///
/// `Time::ZERO` corresponds to the moment the clock was created.
#[derive(Clone, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Time {
        Time(self.origin.elapsed().as_millis() as u64)
    }

    fn wait(&mut self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}
