//! Host-loop configuration and transition timing defaults.
//!
//! Typically loaded from a JSON/TOML file by the application crate (enable
//! the `serde` feature) and passed to the driver.

use crate::{CoreError, CoreResult, Ease, Time};

// ── DriverConfig ──────────────────────────────────────────────────────────────

/// Frame pacing for the host loop that feeds the scheduler.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriverConfig {
    /// Milliseconds between frames.  Default: 16 (~60 Hz).
    pub frame_interval_ms: u64,

    /// Give up after this many frames if transitions are still outstanding.
    /// `None` runs until idle.
    pub max_frames: Option<u64>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 16,
            max_frames:        None,
        }
    }
}

impl DriverConfig {
    /// Reject settings the driver cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.frame_interval_ms == 0 {
            return Err(CoreError::Config(
                "frame_interval_ms must be greater than zero".into(),
            ));
        }
        if self.max_frames == Some(0) {
            return Err(CoreError::Config("max_frames must be at least 1".into()));
        }
        Ok(())
    }
}

// ── TimingDefaults ────────────────────────────────────────────────────────────

/// Delay and duration used when a transition does not specify its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimingDefaults {
    pub delay_ms:    u64,
    pub duration_ms: u64,
}

impl Default for TimingDefaults {
    fn default() -> Self {
        Self {
            delay_ms:    0,
            duration_ms: 250,
        }
    }
}

impl TimingDefaults {
    /// Build a [`Timing`] armed at `time` with these defaults and the
    /// default ease.
    pub fn timing_at(&self, time: Time) -> Timing {
        Timing {
            time,
            delay_ms:    self.delay_ms,
            duration_ms: self.duration_ms,
            ease:        Ease::default(),
        }
    }
}

// ── Timing ────────────────────────────────────────────────────────────────────

/// Timing parameters of one transition.
///
/// `time` is the origin the delay is measured from; the active phase begins
/// at `time + delay_ms` and lasts `duration_ms`.  Negative values cannot be
/// expressed; callers own the choice of sensible magnitudes.
#[derive(Clone, Debug)]
pub struct Timing {
    pub time:        Time,
    pub delay_ms:    u64,
    pub duration_ms: u64,
    pub ease:        Ease,
}

impl Timing {
    /// Timing armed at `time` using [`TimingDefaults::default`].
    pub fn at(time: Time) -> Self {
        TimingDefaults::default().timing_at(time)
    }

    pub fn delay(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }

    pub fn duration(mut self, ms: u64) -> Self {
        self.duration_ms = ms;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}
