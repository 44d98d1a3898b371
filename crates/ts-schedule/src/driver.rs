//! `Driver` — host loop that feeds frames from a [`Clock`] into a
//! [`Scheduler`].

use tracing::debug;
use ts_core::{Clock, DriverConfig, Time};

use crate::{Notifier, ScheduleError, ScheduleResult, Scheduler};

/// Totals for one [`Driver::run`] or [`Driver::run_frames`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriveReport {
    /// Frames processed.
    pub frames:      u64,
    /// Timer callbacks fired across all frames.
    pub fired:       usize,
    /// Timestamp of the last processed frame.
    pub finished_at: Time,
}

/// Steps a clock at a fixed frame interval, running one scheduler frame per
/// step.
#[derive(Debug)]
pub struct Driver<C: Clock> {
    clock:  C,
    config: DriverConfig,
}

impl<C: Clock> Driver<C> {
    pub fn new(clock: C, config: DriverConfig) -> ScheduleResult<Self> {
        config.validate()?;
        Ok(Self { clock, config })
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Run frames until the scheduler is idle, then call
    /// [`Notifier::on_idle`].
    ///
    /// Fails with [`ScheduleError::Stalled`] if `max_frames` is reached
    /// while transitions are still outstanding.
    pub fn run<N: Notifier>(
        &mut self,
        scheduler: &mut Scheduler,
        notifier:  &mut N,
    ) -> ScheduleResult<DriveReport> {
        let mut report = DriveReport { finished_at: self.clock.now(), ..DriveReport::default() };
        while !scheduler.is_idle() {
            if self.config.max_frames.is_some_and(|max| report.frames >= max) {
                return Err(ScheduleError::Stalled { frames: report.frames });
            }
            self.step(scheduler, notifier, &mut report);
        }
        debug!(frames = report.frames, fired = report.fired, at = report.finished_at.0, "scheduler idle");
        notifier.on_idle(report.finished_at);
        Ok(report)
    }

    /// Run exactly `n` frames regardless of whether work remains.
    pub fn run_frames<N: Notifier>(
        &mut self,
        n:         u64,
        scheduler: &mut Scheduler,
        notifier:  &mut N,
    ) -> DriveReport {
        let mut report = DriveReport { finished_at: self.clock.now(), ..DriveReport::default() };
        for _ in 0..n {
            self.step(scheduler, notifier, &mut report);
        }
        report
    }

    fn step<N: Notifier>(&mut self, scheduler: &mut Scheduler, notifier: &mut N, report: &mut DriveReport) {
        let now = self.clock.now();
        report.fired += scheduler.frame(now, notifier);
        report.frames += 1;
        report.finished_at = now;
        self.clock.wait(self.config.frame_interval_ms);
    }
}
