//! `EventLogObserver<W>` — bridges `Notifier` to an `EventWriter`.

use ts_core::Time;
use ts_schedule::{EventKind, Notifier, TransitionTarget};

use crate::row::{EventRow, FrameRow};
use crate::writer::EventWriter;
use crate::{OutputError, OutputResult};

/// A [`Notifier`] that records every lifecycle event, plus a summary of each
/// frame that fired a timer, to any [`EventWriter`].
///
/// `Notifier` methods have no return value, so writer errors are stored.
/// Only the first is kept; check it with [`take_error`][Self::take_error]
/// once the run is over.  The writer is finished when the driver reports
/// the scheduler idle.
pub struct EventLogObserver<W: EventWriter> {
    writer:     W,
    events:     u64,
    last_error: Option<OutputError>,
}

impl<W: EventWriter> EventLogObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, events: 0, last_error: None }
    }

    /// Events written so far.
    pub fn events(&self) -> u64 {
        self.events
    }

    /// Take the stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Finish the writer now, for hosts that step frames without
    /// [`Driver::run`][ts_schedule::Driver::run].
    pub fn finish(&mut self) -> OutputResult<()> {
        self.writer.finish()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: EventWriter> Notifier for EventLogObserver<W> {
    fn notify(&mut self, kind: EventKind, target: &TransitionTarget, now: Time) {
        let result = self.writer.write_event(&EventRow::new(kind, target, now));
        if result.is_ok() {
            self.events += 1;
        }
        self.store_err(result);
    }

    fn on_frame_end(&mut self, now: Time, fired: usize) {
        if fired == 0 {
            return;
        }
        let result = self.writer.write_frame(&FrameRow { time_ms: now.0, fired: fired as u64 });
        self.store_err(result);
    }

    fn on_idle(&mut self, _now: Time) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
