//! The `EventWriter` trait implemented by event log backends.

use crate::{EventRow, FrameRow, OutputResult};

/// Sink for transition events and frame summaries.
///
/// Errors are returned to [`EventLogObserver`][crate::EventLogObserver],
/// which stores the first one for [`take_error`][crate::EventLogObserver::take_error].
pub trait EventWriter {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()>;

    fn write_frame(&mut self, row: &FrameRow) -> OutputResult<()>;

    /// Flush all underlying handles.  Safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
