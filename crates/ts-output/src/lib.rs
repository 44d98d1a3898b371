//! `ts-output` — transition event logs.
//!
//! | File                     | Contents                                          |
//! |--------------------------|---------------------------------------------------|
//! | `transition_events.csv`  | one row per Start / Interrupt / End notification  |
//! | `transition_frames.csv`  | one row per frame that fired at least one timer   |
//!
//! Writers implement [`EventWriter`] and are driven by [`EventLogObserver`],
//! which implements `ts_schedule::Notifier`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ts_output::{CsvEventWriter, EventLogObserver};
//!
//! let writer = CsvEventWriter::new(Path::new("./output"))?;
//! let mut log = EventLogObserver::new(writer);
//! driver.run(&mut scheduler, &mut log)?;
//! if let Some(e) = log.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use crate::csv::CsvEventWriter;
pub use error::{OutputError, OutputResult};
pub use observer::EventLogObserver;
pub use row::{EventRow, FrameRow};
pub use writer::EventWriter;
