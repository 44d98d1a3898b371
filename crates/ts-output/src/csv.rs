//! CSV event log backend.
//!
//! Creates two files in the output directory:
//! - `transition_events.csv`
//! - `transition_frames.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::EventWriter;
use crate::{EventRow, FrameRow, OutputResult};

pub const EVENTS_FILE: &str = "transition_events.csv";
pub const FRAMES_FILE: &str = "transition_frames.csv";

/// Writes transition events and frame summaries to two CSV files.
pub struct CsvEventWriter {
    events: Writer<File>,
    frames: Writer<File>,
}

impl CsvEventWriter {
    /// Create `dir` if needed, open both files, and write their headers.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut events = Writer::from_path(dir.join(EVENTS_FILE))?;
        events.write_record(["time_ms", "entity", "namespace", "id", "index", "group", "kind"])?;

        let mut frames = Writer::from_path(dir.join(FRAMES_FILE))?;
        frames.write_record(["time_ms", "fired"])?;

        Ok(Self { events, frames })
    }
}

impl EventWriter for CsvEventWriter {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        self.events.write_record(&[
            row.time_ms.to_string(),
            row.entity.to_string(),
            row.namespace.clone(),
            row.id.to_string(),
            row.index.to_string(),
            row.group.to_string(),
            row.kind.as_str().to_owned(),
        ])?;
        Ok(())
    }

    fn write_frame(&mut self, row: &FrameRow) -> OutputResult<()> {
        self.frames.write_record(&[row.time_ms.to_string(), row.fired.to_string()])?;
        Ok(())
    }

    /// Flushes both files.  Rows written afterwards are flushed by the next
    /// call.
    fn finish(&mut self) -> OutputResult<()> {
        self.events.flush()?;
        self.frames.flush()?;
        Ok(())
    }
}
