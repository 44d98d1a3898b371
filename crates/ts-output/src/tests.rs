//! Tests for ts-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;
    use ts_schedule::EventKind;

    use crate::csv::{CsvEventWriter, EVENTS_FILE, FRAMES_FILE};
    use crate::row::{EventRow, FrameRow};
    use crate::writer::EventWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn row(id: u64, kind: EventKind) -> EventRow {
        EventRow {
            time_ms:   id * 10,
            entity:    3,
            namespace: "fade".into(),
            id,
            index:     1,
            group:     0,
            kind,
        }
    }

    fn headers(path: &std::path::Path) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_files_created_in_missing_dir() {
        let dir = tmp();
        let out = dir.path().join("nested/out");
        let _w = CsvEventWriter::new(&out).unwrap();
        assert!(out.join(EVENTS_FILE).exists());
        assert!(out.join(FRAMES_FILE).exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvEventWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert_eq!(
            headers(&dir.path().join(EVENTS_FILE)),
            ["time_ms", "entity", "namespace", "id", "index", "group", "kind"]
        );
        assert_eq!(headers(&dir.path().join(FRAMES_FILE)), ["time_ms", "fired"]);
    }

    #[test]
    fn csv_event_rows_written() {
        let dir = tmp();
        let mut w = CsvEventWriter::new(dir.path()).unwrap();
        w.write_event(&row(1, EventKind::Start)).unwrap();
        w.write_event(&row(2, EventKind::End)).unwrap();
        w.write_frame(&FrameRow { time_ms: 20, fired: 4 }).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(EVENTS_FILE)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "10");
        assert_eq!(&rows[0][2], "fade");
        assert_eq!(&rows[0][6], "start");
        assert_eq!(&rows[1][3], "2");
        assert_eq!(&rows[1][6], "end");

        let mut rdr = csv::Reader::from_path(dir.path().join(FRAMES_FILE)).unwrap();
        let frames: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(frames.len(), 1);
        assert_eq!(&frames[0][1], "4");
    }
}

#[cfg(test)]
mod observer_tests {
    use tempfile::TempDir;
    use ts_core::{DriverConfig, EntityId, EntryId, GroupId, ManualClock, Namespace, Time, Timing};
    use ts_schedule::{Driver, EventKind, Notifier, Scheduler, TransitionTarget};

    use crate::csv::{CsvEventWriter, EVENTS_FILE, FRAMES_FILE};
    use crate::observer::EventLogObserver;
    use crate::row::{EventRow, FrameRow};
    use crate::writer::EventWriter;
    use crate::{OutputError, OutputResult};

    /// Writer that keeps rows in memory and can be told to fail.
    #[derive(Default)]
    struct MemWriter {
        events:   Vec<EventRow>,
        frames:   Vec<FrameRow>,
        finished: u32,
        fail:     bool,
    }

    impl EventWriter for MemWriter {
        fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
            if self.fail {
                return Err(OutputError::Io(std::io::Error::other(format!("event {}", row.id))));
            }
            self.events.push(row.clone());
            Ok(())
        }

        fn write_frame(&mut self, row: &FrameRow) -> OutputResult<()> {
            self.frames.push(*row);
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    fn target(id: u64) -> TransitionTarget {
        TransitionTarget {
            entity:    EntityId(0),
            namespace: Namespace::default(),
            id:        EntryId(id),
            index:     0,
            group:     GroupId(0),
        }
    }

    #[test]
    fn records_events_and_non_empty_frames() {
        let mut obs = EventLogObserver::new(MemWriter::default());
        obs.notify(EventKind::Start, &target(1), Time(5));
        obs.on_frame_end(Time(5), 2);
        obs.on_frame_end(Time(21), 0);
        obs.on_idle(Time(21));
        assert_eq!(obs.events(), 1);
        assert!(obs.take_error().is_none());

        let w = obs.into_writer();
        assert_eq!(w.events.len(), 1);
        assert_eq!(w.events[0].namespace, "");
        assert_eq!(w.frames, [FrameRow { time_ms: 5, fired: 2 }]);
        assert_eq!(w.finished, 1);
    }

    #[test]
    fn keeps_only_first_error() {
        let mut obs = EventLogObserver::new(MemWriter { fail: true, ..MemWriter::default() });
        obs.notify(EventKind::Start, &target(1), Time(0));
        obs.notify(EventKind::End, &target(2), Time(0));
        assert_eq!(obs.events(), 0);

        let err = obs.take_error().expect("error stored");
        assert!(err.to_string().contains("event 1"));
        assert!(obs.take_error().is_none());
    }

    #[test]
    fn driver_run_writes_full_lifecycle_to_csv() {
        let dir: TempDir = tempfile::tempdir().unwrap();
        let mut scheduler = Scheduler::new();
        let ns = Namespace::new("fade");
        for id in [1, 2] {
            scheduler.register_entry(
                EntityId(7),
                ns.clone(),
                EntryId(id),
                0,
                GroupId(0),
                Timing::at(Time::ZERO).duration(40),
            );
        }

        let mut obs = EventLogObserver::new(CsvEventWriter::new(dir.path()).unwrap());
        let cfg = DriverConfig { frame_interval_ms: 20, max_frames: None };
        let mut driver = Driver::new(ManualClock::default(), cfg).unwrap();
        driver.run(&mut scheduler, &mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join(EVENTS_FILE)).unwrap();
        let kinds: Vec<(String, String)> = rdr
            .records()
            .map(|r| r.unwrap())
            .map(|r| (r[3].to_owned(), r[6].to_owned()))
            .collect();
        let expected = [("1", "start"), ("1", "interrupt"), ("2", "start"), ("2", "end")];
        assert_eq!(kinds.len(), expected.len());
        for ((id, kind), (eid, ekind)) in kinds.iter().zip(expected) {
            assert_eq!((id.as_str(), kind.as_str()), (eid, ekind));
        }

        let mut rdr = csv::Reader::from_path(dir.path().join(FRAMES_FILE)).unwrap();
        assert_eq!(rdr.records().count(), 3, "frames at 0, 20 and 40 fired timers");
    }
}
