//! Unit tests for ts-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EntityId, EntryId, EntryIdAllocator, GroupId, Namespace};

    #[test]
    fn ordering() {
        assert!(EntryId(1) < EntryId(2));
        assert!(EntityId(100) > EntityId(99));
        assert_eq!(EntryId(4).next(), EntryId(5));
        assert_eq!(GroupId(3).index(), 3);
    }

    #[test]
    fn display() {
        assert_eq!(EntityId(7).to_string(), "EntityId(7)");
        assert_eq!(Namespace::new("fade").to_string(), "fade");
        assert_eq!(Namespace::default().to_string(), "<default>");
    }

    #[test]
    fn allocator_is_strictly_increasing() {
        let mut ids = EntryIdAllocator::new();
        assert_eq!(ids.last(), None);
        let a = ids.next_id();
        let b = ids.next_id();
        let c = ids.next_id();
        assert_eq!(a, EntryId(1));
        assert!(a < b && b < c);
        assert_eq!(ids.last(), Some(c));
    }

    #[test]
    fn namespace_equality_is_by_name() {
        let a = Namespace::new("opacity");
        let b: Namespace = String::from("opacity").into();
        assert_eq!(a, b);
        assert_ne!(a, Namespace::new("position"));
        assert!(Namespace::new("").is_default());
    }
}

#[cfg(test)]
mod time {
    use crate::{Clock, ManualClock, Time};

    #[test]
    fn time_arithmetic() {
        let t = Time(10);
        assert_eq!(t + 5, Time(15));
        assert_eq!(t.offset(3), Time(13));
        assert_eq!(Time(15) - Time(10), 5u64);
        assert_eq!(Time(15).since(Time(10)), 5);
    }

    #[test]
    fn manual_clock_advances() {
        let mut clock = ManualClock::default();
        assert_eq!(clock.now(), Time::ZERO);
        clock.advance(25);
        assert_eq!(clock.now(), Time(25));
        clock.wait(25);
        assert_eq!(clock.now(), Time(50));
    }

    #[test]
    fn manual_clock_never_moves_backwards() {
        let mut clock = ManualClock::new(Time(100));
        clock.set(Time(40));
        assert_eq!(clock.now(), Time(100));
        clock.set(Time(140));
        assert_eq!(clock.now(), Time(140));
    }
}

#[cfg(test)]
mod ease {
    use crate::Ease;

    #[test]
    fn linear_is_identity() {
        let e = Ease::linear();
        for t in [0.0, 0.25, 0.5, 0.99] {
            assert_eq!(e.apply(t), t);
        }
    }

    #[test]
    fn cubic_in_out_endpoints_and_midpoint() {
        let e = Ease::cubic_in_out();
        assert_eq!(e.apply(0.0), 0.0);
        assert!((e.apply(0.5) - 0.5).abs() < 1e-12);
        assert!((e.apply(1.0) - 1.0).abs() < 1e-12);
        assert!(e.apply(0.25) < 0.25, "slow start");
        assert!(e.apply(0.75) > 0.75, "slow finish");
    }

    #[test]
    fn default_ease_is_cubic() {
        assert_eq!(Ease::default().name(), "cubic-in-out");
        assert_eq!(format!("{:?}", Ease::linear()), "Ease(\"linear\")");
    }
}

#[cfg(test)]
mod config {
    use crate::{DriverConfig, Ease, Time, Timing, TimingDefaults};

    #[test]
    fn default_driver_config_is_valid() {
        assert!(DriverConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_frame_interval_rejected() {
        let cfg = DriverConfig { frame_interval_ms: 0, max_frames: None };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_frame_budget_rejected() {
        let cfg = DriverConfig { frame_interval_ms: 16, max_frames: Some(0) };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn timing_defaults() {
        let t = Timing::at(Time(5));
        assert_eq!(t.time, Time(5));
        assert_eq!(t.delay_ms, 0);
        assert_eq!(t.duration_ms, 250);
        assert_eq!(t.ease.name(), "cubic-in-out");
    }

    #[test]
    fn timing_builder() {
        let t = TimingDefaults { delay_ms: 10, duration_ms: 40 }
            .timing_at(Time(100))
            .delay(20)
            .duration(80)
            .ease(Ease::linear());
        assert_eq!(t.delay_ms, 20);
        assert_eq!(t.duration_ms, 80);
        assert_eq!(t.time, Time(100));
        assert_eq!(t.ease.name(), "linear");
    }
}
