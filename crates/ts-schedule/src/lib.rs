//! `ts-schedule` — competing, time-ordered transitions on shared entities.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`timer`]       | `TimerQueue` (frame-flushed timers), `TimerId`, `Frame`, `Fired` |
//! | [`entry`]       | `Entry`, `EntryState`, `TweenFn`, `TweenFactory`           |
//! | [`schedule`]    | `Schedule`, `ScheduleKey`, `ScheduleRegistry`              |
//! | [`scheduler`]   | `Scheduler` — registration, preemption, lifecycle          |
//! | [`notify`]      | `EventKind`, `TransitionTarget`, `Notifier`, `NoopNotifier` |
//! | [`listeners`]   | `Listeners` — named subscribers per entity/namespace/kind  |
//! | [`driver`]      | `Driver`, `DriveReport` — fixed-interval host loop         |
//! | [`error`]       | `ScheduleError`, `ScheduleResult<T>`                       |
//!
//! # Model (summary)
//!
//! Each (entity, namespace) slot has at most one *active* transition and any
//! number of *pending* ones.  When a pending transition's delay elapses it
//! cancels every older pending transition, interrupts the active one, and
//! becomes active itself.  Its first progress update is deferred to the end
//! of the current frame so that its Start notification and tween setup are
//! always observed first.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                    |
//! |-----------|-----------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for registry and timer maps.    |
//! | `serde`   | Forwards to `ts-core/serde`.                              |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ts_core::{EntityId, EntryId, GroupId, ManualClock, DriverConfig, Namespace, Time, Timing};
//! use ts_schedule::{Driver, NoopNotifier, Scheduler};
//!
//! let mut scheduler = Scheduler::new();
//! scheduler.register_entry(EntityId(0), Namespace::default(), EntryId(1), 0, GroupId(0),
//!     Timing::at(Time::ZERO).duration(100));
//! scheduler
//!     .find_entry_mut(EntityId(0), &Namespace::default(), EntryId(1))
//!     .unwrap()
//!     .tween("opacity", |_| Some(Box::new(|p| println!("opacity {p}"))))?;
//!
//! let mut driver = Driver::new(ManualClock::default(), DriverConfig::default())?;
//! driver.run(&mut scheduler, &mut NoopNotifier)?;
//! ```

pub mod driver;
pub mod entry;
pub mod error;
pub mod listeners;
pub mod notify;
pub mod schedule;
pub mod scheduler;
pub mod timer;


pub use driver::{DriveReport, Driver};
pub use entry::{Entry, EntryState, TweenFactory, TweenFn};
pub use error::{ScheduleError, ScheduleResult};
pub use listeners::{Listener, Listeners};
pub use notify::{EventKind, NoopNotifier, Notifier, TransitionTarget};
pub use schedule::{Schedule, ScheduleKey, ScheduleRegistry};
pub use scheduler::Scheduler;
pub use timer::{Fired, Frame, TimerId, TimerQueue};

#[cfg(feature = "fx-hash")]
pub(crate) type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
pub(crate) type HashMap<K, V> = std::collections::HashMap<K, V>;
