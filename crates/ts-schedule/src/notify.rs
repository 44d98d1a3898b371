//! Lifecycle notifications and the `Notifier` trait.

use std::fmt;

use ts_core::{EntityId, EntryId, GroupId, Namespace, Time};

/// The three observable lifecycle events of a transition.
///
/// Cancellation of a never-started transition is deliberately not an event.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum EventKind {
    /// The transition became active.
    Start,
    /// An active transition was replaced before completing.
    Interrupt,
    /// The transition reached progress 1.
    End,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Start     => "start",
            EventKind::Interrupt => "interrupt",
            EventKind::End       => "end",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Context a transition was registered with, restored for notifications and
/// tween factories.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionTarget {
    pub entity:    EntityId,
    pub namespace: Namespace,
    pub id:        EntryId,
    pub index:     usize,
    pub group:     GroupId,
}

/// Receives lifecycle events from [`Scheduler::frame`][crate::Scheduler::frame].
///
/// Only [`notify`][Self::notify] is required; the frame hooks default to
/// no-ops.
///
/// Notifiers are called while the scheduler is mid-frame and cannot reach
/// back into it.  Hosts that want to chain a new transition off an `End`
/// record the target here and register after the frame returns.
pub trait Notifier {
    fn notify(&mut self, kind: EventKind, target: &TransitionTarget, now: Time);

    /// Called after every frame with the number of timers that fired.
    fn on_frame_end(&mut self, _now: Time, _fired: usize) {}

    /// Called by [`Driver::run`][crate::Driver::run] once no transitions
    /// remain.
    fn on_idle(&mut self, _now: Time) {}
}

/// A [`Notifier`] that discards everything.
#[derive(Debug, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&mut self, _kind: EventKind, _target: &TransitionTarget, _now: Time) {}
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn notify(&mut self, kind: EventKind, target: &TransitionTarget, now: Time) {
        (**self).notify(kind, target, now);
    }

    fn on_frame_end(&mut self, now: Time, fired: usize) {
        (**self).on_frame_end(now, fired);
    }

    fn on_idle(&mut self, now: Time) {
        (**self).on_idle(now);
    }
}

/// Fan out to two notifiers, first `A` then `B`.
impl<A: Notifier, B: Notifier> Notifier for (A, B) {
    fn notify(&mut self, kind: EventKind, target: &TransitionTarget, now: Time) {
        self.0.notify(kind, target, now);
        self.1.notify(kind, target, now);
    }

    fn on_frame_end(&mut self, now: Time, fired: usize) {
        self.0.on_frame_end(now, fired);
        self.1.on_frame_end(now, fired);
    }

    fn on_idle(&mut self, now: Time) {
        self.0.on_idle(now);
        self.1.on_idle(now);
    }
}
