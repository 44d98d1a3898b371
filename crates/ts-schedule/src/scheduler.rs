//! The `Scheduler`: registration, preemption, and the per-entry lifecycle.
//!
//! # Lifecycle of one entry
//!
//! ```text
//! register_entry      → Pending; timer armed at `time` (delay 0)
//! timer (Delay)       → Scheduled; timing is now fixed
//!                       elapsed < delay: re-arm for `time + delay` (Start)
//!                       otherwise: start(elapsed - delay)
//! start               ① cancel pending entries with smaller ids (silent)
//!                     ② replace the active entry, remembering it
//!                     ③ defer the first tick to the end of this frame
//!                     ④ stop + notify Interrupt on the replaced entry
//!                     ⑤ notify Start
//!                     ⑥ run tween factories, dropping empty ones
//! deferred tick       → only if still active: re-arm timer (Tick), tick
//! timer (Tick)        → t = elapsed / duration; apply ease(t), or 1 at t ≥ 1
//!                       t ≥ 1: clear active, drop empty schedule, stop
//!                       timer, notify End
//! ```
//!
//! The first tick is deferred so the Start notification and tween
//! initialization are observed before any progress value is applied, even
//! though promotion itself is synchronous.  A newer transition may start in
//! between; the deferred tick then finds it is no longer active and does
//! nothing.
//!
//! # Timer payloads
//!
//! Timers carry a [`Wake`] describing what to do rather than a closure, so
//! every callback is dispatched statically by [`Scheduler::frame`].  A wake
//! whose entry is gone, or whose timer is no longer the one the entry owns,
//! is stale: it is logged and its timer stopped.
//!
//! # Faults in caller code
//!
//! Tween functions, eases, and notifiers are plain closures.  If one panics
//! the panic unwinds out of `frame` and the rest of that frame is lost; the
//! scheduler should then be discarded.

use tracing::{debug, trace};
use ts_core::{EntityId, EntryId, GroupId, Namespace, Time, Timing};

use crate::schedule::{Schedule, ScheduleKey, ScheduleRegistry};
use crate::timer::{Fired, TimerId, TimerQueue};
use crate::{Entry, EntryState, EventKind, Notifier};

/// Which step of the lifecycle a timer callback drives.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Phase {
    /// First callback: compare elapsed time against the delay.
    Delay,
    /// Delay has elapsed; start immediately.
    Start,
    /// Periodic progress update.
    Tick,
    /// One-shot first tick deferred from `start`.
    FirstTick { start_elapsed_ms: u64 },
}

/// Timer payload: the entry a callback belongs to and what it should do.
#[derive(Clone, Debug)]
pub(crate) struct Wake {
    key:   ScheduleKey,
    id:    EntryId,
    phase: Phase,
}

impl Wake {
    pub(crate) fn new(key: &ScheduleKey, id: EntryId, phase: Phase) -> Self {
        Self { key: key.clone(), id, phase }
    }
}

/// Arbiter for every transition on every entity.
///
/// Single-threaded: the host calls [`register_entry`][Self::register_entry]
/// between frames and [`frame`][Self::frame] once per frame.  Every state
/// change runs to completion inside one of those calls.
#[derive(Debug, Default)]
pub struct Scheduler {
    pub(crate) registry: ScheduleRegistry,
    pub(crate) timers:   TimerQueue<Wake>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Registration & lookup ─────────────────────────────────────────────

    /// Register a transition on `entity`/`namespace`.
    ///
    /// Idempotent per id: if an entry with `id` is already active or pending
    /// on this slot, nothing happens and `false` is returned.
    ///
    /// Ids must be allocated in strictly increasing order per slot; a larger
    /// id preempts every smaller pending one when it starts.  Ids are not
    /// validated.
    pub fn register_entry(
        &mut self,
        entity:    EntityId,
        namespace: Namespace,
        id:        EntryId,
        index:     usize,
        group:     GroupId,
        timing:    Timing,
    ) -> bool {
        let key = ScheduleKey::new(entity, namespace);
        let schedule = self.registry.ensure(&key);
        if schedule.find(id).is_some() {
            trace!(entity = %key.entity, namespace = %key.namespace, id = id.0, "duplicate registration ignored");
            return false;
        }

        let mut entry = Entry::new(id, index, group, timing);
        entry.timer = Some(self.timers.arm(Wake::new(&key, id, Phase::Delay), 0, entry.time));
        debug!(
            entity    = %key.entity,
            namespace = %key.namespace,
            id        = id.0,
            time      = entry.time.0,
            delay_ms  = entry.delay_ms,
            duration  = entry.duration_ms,
            "transition scheduled"
        );
        schedule.pending.push(entry);
        true
    }

    /// Look up an active or pending entry.
    pub fn find_entry(&self, entity: EntityId, namespace: &Namespace, id: EntryId) -> Option<&Entry> {
        self.registry.find(&ScheduleKey::new(entity, namespace.clone()), id)
    }

    /// Mutable lookup, for attaching tweens or adjusting timing before start.
    pub fn find_entry_mut(
        &mut self,
        entity:    EntityId,
        namespace: &Namespace,
        id:        EntryId,
    ) -> Option<&mut Entry> {
        self.registry.find_mut(&ScheduleKey::new(entity, namespace.clone()), id)
    }

    /// The entry currently ticking (or about to) on `entity`/`namespace`.
    pub fn active(&self, entity: EntityId, namespace: &Namespace) -> Option<&Entry> {
        self.schedule(entity, namespace)?.active()
    }

    /// The schedule slot, present only while transitions are outstanding.
    pub fn schedule(&self, entity: EntityId, namespace: &Namespace) -> Option<&Schedule> {
        self.registry.get(&ScheduleKey::new(entity, namespace.clone()))
    }

    pub fn registry(&self) -> &ScheduleRegistry {
        &self.registry
    }

    /// Number of slots with outstanding transitions.
    pub fn schedule_count(&self) -> usize {
        self.registry.len()
    }

    /// `true` when no schedules and no timers remain.
    pub fn is_idle(&self) -> bool {
        self.registry.is_empty() && self.timers.is_empty()
    }

    /// Earliest time any timer is due, if any.
    pub fn next_wake(&self) -> Option<Time> {
        self.timers.next_wake()
    }

    // ── Frame processing ──────────────────────────────────────────────────

    /// Run one frame at `now`: fire every due timer once, including those
    /// armed during the frame.  Returns the number of timers fired.
    pub fn frame<N: Notifier>(&mut self, now: Time, notifier: &mut N) -> usize {
        let mut frame = self.timers.begin_frame(now);
        while let Some(fired) = self.timers.next_due(&mut frame) {
            self.dispatch(fired, notifier);
        }
        let fired = self.timers.end_frame(frame);
        notifier.on_frame_end(now, fired);
        fired
    }

    fn dispatch<N: Notifier>(&mut self, fired: Fired<Wake>, notifier: &mut N) {
        let Fired { timer, payload: Wake { key, id, phase }, elapsed_ms, now } = fired;
        match phase {
            Phase::FirstTick { start_elapsed_ms } => {
                self.first_tick(&key, id, start_elapsed_ms, now, notifier);
            }
            Phase::Delay if self.owns(&key, id, timer) => {
                self.on_delay(&key, id, elapsed_ms, now, notifier);
            }
            Phase::Start if self.owns(&key, id, timer) => {
                self.start(&key, id, elapsed_ms, now, notifier);
            }
            Phase::Tick if self.owns(&key, id, timer) => {
                self.tick(&key, id, elapsed_ms, now, notifier);
            }
            _ => {
                trace!(entity = %key.entity, namespace = %key.namespace, id = id.0, ?phase, "stale timer");
                self.timers.stop(timer);
            }
        }
    }

    /// `true` if entry `id` is still registered and owns `timer`.
    fn owns(&self, key: &ScheduleKey, id: EntryId, timer: TimerId) -> bool {
        self.registry
            .find(key, id)
            .is_some_and(|entry| entry.timer == Some(timer))
    }

    fn on_delay<N: Notifier>(
        &mut self,
        key:        &ScheduleKey,
        id:         EntryId,
        elapsed_ms: u64,
        now:        Time,
        notifier:   &mut N,
    ) {
        let Some(entry) = self.registry.find_mut(key, id) else {
            return;
        };
        entry.state = EntryState::Scheduled;
        if entry.delay_ms <= elapsed_ms {
            let start_elapsed = elapsed_ms - entry.delay_ms;
            self.start(key, id, start_elapsed, now, notifier);
        } else if let Some(timer) = entry.timer {
            self.timers.restart(timer, Wake::new(key, id, Phase::Start), entry.delay_ms, entry.time);
        }
    }

    fn start<N: Notifier>(
        &mut self,
        key:        &ScheduleKey,
        id:         EntryId,
        elapsed_ms: u64,
        now:        Time,
        notifier:   &mut N,
    ) {
        let Some(schedule) = self.registry.get_mut(key) else {
            return;
        };
        if !schedule.pending.iter().any(|e| e.id == id) {
            return;
        }

        // ① Preemption: older pending entries never started, so they are
        // dropped without notification.  Newer ones keep waiting.
        let mut promoted = None;
        let mut kept = Vec::with_capacity(schedule.pending.len());
        for mut other in schedule.pending.drain(..) {
            if other.id < id {
                if let Some(timer) = other.timer.take() {
                    self.timers.stop(timer);
                }
                other.state = EntryState::Cancelled;
                debug!(entity = %key.entity, namespace = %key.namespace, id = other.id.0, by = id.0, "transition cancelled");
            } else if other.id > id {
                kept.push(other);
            } else {
                promoted = Some(other);
            }
        }
        schedule.pending = kept;
        let Some(mut entry) = promoted else {
            return;
        };

        // ② Promotion.
        entry.state = EntryState::Starting;
        let interrupted = schedule.active.replace(entry);

        // ③ Defer the first tick; scheduled before any notification so it
        // runs after everything this start triggers.
        self.timers.defer_once(
            Wake::new(key, id, Phase::FirstTick { start_elapsed_ms: elapsed_ms }),
            0,
            now,
        );

        // ④ Interrupt the previous active entry.
        if let Some(mut old) = interrupted {
            if let Some(timer) = old.timer.take() {
                self.timers.stop(timer);
            }
            old.state = EntryState::Interrupted;
            debug!(entity = %key.entity, namespace = %key.namespace, id = old.id.0, by = id.0, "transition interrupted");
            notifier.notify(EventKind::Interrupt, &old.target(key), now);
        }

        // ⑤ Start, then ⑥ tween initialization.
        let Some(entry) = schedule.active.as_mut() else {
            return;
        };
        let target = entry.target(key);
        debug!(entity = %key.entity, namespace = %key.namespace, id = id.0, elapsed_ms, "transition started");
        notifier.notify(EventKind::Start, &target, now);
        entry.init_tweens(&target);
    }

    fn first_tick<N: Notifier>(
        &mut self,
        key:              &ScheduleKey,
        id:               EntryId,
        start_elapsed_ms: u64,
        now:              Time,
        notifier:         &mut N,
    ) {
        let Some(entry) = self.registry.active_mut(key, id) else {
            trace!(entity = %key.entity, namespace = %key.namespace, id = id.0, "deferred tick suppressed; no longer active");
            return;
        };
        entry.state = EntryState::Running;
        if let Some(timer) = entry.timer {
            self.timers.restart(timer, Wake::new(key, id, Phase::Tick), entry.delay_ms, entry.time);
        }
        self.tick(key, id, start_elapsed_ms, now, notifier);
    }

    fn tick<N: Notifier>(
        &mut self,
        key:        &ScheduleKey,
        id:         EntryId,
        elapsed_ms: u64,
        now:        Time,
        notifier:   &mut N,
    ) {
        let Some(entry) = self.registry.active_mut(key, id) else {
            return;
        };
        let t = entry.progress(elapsed_ms);
        let eased = if t >= 1.0 { 1.0 } else { entry.ease.apply(t) };
        entry.apply_tweens(eased);
        if t >= 1.0 {
            self.finish(key, now, notifier);
        }
    }

    /// Retire the active entry of `key` after its final tick.
    fn finish<N: Notifier>(&mut self, key: &ScheduleKey, now: Time, notifier: &mut N) {
        let Some(mut entry) = self.registry.get_mut(key).and_then(|s| s.active.take()) else {
            return;
        };
        self.registry.remove_if_empty(key);
        if let Some(timer) = entry.timer.take() {
            self.timers.stop(timer);
        }
        entry.state = EntryState::Ended;
        debug!(entity = %key.entity, namespace = %key.namespace, id = entry.id.0, "transition ended");
        notifier.notify(EventKind::End, &entry.target(key), now);
    }
}
