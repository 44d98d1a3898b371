//! `Entry` — one transition's identity, timing, tweens, and lifecycle state.
//!
//! # Tweens
//!
//! Before start, each tween is a named *factory*.  When the entry starts,
//! every factory is invoked exactly once with the entry's
//! [`TransitionTarget`]; a factory returning `None` is dropped, the rest are
//! kept in order as per-frame update functions receiving eased progress.
//!
//! # Mutability
//!
//! Delay, duration, and ease may only change while the entry is
//! [`EntryState::Pending`]: its first timer wake commits the start time, and
//! later changes return [`ScheduleError::AlreadyScheduled`].  Tweens may
//! change until the entry starts; afterwards the setters return
//! [`ScheduleError::AlreadyStarted`].

use std::fmt;

use ts_core::{Ease, EntryId, GroupId, Time, Timing};

use crate::{ScheduleError, ScheduleResult, TimerId, TransitionTarget};
use crate::schedule::ScheduleKey;

/// Per-frame update function; receives eased progress in `[0, 1]`.
pub type TweenFn = Box<dyn FnMut(f64)>;

/// Invoked once at start; `None` means "nothing to animate".
pub type TweenFactory = Box<dyn FnOnce(&TransitionTarget) -> Option<TweenFn>>;

/// Lifecycle of an [`Entry`].
///
/// ```text
/// Pending ──► Scheduled ──► Starting ──► Running ──► Ended
///    │            │            │           │
///    └─────┬──────┘            └─────┬─────┘
///          ▼                         ▼
///      Cancelled                Interrupted
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum EntryState {
    /// Registered; its timer has not fired yet.
    Pending,
    /// Timer fired once; waiting for the rest of the delay.
    Scheduled,
    /// Promoted to active; first tick deferred to the end of the frame.
    Starting,
    /// Ticking every frame.
    Running,
    Ended,
    Interrupted,
    /// Superseded by a newer transition before it ever started.
    Cancelled,
}

enum TweenState {
    Factory(TweenFactory),
    Ready(TweenFn),
}

struct Tween {
    name:  String,
    state: TweenState,
}

pub struct Entry {
    pub(crate) id:          EntryId,
    pub(crate) index:       usize,
    pub(crate) group:       GroupId,
    pub(crate) time:        Time,
    pub(crate) delay_ms:    u64,
    pub(crate) duration_ms: u64,
    pub(crate) ease:        Ease,
    tweens:                 Vec<Tween>,
    pub(crate) timer:       Option<TimerId>,
    pub(crate) state:       EntryState,
}

impl Entry {
    pub(crate) fn new(id: EntryId, index: usize, group: GroupId, timing: Timing) -> Self {
        Self {
            id,
            index,
            group,
            time:        timing.time,
            delay_ms:    timing.delay_ms,
            duration_ms: timing.duration_ms,
            ease:        timing.ease,
            tweens:      Vec::new(),
            timer:       None,
            state:       EntryState::Pending,
        }
    }

    // ── Read access ───────────────────────────────────────────────────────

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn group(&self) -> GroupId {
        self.group
    }

    /// Origin the delay is measured from.
    pub fn time(&self) -> Time {
        self.time
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn ease(&self) -> &Ease {
        &self.ease
    }

    pub fn state(&self) -> EntryState {
        self.state
    }

    /// Tween names in application order.
    pub fn tween_names(&self) -> impl Iterator<Item = &str> {
        self.tweens.iter().map(|t| t.name.as_str())
    }

    pub fn tween_count(&self) -> usize {
        self.tweens.len()
    }

    // ── Mutation before start ─────────────────────────────────────────────

    /// Change the delay.  Read when the entry's first timer callback fires,
    /// so it must be set before then.
    pub fn set_delay(&mut self, ms: u64) -> ScheduleResult<()> {
        self.ensure_unscheduled()?;
        self.delay_ms = ms;
        Ok(())
    }

    pub fn set_duration(&mut self, ms: u64) -> ScheduleResult<()> {
        self.ensure_unscheduled()?;
        self.duration_ms = ms;
        Ok(())
    }

    pub fn set_ease(&mut self, ease: Ease) -> ScheduleResult<()> {
        self.ensure_unscheduled()?;
        self.ease = ease;
        Ok(())
    }

    /// Attach a tween factory under `name`, replacing any factory already
    /// registered under that name (keeping its position).
    pub fn tween<F>(&mut self, name: &str, factory: F) -> ScheduleResult<()>
    where
        F: FnOnce(&TransitionTarget) -> Option<TweenFn> + 'static,
    {
        self.ensure_not_started()?;
        let state = TweenState::Factory(Box::new(factory));
        match self.tweens.iter_mut().find(|t| t.name == name) {
            Some(existing) => existing.state = state,
            None => self.tweens.push(Tween { name: name.to_owned(), state }),
        }
        Ok(())
    }

    /// Detach the named tween.  Returns `Ok(false)` if there was none.
    pub fn remove_tween(&mut self, name: &str) -> ScheduleResult<bool> {
        self.ensure_not_started()?;
        let before = self.tweens.len();
        self.tweens.retain(|t| t.name != name);
        Ok(self.tweens.len() != before)
    }

    fn ensure_unscheduled(&self) -> ScheduleResult<()> {
        match self.state {
            EntryState::Pending => Ok(()),
            EntryState::Scheduled => Err(ScheduleError::AlreadyScheduled { id: self.id }),
            state => Err(ScheduleError::AlreadyStarted { id: self.id, state }),
        }
    }

    fn ensure_not_started(&self) -> ScheduleResult<()> {
        match self.state {
            EntryState::Pending | EntryState::Scheduled => Ok(()),
            state => Err(ScheduleError::AlreadyStarted { id: self.id, state }),
        }
    }

    // ── Scheduler internals ───────────────────────────────────────────────

    pub(crate) fn target(&self, key: &ScheduleKey) -> TransitionTarget {
        TransitionTarget {
            entity:    key.entity,
            namespace: key.namespace.clone(),
            id:        self.id,
            index:     self.index,
            group:     self.group,
        }
    }

    /// Invoke every factory once, dropping those that yield nothing.
    pub(crate) fn init_tweens(&mut self, target: &TransitionTarget) {
        self.tweens = std::mem::take(&mut self.tweens)
            .into_iter()
            .filter_map(|tween| match tween.state {
                TweenState::Factory(factory) => factory(target).map(|f| Tween {
                    name:  tween.name,
                    state: TweenState::Ready(f),
                }),
                TweenState::Ready(_) => Some(tween),
            })
            .collect();
    }

    /// Normalized progress for `elapsed_ms` into the active phase.
    ///
    /// A zero duration is complete immediately.
    pub(crate) fn progress(&self, elapsed_ms: u64) -> f64 {
        if self.duration_ms == 0 {
            1.0
        } else {
            elapsed_ms as f64 / self.duration_ms as f64
        }
    }

    pub(crate) fn apply_tweens(&mut self, eased: f64) {
        for tween in &mut self.tweens {
            if let TweenState::Ready(f) = &mut tween.state {
                f(eased);
            }
        }
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("id", &self.id)
            .field("index", &self.index)
            .field("group", &self.group)
            .field("time", &self.time)
            .field("delay_ms", &self.delay_ms)
            .field("duration_ms", &self.duration_ms)
            .field("ease", &self.ease)
            .field("tweens", &self.tween_names().collect::<Vec<_>>())
            .field("timer", &self.timer)
            .field("state", &self.state)
            .finish()
    }
}
