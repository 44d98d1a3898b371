//! `TimerQueue` — frame-flushed callback timers.
//!
//! # Model
//!
//! A timer is a payload plus an origin and a delay; it is due once
//! `now >= origin + delay`.  Timers live in a single queue ordered by the
//! position they were first armed at.  The host flushes the queue once per
//! frame:
//!
//! ```text
//! let mut frame = queue.begin_frame(now);
//! while let Some(fired) = queue.next_due(&mut frame) {
//!     // handle fired.payload; may arm, restart, or stop timers
//! }
//! queue.end_frame(frame);
//! ```
//!
//! During one flush every due timer fires at most once, in queue order.  A
//! timer armed mid-flush is appended at the tail and is still visited by the
//! same flush, which is what makes [`TimerQueue::defer_once`] run "after the
//! current batch, before the next frame".
//!
//! Repeating timers keep firing every frame after they become due, reporting
//! `elapsed = now - (origin + delay)`.  One-shot timers fire once, stop
//! themselves, and report `elapsed = now - origin`.
//!
//! Stopped timers stay in place until `end_frame` sweeps them, so a timer
//! restarted before the sweep keeps its queue position.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound::{Excluded, Unbounded};

use ts_core::Time;

use crate::HashMap;

/// Handle to an armed timer.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimerId({})", self.0)
    }
}

/// One timer invocation handed back by [`TimerQueue::next_due`].
#[derive(Clone, Debug)]
pub struct Fired<T> {
    pub timer:      TimerId,
    pub payload:    T,
    pub elapsed_ms: u64,
    pub now:        Time,
}

/// Cursor over one flush of the queue.
#[derive(Debug)]
pub struct Frame {
    now:    Time,
    /// Queue position of the last visited timer; positions start at 1.
    cursor: u64,
    fired:  usize,
}

impl Frame {
    /// Timers fired so far in this frame.
    pub fn fired(&self) -> usize {
        self.fired
    }
}

struct Slot<T> {
    id:       TimerId,
    /// `None` once stopped.
    payload:  Option<T>,
    origin:   Time,
    delay_ms: u64,
    once:     bool,
}

impl<T> Slot<T> {
    #[inline]
    fn due(&self) -> Time {
        self.origin + self.delay_ms
    }
}

/// An insertion-ordered queue of frame timers carrying payload `T`.
pub struct TimerQueue<T> {
    /// Queue position → timer.
    slots:     BTreeMap<u64, Slot<T>>,
    positions: HashMap<TimerId, u64>,
    next_pos:  u64,
    next_id:   u64,
    live:      usize,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            slots:     BTreeMap::new(),
            positions: HashMap::default(),
            next_pos:  1,
            next_id:   0,
            live:      0,
        }
    }
}

impl<T> fmt::Debug for TimerQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerQueue")
            .field("queued", &self.slots.len())
            .field("live", &self.live)
            .finish()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a repeating timer due at `origin + delay_ms`.
    pub fn arm(&mut self, payload: T, delay_ms: u64, origin: Time) -> TimerId {
        self.insert(payload, delay_ms, origin, false)
    }

    /// Arm a one-shot timer due at `now + delay_ms`.
    pub fn defer_once(&mut self, payload: T, delay_ms: u64, now: Time) -> TimerId {
        self.insert(payload, delay_ms, now, true)
    }

    /// Replace the payload and due time of `id`.
    ///
    /// A timer that is still queued (live, or stopped but not yet swept)
    /// keeps its position.  A swept timer is re-appended at the tail under
    /// the same id.
    pub fn restart(&mut self, id: TimerId, payload: T, delay_ms: u64, origin: Time) {
        if let Some(slot) = self.positions.get(&id).and_then(|pos| self.slots.get_mut(pos)) {
            if slot.payload.is_none() {
                self.live += 1;
            }
            slot.payload  = Some(payload);
            slot.origin   = origin;
            slot.delay_ms = delay_ms;
            return;
        }
        let pos = self.next_pos;
        self.next_pos += 1;
        self.slots.insert(pos, Slot { id, payload: Some(payload), origin, delay_ms, once: false });
        self.positions.insert(id, pos);
        self.live += 1;
    }

    /// Stop `id`.  Returns `false` if it was already stopped or unknown.
    pub fn stop(&mut self, id: TimerId) -> bool {
        let Some(slot) = self.positions.get(&id).and_then(|pos| self.slots.get_mut(pos)) else {
            return false;
        };
        if slot.payload.take().is_some() {
            self.live -= 1;
            true
        } else {
            false
        }
    }

    /// `true` if `id` is armed and not stopped.
    pub fn is_live(&self, id: TimerId) -> bool {
        self.positions
            .get(&id)
            .and_then(|pos| self.slots.get(pos))
            .is_some_and(|slot| slot.payload.is_some())
    }

    /// Number of armed, unstopped timers.
    pub fn live_len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// The earliest due time among live timers, or `None` if empty.
    pub fn next_wake(&self) -> Option<Time> {
        self.slots
            .values()
            .filter(|slot| slot.payload.is_some())
            .map(Slot::due)
            .min()
    }

    /// Start a flush at `now`.
    pub fn begin_frame(&self, now: Time) -> Frame {
        Frame { now, cursor: 0, fired: 0 }
    }

    /// Remove stopped timers and close the frame.  Returns the number of
    /// timers fired during it.
    pub fn end_frame(&mut self, frame: Frame) -> usize {
        self.slots.retain(|_, slot| slot.payload.is_some());
        let slots = &self.slots;
        self.positions.retain(|_, pos| slots.contains_key(pos));
        frame.fired
    }

    fn insert(&mut self, payload: T, delay_ms: u64, origin: Time, once: bool) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let pos = self.next_pos;
        self.next_pos += 1;
        self.slots.insert(pos, Slot { id, payload: Some(payload), origin, delay_ms, once });
        self.positions.insert(id, pos);
        self.live += 1;
        id
    }
}

impl<T: Clone> TimerQueue<T> {
    /// Advance `frame` to the next due timer after its cursor and fire it.
    ///
    /// Returns `None` once every queued timer has been visited.
    pub fn next_due(&mut self, frame: &mut Frame) -> Option<Fired<T>> {
        let now = frame.now;
        let mut found = None;
        for (&pos, slot) in self.slots.range((Excluded(frame.cursor), Unbounded)) {
            frame.cursor = pos;
            if slot.payload.is_some() && slot.due() <= now {
                found = Some(pos);
                break;
            }
        }
        let slot = self.slots.get_mut(&found?)?;

        let (elapsed_ms, payload) = if slot.once {
            let payload = slot.payload.take()?;
            self.live -= 1;
            (now.since(slot.origin), payload)
        } else {
            (now.since(slot.due()), slot.payload.clone()?)
        };
        frame.fired += 1;
        Some(Fired { timer: slot.id, payload, elapsed_ms, now })
    }
}
