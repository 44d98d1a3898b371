//! Per-entity, per-namespace schedules and the registry that owns them.
//!
//! A [`Schedule`] holds at most one active entry plus the pending entries in
//! creation order.  An entry is in exactly one of the two places.  The
//! registry creates a schedule lazily on first registration and drops it as
//! soon as it has neither an active nor a pending entry, so "has a
//! schedule" means "has outstanding transitions".

use ts_core::{EntityId, EntryId, Namespace};

use crate::{Entry, HashMap};

/// Registry key: one schedule slot per entity and namespace.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ScheduleKey {
    pub entity:    EntityId,
    pub namespace: Namespace,
}

impl ScheduleKey {
    pub fn new(entity: EntityId, namespace: Namespace) -> Self {
        Self { entity, namespace }
    }
}

// ── Schedule ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct Schedule {
    pub(crate) active:  Option<Entry>,
    pub(crate) pending: Vec<Entry>,
}

impl Schedule {
    pub fn active(&self) -> Option<&Entry> {
        self.active.as_ref()
    }

    /// Pending entries, oldest first.
    pub fn pending(&self) -> &[Entry] {
        &self.pending
    }

    /// The active entry if its id matches, otherwise the most recently added
    /// pending entry with that id.
    pub fn find(&self, id: EntryId) -> Option<&Entry> {
        match &self.active {
            Some(entry) if entry.id == id => Some(entry),
            _ => self.pending.iter().rev().find(|e| e.id == id),
        }
    }

    pub fn find_mut(&mut self, id: EntryId) -> Option<&mut Entry> {
        match &mut self.active {
            Some(entry) if entry.id == id => Some(entry),
            _ => self.pending.iter_mut().rev().find(|e| e.id == id),
        }
    }

    /// `true` when no transitions are outstanding.
    pub fn is_empty(&self) -> bool {
        self.active.is_none() && self.pending.is_empty()
    }

    /// Active plus pending entries.
    pub fn len(&self) -> usize {
        self.pending.len() + usize::from(self.active.is_some())
    }
}

// ── ScheduleRegistry ──────────────────────────────────────────────────────────

/// Owner of every [`Schedule`], keyed by [`ScheduleKey`].
#[derive(Debug, Default)]
pub struct ScheduleRegistry {
    slots: HashMap<ScheduleKey, Schedule>,
}

impl ScheduleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the schedule for `key`, creating an empty one if needed.
    pub fn ensure(&mut self, key: &ScheduleKey) -> &mut Schedule {
        self.slots.entry(key.clone()).or_default()
    }

    pub fn get(&self, key: &ScheduleKey) -> Option<&Schedule> {
        self.slots.get(key)
    }

    pub fn get_mut(&mut self, key: &ScheduleKey) -> Option<&mut Schedule> {
        self.slots.get_mut(key)
    }

    pub fn find(&self, key: &ScheduleKey, id: EntryId) -> Option<&Entry> {
        self.slots.get(key)?.find(id)
    }

    pub fn find_mut(&mut self, key: &ScheduleKey, id: EntryId) -> Option<&mut Entry> {
        self.slots.get_mut(key)?.find_mut(id)
    }

    /// The active entry for `key` if it has id `id`.
    pub(crate) fn active_mut(&mut self, key: &ScheduleKey, id: EntryId) -> Option<&mut Entry> {
        self.slots
            .get_mut(key)?
            .active
            .as_mut()
            .filter(|entry| entry.id == id)
    }

    /// Drop the slot for `key` if it has nothing outstanding.
    pub(crate) fn remove_if_empty(&mut self, key: &ScheduleKey) -> bool {
        if self.slots.get(key).is_some_and(Schedule::is_empty) {
            self.slots.remove(key);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
