//! `Listeners` — named subscriber registry keyed by entity, namespace, and
//! event kind.
//!
//! Registering a listener under a name that already exists for the same key
//! replaces it in place, so several call sites can safely re-register the
//! same handler.  The empty name is an ordinary name.

use std::fmt;

use ts_core::{EntityId, Namespace, Time};

use crate::{EventKind, HashMap, Notifier, TransitionTarget};

/// A subscriber callback.
pub type Listener = Box<dyn FnMut(&TransitionTarget, Time)>;

type ListenerKey = (EntityId, Namespace, EventKind);

#[derive(Default)]
pub struct Listeners {
    map: HashMap<ListenerKey, Vec<(String, Listener)>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `listener` to `kind` events on `entity`/`namespace`.
    pub fn on<F>(&mut self, entity: EntityId, namespace: &Namespace, kind: EventKind, name: &str, listener: F)
    where
        F: FnMut(&TransitionTarget, Time) + 'static,
    {
        let list = self.map.entry((entity, namespace.clone(), kind)).or_default();
        match list.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = Box::new(listener),
            None => list.push((name.to_owned(), Box::new(listener))),
        }
    }

    /// Remove the named listener.  Returns `false` if none was registered.
    pub fn off(&mut self, entity: EntityId, namespace: &Namespace, kind: EventKind, name: &str) -> bool {
        let key = (entity, namespace.clone(), kind);
        let Some(list) = self.map.get_mut(&key) else {
            return false;
        };
        let before = list.len();
        list.retain(|(n, _)| n != name);
        let removed = list.len() != before;
        if list.is_empty() {
            self.map.remove(&key);
        }
        removed
    }

    /// Number of listeners for one key.
    pub fn count(&self, entity: EntityId, namespace: &Namespace, kind: EventKind) -> usize {
        self.map
            .get(&(entity, namespace.clone(), kind))
            .map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("keys", &self.map.len())
            .finish()
    }
}

impl Notifier for Listeners {
    fn notify(&mut self, kind: EventKind, target: &TransitionTarget, now: Time) {
        let key = (target.entity, target.namespace.clone(), kind);
        if let Some(list) = self.map.get_mut(&key) {
            for (_, listener) in list.iter_mut() {
                listener(target, now);
            }
        }
    }
}
