//! Strongly typed identifiers and the schedule namespace key.
//!
//! All numeric IDs are `Copy + Ord + Hash` so they can be used as map keys
//! and compared directly.  `EntryId` ordering is load-bearing: a transition
//! with a greater id preempts every pending transition with a smaller one on
//! the same entity and namespace.

use std::fmt;
use std::sync::Arc;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(n: $inner) -> $name {
                $name(n)
            }
        }
    };
}

typed_id! {
    /// The external object a schedule is attached to.
    pub struct EntityId(u32);
}

typed_id! {
    /// Transition identity.  Callers allocate these in strictly increasing
    /// order per (entity, namespace); see [`EntryIdAllocator`].
    pub struct EntryId(u64);
}

typed_id! {
    /// Opaque group context restored when notifying observers.
    pub struct GroupId(u32);
}

impl EntryId {
    /// The id immediately after `self`.
    #[inline]
    pub fn next(self) -> EntryId {
        EntryId(self.0 + 1)
    }
}

// ── EntryIdAllocator ──────────────────────────────────────────────────────────

/// Monotonic source of [`EntryId`]s.
///
/// The scheduler never generates ids itself; hosts that do not already have
/// an id source keep one allocator and call [`next_id`][Self::next_id] for
/// every new transition.
#[derive(Clone, Debug, Default)]
pub struct EntryIdAllocator {
    last: u64,
}

impl EntryIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id.  The first id handed out is `EntryId(1)`.
    pub fn next_id(&mut self) -> EntryId {
        self.last += 1;
        EntryId(self.last)
    }

    /// The most recently allocated id, if any.
    pub fn last(&self) -> Option<EntryId> {
        (self.last > 0).then_some(EntryId(self.last))
    }
}

// ── Namespace ─────────────────────────────────────────────────────────────────

/// Key separating independent schedule slots on the same entity
/// (for example one channel for opacity, another for position).
///
/// Backed by `Arc<str>` so it is cheap to clone into timer payloads.  The
/// empty name is the default channel.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub struct Namespace(Arc<str>);

impl Namespace {
    pub fn new(name: &str) -> Self {
        Namespace(Arc::from(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` for the default (unnamed) channel.
    pub fn is_default(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_default() {
            f.write_str("<default>")
        } else {
            f.write_str(&self.0)
        }
    }
}

impl From<&str> for Namespace {
    fn from(name: &str) -> Self {
        Namespace::new(name)
    }
}

impl From<String> for Namespace {
    fn from(name: String) -> Self {
        Namespace(Arc::from(name))
    }
}

impl From<Namespace> for String {
    fn from(ns: Namespace) -> String {
        ns.0.to_string()
    }
}
