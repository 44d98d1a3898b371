//! Plain data rows written by event writers.

use ts_core::Time;
use ts_schedule::{EventKind, TransitionTarget};

/// One lifecycle notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub time_ms:   u64,
    pub entity:    u32,
    /// Empty for the default namespace.
    pub namespace: String,
    pub id:        u64,
    pub index:     usize,
    pub group:     u32,
    pub kind:      EventKind,
}

impl EventRow {
    pub fn new(kind: EventKind, target: &TransitionTarget, now: Time) -> Self {
        Self {
            time_ms:   now.0,
            entity:    target.entity.0,
            namespace: target.namespace.as_str().to_owned(),
            id:        target.id.0,
            index:     target.index,
            group:     target.group.0,
            kind,
        }
    }
}

/// Timer activity for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRow {
    pub time_ms: u64,
    pub fired:   u64,
}
