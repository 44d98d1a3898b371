use thiserror::Error;
use ts_core::{CoreError, EntryId};

use crate::EntryState;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("transition {id} is {state:?}; timing and tweens are fixed once it starts")]
    AlreadyStarted { id: EntryId, state: EntryState },

    #[error("transition {id} is already scheduled; its delay, duration, and ease are fixed")]
    AlreadyScheduled { id: EntryId },

    #[error("transitions still outstanding after {frames} frames")]
    Stalled { frames: u64 },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
