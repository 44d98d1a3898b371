//! `ts-core` — foundational types for the transition scheduler.
//!
//! This crate is a dependency of every other `ts-*` crate.  It has no `ts-*`
//! dependencies and minimal external ones (only `thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`ids`]     | `EntityId`, `EntryId`, `GroupId`, `EntryIdAllocator`, `Namespace` |
//! | [`time`]    | `Time`, `Clock`, `ManualClock`, `SystemClock`                |
//! | [`ease`]    | `Ease`                                                       |
//! | [`config`]  | `DriverConfig`, `TimingDefaults`, `Timing`                   |
//! | [`error`]   | `CoreError`, `CoreResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                         |
//! |---------|----------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, `Time`, and config types. |

pub mod config;
pub mod ease;
pub mod error;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DriverConfig, Timing, TimingDefaults};
pub use ease::Ease;
pub use error::{CoreError, CoreResult};
pub use ids::{EntityId, EntryId, EntryIdAllocator, GroupId, Namespace};
pub use time::{Clock, ManualClock, SystemClock, Time};
