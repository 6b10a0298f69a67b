//! `flock-core` — foundational types for the `flock` herd simulation.
//!
//! This crate is a dependency of every other `flock-*` crate.  It
//! intentionally has no `flock-*` dependencies and minimal external ones
//! (only `glam`, `rand`, and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                          |
//! |-----------|---------------------------------------------------|
//! | [`ids`]   | `EntityId`, `AgentId`                             |
//! | [`rect`]  | `RectXz` — ground-plane rectangle (bounds, pen)   |
//! | [`time`]  | `DT_MAX`, `dt_valid`, `FrameClock`, `SimConfig`   |
//! | [`rng`]   | `AgentRng` (per-agent), `SimRng` (world)          |
//! | [`error`] | `FlockError`, `FlockResult`                       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod error;
pub mod ids;
pub mod rect;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{FlockError, FlockResult};
pub use ids::{AgentId, EntityId};
pub use rect::RectXz;
pub use rng::{AgentRng, SimRng};
pub use time::{DT_MAX, FrameClock, SimConfig, dt_valid};
