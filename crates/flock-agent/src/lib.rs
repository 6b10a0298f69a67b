//! `flock-agent` — per-agent parameters, behavior state, and storage.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`params`] | `AgentParams` — immutable per-agent tunables                 |
//! | [`state`]  | `AgentState`, `Mode` — the mutable behavior state machine    |
//! | [`store`]  | `AgentStore` (SoA data), `AgentRngs` (per-agent RNG)         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                        |
//! |---------|---------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.            |
//!
//! The split between immutable `AgentParams` and mutable `AgentState` is
//! deliberate: the behavior engine takes `&AgentParams` and `&mut AgentState`
//! per agent, so tuning values can never drift mid-run and a state reset
//! never loses configuration.

pub mod params;
pub mod state;
pub mod store;

#[cfg(test)]
mod tests;

pub use params::AgentParams;
pub use state::{AgentState, Mode};
pub use store::{AgentRngs, AgentStore};
