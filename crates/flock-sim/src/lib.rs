//! `flock-sim` — frame loop orchestrator for the flock herd simulation.
//!
//! # Frame anatomy
//!
//! ```text
//! sim.frame(dt, &mut observer):
//!   ① Guard     — reject invalid dt (zero or less, NaN, above DT_MAX);
//!                 the whole frame is skipped and the clock stands still.
//!   ② Snapshot  — record every slot's position for the sweep pass.
//!   ③ Behavior  — per agent: ballistic flight, landing panic, flee
//!                 trigger/refresh, or calm wandering (flock-behavior).
//!   ④ Collision — swept statics, pen capture latches, pair separation
//!                 (flock-collision); pen events reach the observer.
//!   ⑤ Advance   — report frame stats, bump the frame clock.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use flock_core::SimConfig;
//! use flock_sim::{NoopObserver, SimBuilder};
//! use glam::Vec3;
//!
//! let mut sim = SimBuilder::new(SimConfig::sized(42, 20.0))
//!     .scatter_sheep(12)
//!     .player_at(Vec3::ZERO)
//!     .build()?;
//! sim.run_frames(600, &mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod world;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use world::World;
