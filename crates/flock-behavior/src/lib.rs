//! `flock-behavior` — the per-frame herd behavior engine.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`context`] | `BehaviorCtx` — read-only frame inputs shared by all agents   |
//! | [`machine`] | `update`, `launch`, the mode priority chain, tuning constants |
//! | [`wander`]  | Calm roaming: heading picks, grazing pauses, edge bounces     |
//! | [`flee`]    | Threat response: trigger, heading refresh, stuck escape       |
//! | [`motion`]  | Shared movement helpers: planar stepping, turning, walk bob   |
//!
//! # Mode priority
//!
//! Every frame, exactly one branch moves the agent, picked in fixed order:
//!
//! 1. **Launched** — ballistic flight until landing, then panic.
//! 2. **Panicked** — erratic sprinting until the timer runs out.
//! 3. **Fleeing** — directed escape while the player is too close.
//! 4. **Wandering / Paused** — calm roaming inside the allowed region
//!    (the whole map, or the pen once captured).
//!
//! Transitions may fall through within a single frame: an expiring panic
//! re-checks the flee trigger immediately, and a flee that reaches safety
//! finishes the frame as a wander step.  An agent is never left standing in a
//! mode whose entry condition already fails.

pub mod context;
pub mod flee;
pub mod machine;
pub mod motion;
pub mod wander;


pub use context::BehaviorCtx;
pub use machine::{GRAVITY, LAUNCH_LIFT, launch, update};
