//! `flock-collision` — overlap resolution and capture-zone triggers.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`object`] | `WorldObject` — entity handle, local box, capability flags   |
//! | [`hooks`]  | `CollisionHooks` trait, `NoopHooks`                          |
//! | [`world`]  | `CollisionWorld::resolve`, `FrameStats`, sweep constants     |
//!
//! # Design notes
//!
//! Collision runs as a single pass after the behavior phase has moved every
//! agent, so all pushes are computed from the same frame's positions:
//!
//! 1. **Sweep** — objects that displaced far enough to tunnel are walked
//!    through substeps against blocking statics and stopped at first
//!    contact.
//! 2. **Capture** — agent footprints are tested against pen triggers; the
//!    capture latch flips and [`CollisionHooks::on_capture`] fires once per
//!    continuous stay.
//! 3. **Separation** — overlapping pairs are pushed apart along the
//!    shallowest axis; the vertical component of the correction is
//!    discarded, so a graze whose minimum is vertical resolves to nothing
//!    rather than popping the mover into the air.
//!
//! Capability flags on [`WorldObject`] decide the role each entity plays;
//! nothing in here looks at what an entity is called or rendered as.
//! Fences and the pen floor block the player and let agents through, so a
//! thrown sheep clears the rails while the shepherd walks the long way
//! round.

pub mod hooks;
pub mod object;
pub mod world;

#[cfg(test)]
mod tests;

pub use hooks::{CollisionHooks, NoopHooks};
pub use object::WorldObject;
pub use world::{CollisionWorld, FrameStats};
