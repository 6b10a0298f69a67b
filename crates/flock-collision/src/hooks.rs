//! Event callbacks fired while resolving a frame's collisions.

use flock_core::{AgentId, EntityId};
use glam::Vec3;

/// Callbacks invoked by [`CollisionWorld::resolve`][crate::CollisionWorld::resolve]
/// as it flips capture latches and pushes overlapping objects apart.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  The hooks run mid-pass; they must not
/// assume other objects have reached their final position yet.
pub trait CollisionHooks {
    /// An agent's footprint entered a pen trigger and flipped the capture
    /// latch.  Fires once per continuous stay.
    fn on_capture(&mut self, _agent: AgentId, _entity: EntityId) {}

    /// A previously captured agent left every pen trigger.
    fn on_release(&mut self, _agent: AgentId, _entity: EntityId) {}

    /// `entity` was pushed out of `other` by `push` (ground plane only).
    fn on_separation(&mut self, _entity: EntityId, _other: EntityId, _push: Vec3) {}
}

/// A [`CollisionHooks`] that does nothing.  Use when only the returned
/// [`FrameStats`][crate::FrameStats] matter.
pub struct NoopHooks;

impl CollisionHooks for NoopHooks {}
