//! Read-only frame inputs shared by every agent's behavior update.

use glam::Vec3;

/// Per-frame inputs the behavior engine reads but never writes.
///
/// Built once per frame by flock-sim and shared across all agents, so every
/// agent reacts to the same player position regardless of update order.
#[derive(Clone, Copy, Debug)]
pub struct BehaviorCtx {
    /// Seconds covered by this frame.  Already validated by the caller.
    pub dt: f32,

    /// Player position at the start of the frame, if a player entity exists.
    /// `None` disables the flee trigger; agents just roam.
    pub player_pos: Option<Vec3>,
}

impl BehaviorCtx {
    #[inline]
    pub fn new(dt: f32, player_pos: Option<Vec3>) -> Self {
        Self { dt, player_pos }
    }
}
