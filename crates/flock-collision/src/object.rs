//! Collidable world entities and their capability flags.

use flock_core::{AgentId, EntityId};
use flock_spatial::Aabb;

/// One collidable entity: its handle, local-space box, and what it does.
///
/// Roles are capability flags, not kinds: the resolver asks "is this solid,
/// does it move, does it capture" and never what the entity is called.  A
/// gate that is both `fence` and `pen` would behave as both.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldObject {
    pub entity: EntityId,

    /// Agent driving this entity, or `AgentId::INVALID` for scenery, fences,
    /// pens, and the player.
    pub agent: AgentId,

    /// Local-space bounding box, rewrapped into world space every frame.
    pub local: Aabb,

    /// Moves under behavior or host control; eligible to be pushed.
    pub mobile: bool,

    /// Barrier for the player only; agents slip between the rails.
    pub fence: bool,

    /// Capture trigger: flips the capture latch of agents whose footprint
    /// overlaps it near ground level.  Solid to the player, never to agents.
    pub pen: bool,
}

impl WorldObject {
    /// A herd agent: mobile and solid.
    pub fn agent(entity: EntityId, agent: AgentId, local: Aabb) -> Self {
        Self { entity, agent, local, mobile: true, fence: false, pen: false }
    }

    /// The player: mobile, solid, host-controlled.  Never pushed by agents.
    pub fn player(entity: EntityId, local: Aabb) -> Self {
        Self { entity, agent: AgentId::INVALID, local, mobile: true, fence: false, pen: false }
    }

    /// A fence segment: static, blocks the player, permeable to agents.
    pub fn fence(entity: EntityId, local: Aabb) -> Self {
        Self { entity, agent: AgentId::INVALID, local, mobile: false, fence: true, pen: false }
    }

    /// A capture zone: static trigger, solid only to the player.
    pub fn pen(entity: EntityId, local: Aabb) -> Self {
        Self { entity, agent: AgentId::INVALID, local, mobile: false, fence: false, pen: true }
    }

    /// Immovable scenery (rocks, troughs).  Solid to everything; a launched
    /// agent striking one lands on the spot.
    pub fn scenery(entity: EntityId, local: Aabb) -> Self {
        Self { entity, agent: AgentId::INVALID, local, mobile: false, fence: false, pen: false }
    }

    /// `true` when an agent drives this entity.
    #[inline]
    pub fn is_agent(&self) -> bool {
        self.agent != AgentId::INVALID
    }

    /// `true` when this object is a barrier for `mover`.  Fences and the pen
    /// floor block the player but let agents through; plain scenery blocks
    /// everyone.
    #[inline]
    pub fn blocks(&self, mover: &WorldObject) -> bool {
        if self.fence || self.pen { !mover.is_agent() } else { true }
    }
}
