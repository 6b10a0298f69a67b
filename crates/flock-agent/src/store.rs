//! Core agent storage: `AgentStore` (SoA data) and `AgentRngs` (per-agent RNG).
//!
//! # Why two structs?
//!
//! The behavior phase walks every agent holding `&AgentParams`, `&mut
//! AgentState`, and `&mut AgentRng` at once, while the world's transform
//! array is borrowed separately.  Keeping the RNGs out of [`AgentStore`] lets
//! the frame loop hand out `&mut AgentRngs` alongside shared reads of the
//! store without fighting the borrow checker, and keeps the store itself a
//! plain data bag that observers can be given read-only.
//!
//! ```ignore
//! // flock-sim frame loop (simplified):
//! let AgentStore { params, state, .. } = &mut sim.agents;
//! for (i, rng) in sim.rngs.inner.iter_mut().enumerate() {
//!     behavior::update(&params[i], &mut state[i], transform, &ctx, rng);
//! }
//! ```

use flock_core::{AgentId, AgentRng, EntityId};

use crate::params::AgentParams;
use crate::state::AgentState;

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, separated from [`AgentStore`] so the
/// frame loop can borrow both at once.
///
/// Seeded per agent from the master seed; growing the population appends new
/// streams without disturbing existing ones.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
    global_seed: u64,
}

impl AgentRngs {
    /// Empty set of streams derived from `global_seed`.
    pub fn new(global_seed: u64) -> Self {
        Self { inner: Vec::new(), global_seed }
    }

    /// Seed and append the stream for the next agent.
    pub fn push_next(&mut self) {
        let id = AgentId(self.inner.len() as u32);
        self.inner.push(AgentRng::new(self.global_seed, id));
    }

    /// Mutable reference to one agent's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all agent state.
///
/// Every `Vec` field has exactly `count` elements; the `AgentId` value is the
/// index into all of them:
///
/// ```ignore
/// let heading = store.state[agent.index()].direction;  // O(1), cache-friendly
/// ```
#[derive(Default)]
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// World entity each agent drives.
    pub entity: Vec<EntityId>,

    /// Immutable per-agent tunables.
    pub params: Vec<AgentParams>,

    /// Mutable behavior state.
    pub state: Vec<AgentState>,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if there are no agents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    /// Append an agent driving `entity` and return its id.
    pub fn spawn(&mut self, entity: EntityId, params: AgentParams) -> AgentId {
        let id = AgentId(self.count as u32);
        self.entity.push(entity);
        self.params.push(params);
        self.state.push(AgentState::default());
        self.count += 1;
        id
    }

    /// World entity for `agent`.
    #[inline]
    pub fn entity_of(&self, agent: AgentId) -> EntityId {
        self.entity[agent.index()]
    }

    /// Number of agents currently marked captured.
    pub fn captured_count(&self) -> usize {
        self.state.iter().filter(|s| s.captured).count()
    }
}
