//! The `Sim` struct and its frame loop.

use flock_agent::{AgentRngs, AgentStore};
use flock_behavior::BehaviorCtx;
use flock_collision::{CollisionHooks, CollisionWorld, FrameStats};
use flock_core::{AgentId, EntityId, FlockError, FrameClock, SimConfig, dt_valid};
use glam::Vec3;

use crate::{SimError, SimObserver, SimResult, World};

// ── Observer bridge ───────────────────────────────────────────────────────────

/// Forwards pen latch events from the collision pass to the frame observer.
struct ObserverHooks<'a, O: SimObserver> {
    observer: &'a mut O,
}

impl<O: SimObserver> CollisionHooks for ObserverHooks<'_, O> {
    fn on_capture(&mut self, agent: AgentId, entity: EntityId) {
        self.observer.on_capture(agent, entity);
    }

    fn on_release(&mut self, agent: AgentId, entity: EntityId) {
        self.observer.on_release(agent, entity);
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim` holds all simulation state and drives the per-frame pipeline:
///
/// 1. **Guard**: an invalid `dt` (zero or less, `NaN`, or above
///    [`DT_MAX`][flock_core::DT_MAX]) skips the frame entirely.
/// 2. **Snapshot**: every slot's position is recorded so the collision pass
///    can sweep fast movers against the geometry they crossed.
/// 3. **Behavior phase**: each placed agent runs its state machine
///    ([`flock_behavior::update`]) against the shared frame context.
/// 4. **Collision phase**: [`CollisionWorld::resolve`] stops tunnelling
///    flights, flips pen capture latches, and separates overlapping pairs.
/// 5. **Advance**: frame stats reach the observer and the clock ticks.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Global configuration (seed, map bounds, pen, fixed timestep).
    pub config: SimConfig,

    /// Simulation clock: accepted frames and accumulated seconds.
    pub clock: FrameClock,

    /// Entity registry: objects and transforms in parallel slots.
    pub world: World,

    /// Agent columns (SoA).  The behavior phase walks these in agent order.
    pub agents: AgentStore,

    /// Per-agent deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: AgentRngs,

    /// The collision pass configuration (capture band height).
    pub collision: CollisionWorld,

    /// The player's entity, if one was spawned.  Its position feeds every
    /// agent's flee check.
    pub player: Option<EntityId>,

    /// Scratch: positions at frame start, indexed by world slot.  Reused
    /// across frames to avoid reallocating.
    pub(crate) prev_pos: Vec<Option<Vec3>>,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Advance one frame of `dt` seconds.
    ///
    /// An invalid `dt` skips the frame: no agent moves, the clock stands
    /// still, and the observer hears nothing.
    pub fn frame<O: SimObserver>(&mut self, dt: f32, observer: &mut O) -> FrameStats {
        if !dt_valid(dt) {
            return FrameStats::default();
        }
        observer.on_frame_start(&self.clock);

        // positions at frame start, for the swept-collision pass
        self.prev_pos.clear();
        self.prev_pos
            .extend(self.world.transforms.iter().map(|t| t.map(|t| t.pos)));

        self.behavior_phase(dt);

        let mut hooks = ObserverHooks { observer };
        let stats = self.collision.resolve(
            &self.world.objects,
            &mut self.world.transforms,
            &self.prev_pos,
            &mut self.agents,
            &mut hooks,
        );

        observer.on_frame_end(&self.clock, stats);
        self.clock.advance(dt);
        stats
    }

    /// Run `n` frames at the config's fixed timestep and return the merged
    /// stats.
    pub fn run_frames<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> FrameStats {
        let dt = self.config.fixed_dt;
        let mut total = FrameStats::default();
        for _ in 0..n {
            total.merge(self.frame(dt, observer));
        }
        total
    }

    /// Throw an agent: it goes ballistic along `dir` at `speed` and panics
    /// when it lands.  A degenerate direction is replaced with a random one;
    /// flat throws get minimum upward lift.
    pub fn launch(&mut self, agent: AgentId, dir: Vec3, speed: f32) -> SimResult<()> {
        if agent.index() >= self.agents.count {
            return Err(SimError::UnknownAgent(agent));
        }
        let state = &mut self.agents.state[agent.index()];
        let rng = self.rngs.get_mut(agent);
        flock_behavior::launch(state, dir, speed, rng);
        Ok(())
    }

    /// Move the player.  The new position feeds flee checks from the next
    /// frame on.
    pub fn set_player_pos(&mut self, pos: Vec3) -> SimResult<()> {
        let entity = self.player.ok_or(SimError::NoPlayer)?;
        match self.world.transform_mut(entity) {
            Some(t) => {
                t.pos = pos;
                Ok(())
            }
            None => Err(SimError::World(FlockError::EntityNotFound(entity))),
        }
    }

    /// Current position of an agent's entity, if it is still placed.
    pub fn agent_pos(&self, agent: AgentId) -> Option<Vec3> {
        if agent.index() >= self.agents.count {
            return None;
        }
        self.world.position(self.agents.entity_of(agent))
    }

    /// Number of agents currently held in the pen.
    pub fn captured_count(&self) -> usize {
        self.agents.captured_count()
    }

    // ── Frame phases ──────────────────────────────────────────────────────

    /// Run the behavior state machine for every placed agent.
    fn behavior_phase(&mut self, dt: f32) {
        let player_pos = self
            .player
            .and_then(|e| self.world.transform(e))
            .map(|t| t.pos);
        let ctx = BehaviorCtx::new(dt, player_pos);

        // Explicit field borrows so the borrow checker sees disjoint access.
        let entities = &self.agents.entity;
        let params = &self.agents.params;
        let states = &mut self.agents.state;
        let rngs = &mut self.rngs.inner;
        let world = &mut self.world;

        for i in 0..entities.len() {
            let Some(slot) = world.slot(entities[i]) else { continue };
            let Some(transform) = world.transforms[slot].as_mut() else {
                continue;
            };
            flock_behavior::update(&params[i], &mut states[i], transform, &ctx, &mut rngs[i]);
        }
    }
}
