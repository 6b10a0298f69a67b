//! Fluent builder for constructing a [`Sim`].

use flock_agent::{AgentParams, AgentRngs, AgentStore};
use flock_collision::{CollisionWorld, WorldObject};
use flock_core::{DT_MAX, FrameClock, RectXz, SimConfig, SimRng, dt_valid};
use flock_spatial::{Aabb, Transform};
use glam::Vec3;

use crate::{Sim, SimError, SimResult, World};

// ── Stock entity dimensions ───────────────────────────────────────────────────

/// Sheep collision box: half extent on the ground plane.
pub const SHEEP_HALF: f32 = 0.3;
/// Sheep collision box height.
pub const SHEEP_HEIGHT: f32 = 0.6;
/// Player collision box: half extent on the ground plane.
pub const PLAYER_HALF: f32 = 0.4;
/// Player collision box height.
pub const PLAYER_HEIGHT: f32 = 1.8;

/// Thickness of the boundary fence walls.
const FENCE_THICKNESS: f32 = 0.3;
/// Height of the boundary fence walls.
const FENCE_HEIGHT: f32 = 1.2;
/// Height of the pen's trigger volume.
const PEN_TRIGGER_HEIGHT: f32 = 0.2;
/// Scattered spawns keep this far from the map edge.
const SPAWN_MARGIN: f32 = 1.0;

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`] — seed, map bounds, pen rectangle, fixed timestep.
///
/// # Optional inputs (have defaults)
///
/// | Method                      | Default                               |
/// |-----------------------------|---------------------------------------|
/// | `.params(p)`                | [`AgentParams::default()`]            |
/// | `.sheep_at(pos)`            | no hand-placed sheep                  |
/// | `.scatter_sheep(n)`         | 0                                     |
/// | `.player_at(pos)`           | no player (sheep never flee)          |
/// | `.without_boundary_fence()` | fence ring around the bounds          |
/// | `.scenery_at(pos, ext)`     | no extra obstacles                    |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(SimConfig::sized(42, 20.0))
///     .scatter_sheep(12)
///     .player_at(Vec3::ZERO)
///     .build()?;
/// sim.run_frames(600, &mut NoopObserver);
/// ```
pub struct SimBuilder {
    config: SimConfig,
    params: AgentParams,
    sheep: Vec<Vec3>,
    scatter: usize,
    player: Option<Vec3>,
    boundary_fence: bool,
    scenery: Vec<(Vec3, Vec3)>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            params: AgentParams::default(),
            sheep: Vec::new(),
            scatter: 0,
            player: None,
            boundary_fence: true,
            scenery: Vec::new(),
        }
    }

    /// Tuning values stamped onto every spawned sheep.  The roam regions
    /// inside are overwritten from the config in [`build`][Self::build].
    pub fn params(mut self, params: AgentParams) -> Self {
        self.params = params;
        self
    }

    /// Spawn one sheep at an exact position (clamped into bounds).
    pub fn sheep_at(mut self, pos: Vec3) -> Self {
        self.sheep.push(pos);
        self
    }

    /// Spawn `n` sheep scattered uniformly over the map, outside the pen.
    pub fn scatter_sheep(mut self, n: usize) -> Self {
        self.scatter += n;
        self
    }

    /// Spawn the player entity.  Without one, no sheep ever flees.
    pub fn player_at(mut self, pos: Vec3) -> Self {
        self.player = Some(pos);
        self
    }

    /// Skip the fence ring around the bounds.  Positions are still clamped
    /// to the bounds rectangle by the behavior phase.
    pub fn without_boundary_fence(mut self) -> Self {
        self.boundary_fence = false;
        self
    }

    /// Add a static obstacle footed at `pos`: `ext.x`/`ext.z` are footprint
    /// half extents, `ext.y` is the box height.
    pub fn scenery_at(mut self, pos: Vec3, ext: Vec3) -> Self {
        self.scenery.push((pos, ext));
        self
    }

    /// Validate the config, assemble the world, and return a ready-to-run
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        // ── Validate config ───────────────────────────────────────────────
        let bounds = self.config.bounds;
        let pen = self.config.pen;
        if !bounds.is_valid() {
            return Err(SimError::Config("bounds rectangle is degenerate".into()));
        }
        if !pen.is_valid() {
            return Err(SimError::Config("pen rectangle is degenerate".into()));
        }
        if pen.min.x < bounds.min.x
            || pen.min.y < bounds.min.y
            || pen.max.x > bounds.max.x
            || pen.max.y > bounds.max.y
        {
            return Err(SimError::Config("pen must lie inside the map bounds".into()));
        }
        if !dt_valid(self.config.fixed_dt) {
            return Err(SimError::Config(format!(
                "fixed_dt {} outside (0, {DT_MAX}]",
                self.config.fixed_dt
            )));
        }

        // roam regions come from the config, not the caller
        let mut params = self.params;
        params.bounds = bounds;
        params.pen = pen;
        params.validate()?;

        let mut world = World::new();
        let mut agents = AgentStore::new();
        let mut rngs = AgentRngs::new(self.config.seed);

        // ── Static geometry ───────────────────────────────────────────────
        world.spawn(Transform::at(pen.center()), |e| {
            WorldObject::pen(
                e,
                Aabb::footed(pen.width() * 0.5, PEN_TRIGGER_HEIGHT, pen.depth() * 0.5),
            )
        });

        if self.boundary_fence {
            spawn_boundary_fence(&mut world, &bounds);
        }
        for (pos, ext) in &self.scenery {
            world.spawn(Transform::at(*pos), |e| {
                WorldObject::scenery(e, Aabb::footed(ext.x, ext.y, ext.z))
            });
        }

        // ── Player ────────────────────────────────────────────────────────
        let player = self.player.map(|pos| {
            world.spawn(Transform::at(pos), |e| {
                WorldObject::player(e, Aabb::footed(PLAYER_HALF, PLAYER_HEIGHT, PLAYER_HALF))
            })
        });

        // ── Sheep ─────────────────────────────────────────────────────────
        let mut scatter_rng = SimRng::new(self.config.seed);
        let spawn_region = bounds.shrunk(SPAWN_MARGIN);
        let mut positions = self.sheep;
        for _ in 0..self.scatter {
            positions.push(scatter_spot(&mut scatter_rng, &spawn_region, &pen));
        }

        let local = Aabb::footed(SHEEP_HALF, SHEEP_HEIGHT, SHEEP_HALF);
        for pos in positions {
            let pos = bounds.clamp(pos);
            world.spawn(Transform::at(pos), |entity| {
                let agent = agents.spawn(entity, params.clone());
                rngs.push_next();
                WorldObject::agent(entity, agent, local)
            });
        }

        Ok(Sim {
            config: self.config,
            clock: FrameClock::new(),
            world,
            agents,
            rngs,
            collision: CollisionWorld::default(),
            player,
            prev_pos: Vec::new(),
        })
    }
}

/// Four fence slabs hugging the bounds rectangle from the outside, extended
/// past the corners so the ring has no gaps.  The ring holds the player on
/// the pasture; sheep are held by their own bounds clamp.
fn spawn_boundary_fence(world: &mut World, bounds: &RectXz) {
    let t = FENCE_THICKNESS;
    let cx = (bounds.min.x + bounds.max.x) * 0.5;
    let cz = (bounds.min.y + bounds.max.y) * 0.5;
    let half_w = bounds.width() * 0.5 + t;
    let half_d = bounds.depth() * 0.5 + t;

    let walls = [
        (Vec3::new(cx, 0.0, bounds.max.y + t * 0.5), half_w, t * 0.5),
        (Vec3::new(cx, 0.0, bounds.min.y - t * 0.5), half_w, t * 0.5),
        (Vec3::new(bounds.max.x + t * 0.5, 0.0, cz), t * 0.5, half_d),
        (Vec3::new(bounds.min.x - t * 0.5, 0.0, cz), t * 0.5, half_d),
    ];
    for (pos, half_x, half_z) in walls {
        world.spawn(Transform::at(pos), |e| {
            WorldObject::fence(e, Aabb::footed(half_x, FENCE_HEIGHT, half_z))
        });
    }
}

/// Pick a spawn point in `region`, resampling a few times to stay out of the
/// pen so freshly placed sheep do not start out captured.
fn scatter_spot(rng: &mut SimRng, region: &RectXz, pen: &RectXz) -> Vec3 {
    for _ in 0..16 {
        let p = rng.point_in(region);
        if !pen.contains(p) {
            return p;
        }
    }
    region.center()
}
