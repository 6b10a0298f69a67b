//! The per-frame collision pass: sweep, capture triggers, separation.

use flock_agent::AgentStore;
use flock_spatial::{Aabb, Transform};
use glam::Vec3;

use crate::hooks::CollisionHooks;
use crate::object::WorldObject;

/// Displacement since the previous frame above which an object is swept
/// through substeps instead of tested only at its final position.  Normal
/// gaits never reach this; hard launches and oversized timesteps do.
pub const SWEEP_DISPLACEMENT: f32 = 2.0;

/// Substep granularity of a sweep, in world units.  Finer than the thinnest
/// wall segment so a swept mover cannot step across one.
const SWEEP_STEP: f32 = 0.5;

/// Upper bound on substeps per swept object per frame.
const MAX_SUBSTEPS: usize = 20;

/// Squared push length below which contact counts as resting, not overlap.
const PUSH_EPSILON: f32 = 1e-6;

// ── FrameStats ────────────────────────────────────────────────────────────────

/// Counters from one resolve pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Separations applied: one per overlapping solid pair pushed apart.
    pub collisions: u32,
    /// Capture latches flipped on this frame.
    pub captures: u32,
}

impl FrameStats {
    pub fn merge(&mut self, other: FrameStats) {
        self.collisions += other.collisions;
        self.captures += other.captures;
    }
}

// ── CollisionWorld ────────────────────────────────────────────────────────────

/// Stateless resolver over parallel object/transform slices.
///
/// The caller owns the slices; `resolve` reads capability flags from
/// [`WorldObject`], pushes transforms, and flips agent capture latches.  It
/// holds no frame-to-frame state of its own, so a single resolver can serve
/// any number of worlds.
#[derive(Clone, Debug)]
pub struct CollisionWorld {
    /// Height above a pen trigger's top within which an agent still counts
    /// as on the ground.  Agents sailing high over the pen are not captured
    /// mid-flight; low passes are.
    pub capture_band: f32,
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self { capture_band: 1.0 }
    }
}

impl CollisionWorld {
    /// Resolve one frame.
    ///
    /// `objects`, `transforms`, and `prev_pos` are parallel by slot; a `None`
    /// transform is a despawned entity and never collides.  `prev_pos` holds
    /// positions from before the behavior phase and only feeds the tunnelling
    /// sweep.
    ///
    /// Pass order:
    ///
    /// 1. fast movers are swept through substeps and stopped at the first
    ///    static that blocks them (see [`WorldObject::blocks`]);
    /// 2. agent footprints toggle pen capture latches, firing
    ///    [`CollisionHooks::on_capture`] / `on_release` on each flip;
    /// 3. overlapping pairs are pushed apart along the shallowest axis, with
    ///    the vertical part of the correction discarded.  A surviving push
    ///    against a still-launched mover cancels the flight and drops it to
    ///    ground height.
    ///
    /// An agent inside its post-launch window joins none of the three
    /// passes: it pushes nothing and nothing pushes or captures it.
    pub fn resolve<H: CollisionHooks>(
        &self,
        objects: &[WorldObject],
        transforms: &mut [Option<Transform>],
        prev_pos: &[Option<Vec3>],
        agents: &mut AgentStore,
        hooks: &mut H,
    ) -> FrameStats {
        debug_assert_eq!(objects.len(), transforms.len());
        debug_assert_eq!(objects.len(), prev_pos.len());

        let n = objects.len();
        let mut stats = FrameStats::default();

        let mut boxes: Vec<Option<Aabb>> = (0..n)
            .map(|i| transforms[i].map(|t| Aabb::from_local(objects[i].local, &t)))
            .collect();

        for i in 0..n {
            if objects[i].mobile {
                if let Some(prev) = prev_pos[i] {
                    self.sweep(i, objects, transforms, prev, &mut boxes, agents, hooks, &mut stats);
                }
            }
        }

        self.toggle_captures(objects, &boxes, agents, hooks, &mut stats);
        self.separate(objects, transforms, &mut boxes, agents, hooks, &mut stats);
        stats
    }

    /// Walk a fast mover from its previous position in substeps and stop it
    /// at the first blocking static contact, so thin walls cannot be
    /// tunnelled between two frames.
    #[allow(clippy::too_many_arguments)]
    fn sweep<H: CollisionHooks>(
        &self,
        i: usize,
        objects: &[WorldObject],
        transforms: &mut [Option<Transform>],
        prev: Vec3,
        boxes: &mut [Option<Aabb>],
        agents: &mut AgentStore,
        hooks: &mut H,
        stats: &mut FrameStats,
    ) {
        let Some(t) = transforms[i] else { return };
        if agent_invulnerable(objects, agents, i) {
            return;
        }
        let disp = t.pos - prev;
        let dist = disp.length();
        if dist <= SWEEP_DISPLACEMENT {
            return;
        }

        let steps = ((dist / SWEEP_STEP).ceil() as usize).clamp(1, MAX_SUBSTEPS);
        for s in 1..=steps {
            let frac = s as f32 / steps as f32;
            let mut probe = t;
            probe.pos = prev + disp * frac;
            let probe_box = Aabb::from_local(objects[i].local, &probe);

            for j in 0..objects.len() {
                if j == i || objects[j].mobile || !objects[j].blocks(&objects[i]) {
                    continue;
                }
                let Some(bj) = boxes[j] else { continue };
                if !probe_box.intersects(&bj) {
                    continue;
                }

                let mut push = probe_box.min_translation(&bj);
                push.y = 0.0; // movers are never lifted or buried by a push
                if push.length_squared() < PUSH_EPSILON {
                    continue;
                }

                probe.pos += push;
                if agent_launched(objects, agents, i) {
                    let state = &mut agents.state[objects[i].agent.index()];
                    state.land();
                    probe.pos.y = state.ground_height;
                }
                transforms[i] = Some(probe);
                boxes[i] = Some(Aabb::from_local(objects[i].local, &probe));
                stats.collisions += 1;
                hooks.on_separation(objects[i].entity, objects[j].entity, push);
                return;
            }
        }
    }

    /// Toggle pen capture latches from agent footprints.  An agent counts as
    /// in the pen when its box bottom sits within `capture_band` of the
    /// trigger's top and their ground footprints overlap.
    fn toggle_captures<H: CollisionHooks>(
        &self,
        objects: &[WorldObject],
        boxes: &[Option<Aabb>],
        agents: &mut AgentStore,
        hooks: &mut H,
        stats: &mut FrameStats,
    ) {
        for i in 0..objects.len() {
            let obj = &objects[i];
            if !obj.is_agent() {
                continue;
            }
            let Some(bx) = boxes[i] else { continue };
            let state = &mut agents.state[obj.agent.index()];
            // a freshly thrown agent is still the thrower's problem; let it
            // clear the pen before the latch can flip either way
            if state.invulnerable() {
                continue;
            }

            let in_pen = objects.iter().zip(boxes).any(|(other, ob)| {
                other.pen
                    && ob.is_some_and(|pb| {
                        bx.min.y <= pb.max.y + self.capture_band
                            && bx.min.x <= pb.max.x
                            && bx.max.x >= pb.min.x
                            && bx.min.z <= pb.max.z
                            && bx.max.z >= pb.min.z
                    })
            });

            if in_pen {
                if state.capture() {
                    stats.captures += 1;
                    hooks.on_capture(obj.agent, obj.entity);
                }
            } else if state.captured {
                state.release();
                hooks.on_release(obj.agent, obj.entity);
            }
        }
    }

    /// Push overlapping pairs apart.  Exactly one side of each pair moves:
    /// the agent when paired with the player (no mobile ever pushes the
    /// player), the lower slot when two agents meet.
    fn separate<H: CollisionHooks>(
        &self,
        objects: &[WorldObject],
        transforms: &mut [Option<Transform>],
        boxes: &mut [Option<Aabb>],
        agents: &mut AgentStore,
        hooks: &mut H,
        stats: &mut FrameStats,
    ) {
        for i in 0..objects.len() {
            let oi = &objects[i];
            if !oi.mobile {
                continue;
            }
            if agent_invulnerable(objects, agents, i) {
                continue;
            }
            let Some(mut bi) = boxes[i] else { continue };

            for j in 0..objects.len() {
                if j == i {
                    continue;
                }
                let oj = &objects[j];
                if !oj.blocks(oi) {
                    continue;
                }

                if oj.mobile {
                    if oi.is_agent() && oj.is_agent() {
                        if j < i {
                            continue; // lower slot already resolved this pair
                        }
                        // a captured and a free agent roam disjoint regions;
                        // the pen boundary does the separating
                        if agents.state[oi.agent.index()].captured
                            != agents.state[oj.agent.index()].captured
                        {
                            continue;
                        }
                    } else if !oi.is_agent() {
                        continue; // the player yields to no mobile
                    }
                    if agent_invulnerable(objects, agents, j) {
                        continue;
                    }
                }

                let Some(bj) = boxes[j] else { continue };
                if !bi.intersects(&bj) {
                    continue;
                }

                let mut push = bi.min_translation(&bj);
                push.y = 0.0; // movers are never lifted or buried by a push
                if push.length_squared() < PUSH_EPSILON {
                    continue;
                }

                let Some(t) = transforms[i].as_mut() else { continue };
                t.pos += push;
                if oi.is_agent() {
                    // a push never carries an agent past its map bounds
                    t.pos = agents.params[oi.agent.index()].bounds.clamp(t.pos);
                }
                if agent_launched(objects, agents, i) {
                    let state = &mut agents.state[oi.agent.index()];
                    state.land();
                    t.pos.y = state.ground_height;
                }
                bi = Aabb::from_local(oi.local, t);
                boxes[i] = Some(bi);
                stats.collisions += 1;
                hooks.on_separation(oi.entity, oj.entity, push);
            }
        }
    }
}

#[inline]
fn agent_launched(objects: &[WorldObject], agents: &AgentStore, i: usize) -> bool {
    objects[i].is_agent() && agents.state[objects[i].agent.index()].launched
}

#[inline]
fn agent_invulnerable(objects: &[WorldObject], agents: &AgentStore, i: usize) -> bool {
    objects[i].is_agent() && agents.state[objects[i].agent.index()].invulnerable()
}
