//! Collision pass tests: small hand-built worlds, one resolve at a time.

use flock_agent::{AgentParams, AgentStore};
use flock_core::{AgentId, EntityId};
use flock_spatial::{Aabb, Transform};
use glam::Vec3;

use crate::{CollisionHooks, CollisionWorld, FrameStats, NoopHooks, WorldObject};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn sheep_box() -> Aabb {
    Aabb::footed(0.3, 0.6, 0.3)
}

/// Hand-assembled world: parallel object/transform slices plus the agent
/// store, mirroring what the sim owns.
struct TestWorld {
    objects: Vec<WorldObject>,
    transforms: Vec<Option<Transform>>,
    agents: AgentStore,
}

impl TestWorld {
    fn new() -> Self {
        Self {
            objects: Vec::new(),
            transforms: Vec::new(),
            agents: AgentStore::new(),
        }
    }

    fn next_entity(&self) -> EntityId {
        EntityId(self.objects.len() as u32)
    }

    fn add_sheep(&mut self, pos: Vec3) -> (usize, AgentId) {
        let entity = self.next_entity();
        let agent = self.agents.spawn(entity, AgentParams::default());
        self.objects.push(WorldObject::agent(entity, agent, sheep_box()));
        self.transforms.push(Some(Transform::at(pos)));
        (self.objects.len() - 1, agent)
    }

    fn add_player(&mut self, pos: Vec3) -> usize {
        let entity = self.next_entity();
        self.objects.push(WorldObject::player(entity, Aabb::footed(0.4, 1.8, 0.4)));
        self.transforms.push(Some(Transform::at(pos)));
        self.objects.len() - 1
    }

    fn add_fence(&mut self, pos: Vec3, half_x: f32, half_z: f32) -> usize {
        let entity = self.next_entity();
        self.objects.push(WorldObject::fence(entity, Aabb::footed(half_x, 1.5, half_z)));
        self.transforms.push(Some(Transform::at(pos)));
        self.objects.len() - 1
    }

    fn add_pen(&mut self, pos: Vec3, half: f32) -> usize {
        let entity = self.next_entity();
        self.objects.push(WorldObject::pen(entity, Aabb::footed(half, 0.2, half)));
        self.transforms.push(Some(Transform::at(pos)));
        self.objects.len() - 1
    }

    fn add_scenery(&mut self, pos: Vec3, half: Vec3) -> usize {
        let entity = self.next_entity();
        self.objects.push(WorldObject::scenery(
            entity,
            Aabb::footed(half.x, half.y, half.z),
        ));
        self.transforms.push(Some(Transform::at(pos)));
        self.objects.len() - 1
    }

    /// A thin stone wall: scenery, so it blocks sheep too.
    fn add_wall(&mut self, pos: Vec3, half_x: f32, half_z: f32) -> usize {
        self.add_scenery(pos, Vec3::new(half_x, 1.5, half_z))
    }

    fn pos(&self, slot: usize) -> Vec3 {
        self.transforms[slot].unwrap().pos
    }

    fn resolve(&mut self) -> FrameStats {
        let prev = vec![None; self.objects.len()];
        self.resolve_from(&prev, &mut NoopHooks)
    }

    fn resolve_with<H: CollisionHooks>(&mut self, hooks: &mut H) -> FrameStats {
        let prev = vec![None; self.objects.len()];
        self.resolve_from(&prev, hooks)
    }

    fn resolve_from<H: CollisionHooks>(
        &mut self,
        prev: &[Option<Vec3>],
        hooks: &mut H,
    ) -> FrameStats {
        CollisionWorld::default().resolve(
            &self.objects,
            &mut self.transforms,
            prev,
            &mut self.agents,
            hooks,
        )
    }
}

/// Hooks that log every callback.
#[derive(Default)]
struct EventLog {
    captures: Vec<(AgentId, EntityId)>,
    releases: Vec<(AgentId, EntityId)>,
    separations: Vec<(EntityId, EntityId, Vec3)>,
}

impl CollisionHooks for EventLog {
    fn on_capture(&mut self, agent: AgentId, entity: EntityId) {
        self.captures.push((agent, entity));
    }
    fn on_release(&mut self, agent: AgentId, entity: EntityId) {
        self.releases.push((agent, entity));
    }
    fn on_separation(&mut self, entity: EntityId, other: EntityId, push: Vec3) {
        self.separations.push((entity, other, push));
    }
}

// ── Capture triggers ──────────────────────────────────────────────────────────

#[cfg(test)]
mod capture_tests {
    use super::*;

    #[test]
    fn agent_in_pen_captured_once_per_stay() {
        let mut w = TestWorld::new();
        let (slot, agent) = w.add_sheep(Vec3::ZERO);
        w.add_pen(Vec3::ZERO, 2.0);

        let mut log = EventLog::default();
        let stats = w.resolve_with(&mut log);
        assert_eq!(stats.captures, 1);
        assert!(w.agents.state[agent.index()].captured);
        assert_eq!(log.captures, vec![(agent, w.objects[slot].entity)]);

        // staying put must not re-fire
        let stats = w.resolve_with(&mut log);
        assert_eq!(stats.captures, 0);
        assert_eq!(log.captures.len(), 1);
    }

    #[test]
    fn leaving_pen_releases_and_rearms() {
        let mut w = TestWorld::new();
        let (slot, agent) = w.add_sheep(Vec3::ZERO);
        w.add_pen(Vec3::ZERO, 2.0);

        let mut log = EventLog::default();
        w.resolve_with(&mut log);
        assert!(w.agents.state[agent.index()].captured);

        w.transforms[slot] = Some(Transform::at(Vec3::new(10.0, 0.0, 0.0)));
        w.resolve_with(&mut log);
        assert!(!w.agents.state[agent.index()].captured);
        assert_eq!(log.releases.len(), 1);

        w.transforms[slot] = Some(Transform::at(Vec3::ZERO));
        let stats = w.resolve_with(&mut log);
        assert_eq!(stats.captures, 1, "re-entry is a fresh stay");
        assert_eq!(log.captures.len(), 2);
    }

    #[test]
    fn high_flight_over_pen_not_captured() {
        let mut w = TestWorld::new();
        let (_, agent) = w.add_sheep(Vec3::new(0.0, 3.0, 0.0));
        w.add_pen(Vec3::ZERO, 2.0);

        let stats = w.resolve();
        assert_eq!(stats.captures, 0);
        assert!(!w.agents.state[agent.index()].captured);
    }

    #[test]
    fn low_flight_through_pen_is_caught() {
        let mut w = TestWorld::new();
        let (_, agent) = w.add_sheep(Vec3::new(0.0, 0.4, 0.0));
        w.add_pen(Vec3::ZERO, 2.0);
        {
            let state = &mut w.agents.state[agent.index()];
            state.launch(Vec3::new(4.0, 2.0, 0.0));
            state.invulnerable_left = 0.0; // immunity already spent
        }

        let stats = w.resolve();
        assert_eq!(stats.captures, 1);
        let state = &w.agents.state[agent.index()];
        assert!(state.captured);
        assert!(!state.launched, "capture claims the agent out of its flight");
    }

    #[test]
    fn invulnerable_agent_latch_frozen() {
        let mut w = TestWorld::new();
        let (_, agent) = w.add_sheep(Vec3::ZERO);
        w.add_pen(Vec3::ZERO, 2.0);
        w.agents.state[agent.index()].launch(Vec3::Y); // grants immunity

        let stats = w.resolve();
        assert_eq!(stats.captures, 0);
        assert!(!w.agents.state[agent.index()].captured);
    }

    #[test]
    fn despawned_agent_ignored() {
        let mut w = TestWorld::new();
        let (slot, agent) = w.add_sheep(Vec3::ZERO);
        w.add_pen(Vec3::ZERO, 2.0);
        w.transforms[slot] = None;

        let stats = w.resolve();
        assert_eq!(stats, FrameStats::default());
        assert!(!w.agents.state[agent.index()].captured);
    }
}

// ── Separation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod separation_tests {
    use super::*;

    #[test]
    fn overlapping_sheep_push_apart_lower_slot_moves() {
        let mut w = TestWorld::new();
        let (a, _) = w.add_sheep(Vec3::new(0.1, 0.0, 0.0));
        let (b, _) = w.add_sheep(Vec3::ZERO);
        let b_before = w.pos(b);

        let stats = w.resolve();
        assert_eq!(stats.collisions, 1);
        assert_eq!(w.pos(b), b_before, "higher slot must not move");
        // pushed along +X until the faces meet
        assert!((w.pos(a).x - 0.6).abs() < 1e-4, "got {}", w.pos(a));
        assert_eq!(w.pos(a).y, 0.0);
    }

    #[test]
    fn player_is_never_pushed() {
        let mut w = TestWorld::new();
        let (sheep, _) = w.add_sheep(Vec3::new(0.2, 0.0, 0.0));
        let player = w.add_player(Vec3::ZERO);

        let stats = w.resolve();
        assert_eq!(stats.collisions, 1);
        assert_eq!(w.pos(player), Vec3::ZERO);
        assert!((w.pos(sheep).x - 0.7).abs() < 1e-4, "sheep yields to the player");
    }

    #[test]
    fn vertical_minimum_resolves_to_nothing() {
        let mut w = TestWorld::new();
        // sheep standing deep inside a wide low slab: the shallowest escape
        // is straight up, and a discarded vertical push leaves the mover be
        let (sheep, _) = w.add_sheep(Vec3::new(1.6, 0.0, 0.0));
        w.add_scenery(Vec3::ZERO, Vec3::new(2.0, 0.3, 2.0));

        let stats = w.resolve();
        assert_eq!(stats.collisions, 0, "no pop, no sideways shove");
        assert_eq!(w.pos(sheep), Vec3::new(1.6, 0.0, 0.0));
    }

    #[test]
    fn side_contact_with_scenery_pushes_planar() {
        let mut w = TestWorld::new();
        // same slab, but tall: the shallowest escape is out the near face
        let (sheep, _) = w.add_sheep(Vec3::new(2.1, 0.0, 0.0));
        w.add_scenery(Vec3::ZERO, Vec3::new(2.0, 1.0, 2.0));

        let y_before = w.pos(sheep).y;
        let stats = w.resolve();
        assert_eq!(stats.collisions, 1);
        assert_eq!(w.pos(sheep).y, y_before);
        assert!((w.pos(sheep).x - 2.3).abs() < 1e-4, "pushed clear of the face, got {}", w.pos(sheep));
    }

    #[test]
    fn wall_pushes_sheep_out() {
        let mut w = TestWorld::new();
        let (sheep, _) = w.add_sheep(Vec3::new(0.4, 0.0, 0.0));
        w.add_wall(Vec3::ZERO, 0.25, 3.0);

        let stats = w.resolve();
        assert_eq!(stats.collisions, 1);
        assert!((w.pos(sheep).x - 0.55).abs() < 1e-4, "got {}", w.pos(sheep));
    }

    #[test]
    fn fence_is_permeable_to_sheep() {
        let mut w = TestWorld::new();
        let (sheep, _) = w.add_sheep(Vec3::new(0.4, 0.0, 0.0));
        w.add_fence(Vec3::ZERO, 0.25, 3.0);

        let stats = w.resolve();
        assert_eq!(stats.collisions, 0, "sheep slip between the rails");
        assert_eq!(w.pos(sheep).x, 0.4);
    }

    #[test]
    fn fence_blocks_the_player() {
        let mut w = TestWorld::new();
        let player = w.add_player(Vec3::new(0.4, 0.0, 0.0));
        w.add_fence(Vec3::ZERO, 0.25, 3.0);

        let stats = w.resolve();
        assert_eq!(stats.collisions, 1);
        assert!((w.pos(player).x - 0.65).abs() < 1e-4, "got {}", w.pos(player));
        assert_eq!(w.pos(player).y, 0.0);
    }

    #[test]
    fn touching_faces_are_resting_contact() {
        let mut w = TestWorld::new();
        let (a, _) = w.add_sheep(Vec3::ZERO);
        let (_b, _) = w.add_sheep(Vec3::new(0.6, 0.0, 0.0)); // faces exactly meet

        let stats = w.resolve();
        assert_eq!(stats.collisions, 0);
        assert_eq!(w.pos(a), Vec3::ZERO);
    }

    #[test]
    fn invulnerable_sheep_passes_through_everything() {
        let mut w = TestWorld::new();
        let (sheep, agent) = w.add_sheep(Vec3::new(0.2, 0.0, 0.0));
        w.add_player(Vec3::ZERO);
        w.agents.state[agent.index()].launch(Vec3::X);

        let stats = w.resolve();
        assert_eq!(stats.collisions, 0, "thrown sheep may pass through the thrower");
        assert_eq!(w.pos(sheep).x, 0.2);

        // walls too: the grace window suspends every pass
        let mut w = TestWorld::new();
        let (sheep2, agent2) = w.add_sheep(Vec3::new(0.4, 0.0, 0.0));
        w.add_wall(Vec3::ZERO, 0.25, 3.0);
        w.agents.state[agent2.index()].launch(Vec3::X);

        let stats = w.resolve();
        assert_eq!(stats.collisions, 0);
        assert_eq!(w.pos(sheep2).x, 0.4);
        assert!(w.agents.state[agent2.index()].launched, "flight survives the graze");
    }

    #[test]
    fn spent_immunity_makes_walls_solid_again() {
        let mut w = TestWorld::new();
        let (sheep, agent) = w.add_sheep(Vec3::new(0.4, 0.0, 0.0));
        w.add_wall(Vec3::ZERO, 0.25, 3.0);
        {
            let state = &mut w.agents.state[agent.index()];
            state.launch(Vec3::X);
            state.invulnerable_left = 0.0;
        }

        let stats = w.resolve();
        assert_eq!(stats.collisions, 1);
        assert!(!w.agents.state[agent.index()].launched, "impact ends the flight");
    }

    #[test]
    fn captured_and_free_sheep_do_not_interact() {
        let mut w = TestWorld::new();
        let (a, agent_a) = w.add_sheep(Vec3::new(0.1, 0.0, 0.0));
        let (_b, agent_b) = w.add_sheep(Vec3::ZERO);
        // pen clips a's footprint but not b's
        w.add_pen(Vec3::new(1.2, 0.0, 0.0), 0.85);

        let stats = w.resolve();
        assert!(w.agents.state[agent_a.index()].captured);
        assert!(!w.agents.state[agent_b.index()].captured);
        assert_eq!(stats.collisions, 0, "the pen boundary does the separating");
        assert_eq!(w.pos(a).x, 0.1);

        // once both are inside they collide normally again
        let mut w = TestWorld::new();
        let (a, _) = w.add_sheep(Vec3::new(0.1, 0.0, 0.0));
        w.add_sheep(Vec3::ZERO);
        w.add_pen(Vec3::ZERO, 2.0);

        let stats = w.resolve();
        assert_eq!(stats.captures, 2);
        assert_eq!(stats.collisions, 1);
        assert!((w.pos(a).x - 0.6).abs() < 1e-4);
    }

    #[test]
    fn launched_sheep_hitting_wall_lands() {
        let mut w = TestWorld::new();
        let (sheep, agent) = w.add_sheep(Vec3::new(0.4, 0.2, 0.0));
        w.add_wall(Vec3::ZERO, 0.25, 3.0);
        {
            let state = &mut w.agents.state[agent.index()];
            state.launch(Vec3::new(-6.0, 3.0, 0.0));
            state.invulnerable_left = 0.0;
        }

        let stats = w.resolve();
        assert_eq!(stats.collisions, 1);
        let state = &w.agents.state[agent.index()];
        assert!(!state.launched, "impact ends the flight");
        assert!(state.panic_on_land, "the landing panic is still owed");
        assert!((w.pos(sheep).x - 0.55).abs() < 1e-4);
        assert_eq!(w.pos(sheep).y, 0.0, "dropped to ground height on impact");
    }

    #[test]
    fn separation_hook_reports_planar_push() {
        let mut w = TestWorld::new();
        let (sheep, _) = w.add_sheep(Vec3::new(0.4, 0.0, 0.0));
        let wall = w.add_wall(Vec3::ZERO, 0.25, 3.0);

        let mut log = EventLog::default();
        w.resolve_with(&mut log);
        assert_eq!(log.separations.len(), 1);
        let (entity, other, push) = log.separations[0];
        assert_eq!(entity, w.objects[sheep].entity);
        assert_eq!(other, w.objects[wall].entity);
        assert_eq!(push.y, 0.0);
        assert!(push.x > 0.0);
    }

    #[test]
    fn pen_never_pushes_sheep() {
        let mut w = TestWorld::new();
        let (sheep, agent) = w.add_sheep(Vec3::ZERO);
        w.add_pen(Vec3::ZERO, 2.0);

        let stats = w.resolve();
        assert_eq!(stats.collisions, 0);
        assert_eq!(stats.captures, 1);
        assert_eq!(w.pos(sheep), Vec3::ZERO);
        assert!(w.agents.state[agent.index()].captured);
    }

    #[test]
    fn pen_floor_blocks_the_player() {
        let mut w = TestWorld::new();
        // stepping onto the pen edge: the horizontal depth is still shallower
        // than the trigger slab, so the player is held out
        let player = w.add_player(Vec3::new(2.3, 0.0, 0.0));
        w.add_pen(Vec3::ZERO, 2.0);

        let stats = w.resolve();
        assert_eq!(stats.collisions, 1);
        assert_eq!(stats.captures, 0);
        assert!((w.pos(player).x - 2.4).abs() < 1e-4, "got {}", w.pos(player));
    }

    #[test]
    fn edge_push_stops_at_the_mover_bounds() {
        let mut w = TestWorld::new();
        // an edge-hugger shoved towards the map rim: the push runs out at
        // the bounds instead of ejecting it
        let (hugger, _) = w.add_sheep(Vec3::new(-19.9, 0.0, 0.0));
        let (pusher, _) = w.add_sheep(Vec3::new(-19.5, 0.0, 0.0));

        let stats = w.resolve();
        assert_eq!(stats.collisions, 1);
        assert_eq!(w.pos(hugger).x, -20.0, "got {}", w.pos(hugger));
        assert_eq!(w.pos(pusher).x, -19.5);
    }
}

// ── Swept movement ────────────────────────────────────────────────────────────

#[cfg(test)]
mod sweep_tests {
    use super::*;

    #[test]
    fn fast_mover_cannot_tunnel_thin_wall() {
        let mut w = TestWorld::new();
        let (sheep, _) = w.add_sheep(Vec3::new(3.0, 0.0, 0.0));
        w.add_wall(Vec3::ZERO, 0.25, 4.0);

        // previous frame the sheep was far on the other side; at its final
        // position alone the wall would never notice
        let mut prev = vec![None; w.objects.len()];
        prev[sheep] = Some(Vec3::new(-3.0, 0.0, 0.0));

        let stats = w.resolve_from(&prev, &mut NoopHooks);
        assert!(stats.collisions >= 1);
        assert!(
            (w.pos(sheep).x + 0.55).abs() < 1e-3,
            "stopped on the incoming side, got {}",
            w.pos(sheep)
        );
    }

    #[test]
    fn fast_sheep_sweeps_through_fences() {
        let mut w = TestWorld::new();
        let (sheep, _) = w.add_sheep(Vec3::new(3.0, 0.0, 0.0));
        w.add_fence(Vec3::ZERO, 0.25, 4.0);

        let mut prev = vec![None; w.objects.len()];
        prev[sheep] = Some(Vec3::new(-3.0, 0.0, 0.0));

        let stats = w.resolve_from(&prev, &mut NoopHooks);
        assert_eq!(stats.collisions, 0);
        assert_eq!(w.pos(sheep).x, 3.0, "rails are no barrier to sheep");
    }

    #[test]
    fn fast_player_is_swept_against_fences() {
        let mut w = TestWorld::new();
        let player = w.add_player(Vec3::new(3.0, 0.0, 0.0));
        w.add_fence(Vec3::ZERO, 0.25, 4.0);

        let mut prev = vec![None; w.objects.len()];
        prev[player] = Some(Vec3::new(-3.0, 0.0, 0.0));

        let stats = w.resolve_from(&prev, &mut NoopHooks);
        assert!(stats.collisions >= 1);
        assert!(w.pos(player).x < 0.0, "held on the incoming side, got {}", w.pos(player));
    }

    #[test]
    fn short_displacement_not_swept() {
        let mut w = TestWorld::new();
        let (sheep, _) = w.add_sheep(Vec3::new(3.0, 0.0, 0.0));
        w.add_wall(Vec3::ZERO, 0.25, 4.0);

        let mut prev = vec![None; w.objects.len()];
        prev[sheep] = Some(Vec3::new(2.0, 0.0, 0.0)); // 1 unit, under threshold

        let stats = w.resolve_from(&prev, &mut NoopHooks);
        assert_eq!(stats.collisions, 0);
        assert_eq!(w.pos(sheep).x, 3.0);
    }

    #[test]
    fn launched_swept_impact_cancels_flight() {
        let mut w = TestWorld::new();
        let (sheep, agent) = w.add_sheep(Vec3::new(4.0, 0.5, 0.0));
        w.add_wall(Vec3::ZERO, 0.25, 4.0);
        {
            let state = &mut w.agents.state[agent.index()];
            state.launch(Vec3::new(12.0, 1.0, 0.0));
            state.invulnerable_left = 0.0;
        }

        let mut prev = vec![None; w.objects.len()];
        prev[sheep] = Some(Vec3::new(-4.0, 0.5, 0.0));

        let stats = w.resolve_from(&prev, &mut NoopHooks);
        assert!(stats.collisions >= 1);
        assert!(!w.agents.state[agent.index()].launched);
    }

    #[test]
    fn invulnerable_fast_mover_is_not_swept() {
        let mut w = TestWorld::new();
        let (sheep, agent) = w.add_sheep(Vec3::new(3.0, 0.0, 0.0));
        w.add_wall(Vec3::ZERO, 0.25, 4.0);
        w.agents.state[agent.index()].launch(Vec3::new(12.0, 1.0, 0.0));

        let mut prev = vec![None; w.objects.len()];
        prev[sheep] = Some(Vec3::new(-3.0, 0.0, 0.0));

        let stats = w.resolve_from(&prev, &mut NoopHooks);
        assert_eq!(stats.collisions, 0);
        assert_eq!(w.pos(sheep).x, 3.0, "the grace window outruns the wall");
    }

    #[test]
    fn sweep_ignores_other_mobiles() {
        let mut w = TestWorld::new();
        let (fast, _) = w.add_sheep(Vec3::new(3.0, 0.0, 0.0));
        w.add_sheep(Vec3::ZERO); // sits right on the path

        let mut prev = vec![None; w.objects.len()];
        prev[fast] = Some(Vec3::new(-3.0, 0.0, 0.0));

        let stats = w.resolve_from(&prev, &mut NoopHooks);
        assert_eq!(stats.collisions, 0);
        assert_eq!(w.pos(fast).x, 3.0, "only statics block the sweep");
    }
}

// ── Stats ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stats_tests {
    use super::*;

    #[test]
    fn merge_accumulates() {
        let mut total = FrameStats::default();
        total.merge(FrameStats { collisions: 2, captures: 1 });
        total.merge(FrameStats { collisions: 3, captures: 0 });
        assert_eq!(total, FrameStats { collisions: 5, captures: 1 });
    }
}
