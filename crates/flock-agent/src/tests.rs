//! Unit tests for agent parameters, state transitions, and storage.

#[cfg(test)]
mod params {
    use crate::AgentParams;
    use flock_core::RectXz;

    #[test]
    fn defaults_validate() {
        AgentParams::default().validate().unwrap();
    }

    #[test]
    fn flee_hysteresis_enforced() {
        let p = AgentParams {
            safe_radius: 5.0,
            flee_radius: 5.0,
            ..AgentParams::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn pause_chance_bounds() {
        let p = AgentParams {
            pause_chance: 1.5,
            ..AgentParams::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn degenerate_pen_rejected() {
        let p = AgentParams {
            pen: RectXz::new(3.0, 3.0, 3.0, 9.0),
            ..AgentParams::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn roam_region_tracks_capture() {
        let p = AgentParams::default();
        assert_eq!(*p.roam(false), p.bounds);
        assert_eq!(*p.roam(true), p.pen);
    }
}

#[cfg(test)]
mod state {
    use crate::state::{AgentState, INVULNERABLE_SECS, Mode};
    use glam::Vec3;

    #[test]
    fn default_is_wandering() {
        let s = AgentState::default();
        assert_eq!(s.mode(), Mode::Wandering);
        assert!(!s.invulnerable());
    }

    #[test]
    fn mode_priority() {
        let mut s = AgentState::default();
        s.paused = true;
        assert_eq!(s.mode(), Mode::Paused);
        s.fleeing = true;
        assert_eq!(s.mode(), Mode::Fleeing);
        s.panicked = true;
        assert_eq!(s.mode(), Mode::Panicked);
        s.launched = true;
        assert_eq!(s.mode(), Mode::Launched);
        s.captured = true;
        assert_eq!(s.mode(), Mode::Captured);
    }

    #[test]
    fn launch_overrides_everything() {
        let mut s = AgentState::default();
        s.paused = true;
        s.pause_left = 1.0;
        s.fleeing = true;
        s.captured = true;
        s.direction = Vec3::Z;
        s.launch(Vec3::new(0.0, 6.0, 2.0));
        assert_eq!(s.mode(), Mode::Launched);
        assert!(!s.paused && !s.fleeing && !s.captured);
        assert_eq!(s.pause_left, 0.0);
        assert_eq!(s.direction, Vec3::ZERO, "stale walk heading dropped");
        assert!(s.panic_on_land);
        assert!(s.invulnerable());
        assert_eq!(s.invulnerable_left, INVULNERABLE_SECS);
    }

    #[test]
    fn land_keeps_panic_flag() {
        let mut s = AgentState::default();
        s.launch(Vec3::Y);
        s.land();
        assert!(!s.launched);
        assert_eq!(s.launch_vel, Vec3::ZERO);
        assert!(s.panic_on_land, "landing decision is the caller's");
    }

    #[test]
    fn enter_panic_forces_heading_repick() {
        let mut s = AgentState::default();
        s.fleeing = true;
        s.enter_panic(3.0);
        assert_eq!(s.mode(), Mode::Panicked);
        assert!(!s.fleeing);
        assert_eq!(s.panic_left, 3.0);
        assert!(s.panic_direction_age >= 3.0, "age must exceed any interval");
        assert!(!s.panic_on_land);
    }

    #[test]
    fn capture_fires_once_per_stay() {
        let mut s = AgentState::default();
        s.panicked = true;
        assert!(s.capture());
        assert_eq!(s.mode(), Mode::Captured);
        assert!(!s.panicked);
        assert!(!s.capture(), "second capture in the same stay is silent");
        s.release();
        assert!(s.capture(), "a new stay fires again");
    }

    #[test]
    fn launch_undoes_capture() {
        let mut s = AgentState::default();
        assert!(s.capture());
        s.launch(Vec3::new(1.0, 4.0, 0.0));
        assert!(!s.captured);
        assert_eq!(s.mode(), Mode::Launched);
    }
}

#[cfg(test)]
mod store {
    use crate::{AgentParams, AgentRngs, AgentStore};
    use flock_core::{AgentId, AgentRng, EntityId};

    #[test]
    fn spawn_assigns_dense_ids() {
        let mut store = AgentStore::new();
        let a = store.spawn(EntityId(10), AgentParams::default());
        let b = store.spawn(EntityId(20), AgentParams::default());
        assert_eq!(a, AgentId(0));
        assert_eq!(b, AgentId(1));
        assert_eq!(store.count, 2);
        assert_eq!(store.entity_of(b), EntityId(20));
        assert_eq!(store.agent_ids().count(), 2);
    }

    #[test]
    fn captured_count() {
        let mut store = AgentStore::new();
        for i in 0..4 {
            store.spawn(EntityId(i), AgentParams::default());
        }
        store.state[1].capture();
        store.state[3].capture();
        assert_eq!(store.captured_count(), 2);
    }

    #[test]
    fn rng_streams_match_direct_seeding() {
        let mut rngs = AgentRngs::new(777);
        rngs.push_next();
        rngs.push_next();
        let mut direct = AgentRng::new(777, AgentId(1));
        let from_set: u64 = rngs.get_mut(AgentId(1)).random();
        let expected: u64 = direct.random();
        assert_eq!(from_set, expected);
    }

    #[test]
    fn empty_store() {
        let store = AgentStore::new();
        assert!(store.is_empty());
        assert_eq!(store.captured_count(), 0);
        let rngs = AgentRngs::new(0);
        assert!(rngs.is_empty());
        assert_eq!(rngs.len(), 0);
    }
}
