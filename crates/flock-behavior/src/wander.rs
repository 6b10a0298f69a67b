//! Calm roaming: heading picks, grazing pauses, and edge handling.

use flock_agent::{AgentParams, AgentState};
use flock_core::{AgentRng, RectXz};
use flock_spatial::Transform;
use glam::Vec3;

use crate::motion::{self, DIR_EPSILON};

/// How close to a roam edge a fresh heading must already point back inward.
/// Keeps newly picked headings from immediately bouncing.
pub const EDGE_MARGIN: f32 = 0.75;

/// Random ground-plane heading, with components forced inward when `pos` sits
/// within [`EDGE_MARGIN`] of a roam edge.  Sign flips preserve unit length.
pub fn pick_inward(pos: Vec3, roam: &RectXz, rng: &mut AgentRng) -> Vec3 {
    let mut d = rng.planar_dir();
    if pos.x < roam.min.x + EDGE_MARGIN {
        d.x = d.x.abs();
    } else if pos.x > roam.max.x - EDGE_MARGIN {
        d.x = -d.x.abs();
    }
    if pos.z < roam.min.y + EDGE_MARGIN {
        d.z = d.z.abs();
    } else if pos.z > roam.max.y - EDGE_MARGIN {
        d.z = -d.z.abs();
    }
    d
}

/// One frame of calm roaming inside `params.roam(..)`.
///
/// A heading lives for `direction_interval` seconds; each re-pick rolls
/// `pause_chance` to graze in place instead.  Degenerate headings (fresh
/// spawns, zeroed state) are resampled immediately.
pub fn update(
    params: &AgentParams,
    state: &mut AgentState,
    transform: &mut Transform,
    dt: f32,
    rng: &mut AgentRng,
) {
    let roam = *params.roam(state.captured);

    if state.paused {
        state.pause_left -= dt;
        if state.pause_left > 0.0 {
            motion::settle(transform, &mut state.walk_phase, state.ground_height);
            return;
        }
        // pause over: straight back to walking on a fresh heading, with no
        // new pause roll until that heading has run its interval
        state.paused = false;
        state.direction = pick_inward(transform.pos, &roam, rng);
        state.direction_age = 0.0;
    }

    state.direction_age += dt;
    let needs_pick = state.direction_age >= params.direction_interval
        || state.direction.length_squared() < DIR_EPSILON;
    if needs_pick {
        state.direction_age = 0.0;
        if rng.gen_bool(params.pause_chance) {
            state.paused = true;
            state.pause_left = params.pause_secs;
            motion::settle(transform, &mut state.walk_phase, state.ground_height);
            return;
        }
        state.direction = pick_inward(transform.pos, &roam, rng);
    }

    motion::step_planar(transform, &mut state.direction, params.base_speed, dt, &roam);
    motion::face_toward(transform, state.direction, params.turn_rate, dt);
    motion::bob(
        transform,
        &mut state.walk_phase,
        state.ground_height,
        params.bob_speed,
        params.bob_height,
        1.0,
        dt,
    );
}
