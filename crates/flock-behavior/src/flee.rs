//! Threat response: the flee trigger, heading refresh, and stuck escape.

use flock_agent::{AgentParams, AgentState};
use flock_core::AgentRng;
use flock_spatial::Transform;
use glam::Vec3;

use crate::motion::{self, DIR_EPSILON};

/// Seconds between flee heading refreshes.
pub const REFRESH_SECS: f32 = 0.1;

/// Weight of the fresh away-vector in a refresh; the remainder keeps the
/// previous heading so the escape path curves instead of jittering.
pub const BLEND_NEW: f32 = 0.4;

/// Seconds after calming down before the flee trigger arms again.
pub const COOLDOWN_SECS: f32 = 0.75;

/// Ground covered between refreshes below this counts as being stuck.
pub const STUCK_MIN_STEP: f32 = 0.05;

/// Consecutive stuck refreshes before swerving sideways.
pub const STUCK_LIMIT: u8 = 2;

/// Arm the flee when the player is inside `flee_radius`.
///
/// Captured agents ignore the player, and a cooling-down agent keeps grazing
/// until [`COOLDOWN_SECS`] have passed since it last calmed.  Returns whether
/// a flee started this frame.
pub fn maybe_start(
    params: &AgentParams,
    state: &mut AgentState,
    transform: &Transform,
    player: Vec3,
    rng: &mut AgentRng,
) -> bool {
    if state.captured || state.fleeing || state.flee_cooldown > 0.0 {
        return false;
    }
    if motion::planar_dist(transform.pos, player) > params.flee_radius {
        return false;
    }
    state.fleeing = true;
    state.paused = false;
    state.flee_dir = motion::away_dir(transform.pos, player, rng);
    state.flee_refresh_age = 0.0;
    state.refresh_anchor = transform.pos;
    state.stuck_refreshes = 0;
    true
}

/// One frame of fleeing.  Returns `false` once the agent has calmed down (or
/// the player vanished), in which case the caller finishes the frame with a
/// wander step.
pub fn update(
    params: &AgentParams,
    state: &mut AgentState,
    transform: &mut Transform,
    dt: f32,
    player: Option<Vec3>,
    rng: &mut AgentRng,
) -> bool {
    let Some(player) = player else {
        state.fleeing = false;
        state.direction_age = f32::MAX;
        return false;
    };

    if motion::planar_dist(transform.pos, player) >= params.safe_radius {
        state.fleeing = false;
        state.flee_cooldown = COOLDOWN_SECS;
        state.direction_age = f32::MAX;
        return false;
    }

    state.flee_refresh_age += dt;
    if state.flee_refresh_age >= REFRESH_SECS {
        refresh(state, transform.pos, player, rng);
    }

    let roam = *params.roam(state.captured);
    let speed = params.base_speed * params.flee_speed_factor;
    let mut dir = state.flee_dir;
    let hit_edge = motion::step_planar(transform, &mut dir, speed, dt, &roam);
    state.flee_dir = dir;
    if hit_edge {
        // cornered against the map edge: pull a fresh heading next frame
        state.flee_refresh_age = REFRESH_SECS;
    }

    motion::face_toward(transform, state.flee_dir, params.turn_rate, dt);
    motion::bob(
        transform,
        &mut state.walk_phase,
        state.ground_height,
        params.bob_speed,
        params.bob_height,
        params.flee_speed_factor,
        dt,
    );
    true
}

/// Re-aim the escape: blend toward the current away-vector and swerve
/// sideways if the last few refreshes covered almost no ground.
fn refresh(state: &mut AgentState, pos: Vec3, player: Vec3, rng: &mut AgentRng) {
    state.flee_refresh_age = 0.0;
    let away = motion::away_dir(pos, player, rng);
    let blended = away * BLEND_NEW + state.flee_dir * (1.0 - BLEND_NEW);
    state.flee_dir = if blended.length_squared() < DIR_EPSILON {
        away
    } else {
        blended.normalize()
    };

    if motion::planar_dist(pos, state.refresh_anchor) < STUCK_MIN_STEP {
        state.stuck_refreshes += 1;
        if state.stuck_refreshes >= STUCK_LIMIT {
            state.stuck_refreshes = 0;
            // of the two sideways options, take the one angled further from
            // the player
            let cw = motion::perpendicular(state.flee_dir, true);
            let ccw = motion::perpendicular(state.flee_dir, false);
            state.flee_dir = if cw.dot(away) >= ccw.dot(away) { cw } else { ccw };
        }
    } else {
        state.stuck_refreshes = 0;
    }
    state.refresh_anchor = pos;
}
