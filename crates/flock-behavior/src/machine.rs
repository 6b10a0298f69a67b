//! The per-frame behavior entry point and its mode priority chain.

use flock_agent::state::MIN_AIRBORNE_SECS;
use flock_agent::{AgentParams, AgentState, Mode};
use flock_core::AgentRng;
use flock_spatial::Transform;
use glam::Vec3;

use crate::context::BehaviorCtx;
use crate::motion::{self, DIR_EPSILON};
use crate::{flee, wander};

/// Downward acceleration on launched agents, units per second squared.
/// Heavier than Earth gravity so throws feel snappy at field scale.
pub const GRAVITY: f32 = -24.0;

/// Minimum upward fraction of a launch direction.  A flat throw still gets
/// an arc instead of skimming the ground until the landing check arms.
pub const LAUNCH_LIFT: f32 = 0.35;

// ── update ────────────────────────────────────────────────────────────────────

/// Advance one agent by one frame and return its resulting mode.
///
/// Exactly one branch moves the agent: launched, panicked, fleeing, or
/// wandering, checked in that order.  Two transitions fall through within the
/// same frame so the agent never stands idle in a stale mode: an expiring
/// panic re-checks the flee trigger immediately, and a flee that reaches
/// `safe_radius` finishes the frame wandering.
///
/// The caller validates `ctx.dt` and resolves the transform; this function
/// assumes both are good.
pub fn update(
    params: &AgentParams,
    state: &mut AgentState,
    transform: &mut Transform,
    ctx: &BehaviorCtx,
    rng: &mut AgentRng,
) -> Mode {
    let dt = ctx.dt;
    state.invulnerable_left = (state.invulnerable_left - dt).max(0.0);
    state.flee_cooldown = (state.flee_cooldown - dt).max(0.0);

    if state.launched {
        launched_update(params, state, transform, dt);
        return state.mode();
    }

    // a collision cancelled the flight mid-air; the grounded agent still
    // owes its landing panic
    if state.panic_on_land {
        state.enter_panic(params.panic_secs);
    }

    if state.panicked && panic_update(params, state, transform, dt, rng) {
        return state.mode();
    }

    if !state.fleeing {
        if let Some(player) = ctx.player_pos {
            flee::maybe_start(params, state, transform, player, rng);
        }
    }
    if state.fleeing && flee::update(params, state, transform, dt, ctx.player_pos, rng) {
        return state.mode();
    }

    wander::update(params, state, transform, dt, rng);
    state.mode()
}

// ── launch ────────────────────────────────────────────────────────────────────

/// Throw an agent along `dir` at `speed` units per second.
///
/// Degenerate directions are resampled to a random ground-plane heading, and
/// every launch gets at least [`LAUNCH_LIFT`] of upward component.  Negative
/// speeds are treated as zero: the agent is dropped in place and panics on
/// touchdown like any other landing.
pub fn launch(state: &mut AgentState, dir: Vec3, speed: f32, rng: &mut AgentRng) {
    let mut d = if dir.length_squared() < DIR_EPSILON {
        rng.planar_dir()
    } else {
        dir.normalize()
    };
    if d.y < LAUNCH_LIFT {
        d.y = LAUNCH_LIFT;
        d = d.normalize();
    }
    state.launch(d * speed.max(0.0));
}

// ── flight and panic branches ─────────────────────────────────────────────────

/// Ballistic integration while launched.  Lands once the agent has been
/// airborne at least [`MIN_AIRBORNE_SECS`], is falling, and reaches ground
/// height, or immediately on the spot when the flight would cross the map
/// edge.  Touchdown flows straight into a panic unless a mid-air capture
/// already claimed the agent.
fn launched_update(params: &AgentParams, state: &mut AgentState, transform: &mut Transform, dt: f32) {
    state.airborne_secs += dt;
    state.launch_vel.y += GRAVITY * dt;

    let target = transform.pos + state.launch_vel * dt;
    let clamped = params.bounds.clamp(target);
    if clamped.x != target.x || clamped.z != target.z {
        // flew into the map edge: the horizontal step is dropped and the
        // flight ends where it was
        transform.pos.y = state.ground_height;
        state.land();
        state.walk_phase = 0.0;
        if state.panic_on_land {
            state.enter_panic(params.panic_secs);
        }
        return;
    }
    transform.pos = target;
    // a weak throw can dip below ground before the landing check arms; skid
    // along the surface instead of tunnelling under it
    if transform.pos.y < state.ground_height {
        transform.pos.y = state.ground_height;
    }

    let heading = Vec3::new(state.launch_vel.x, 0.0, state.launch_vel.z);
    motion::face_toward(transform, heading, params.turn_rate, dt);

    if state.airborne_secs >= MIN_AIRBORNE_SECS
        && state.launch_vel.y <= 0.0
        && transform.pos.y <= state.ground_height
    {
        transform.pos.y = state.ground_height;
        state.land();
        state.walk_phase = 0.0;
        if state.panic_on_land {
            state.enter_panic(params.panic_secs);
        }
    }
}

/// One frame of erratic panic sprinting.  Returns `false` once the timer
/// expires so the caller can chain into the flee check this same frame.
fn panic_update(
    params: &AgentParams,
    state: &mut AgentState,
    transform: &mut Transform,
    dt: f32,
    rng: &mut AgentRng,
) -> bool {
    state.panic_left -= dt;
    if state.panic_left <= 0.0 {
        state.panicked = false;
        state.direction_age = f32::MAX;
        return false;
    }

    state.panic_direction_age += dt;
    if state.panic_direction_age >= params.panic_direction_interval {
        state.panic_direction_age = 0.0;
        state.direction = wander::pick_inward(transform.pos, params.roam(state.captured), rng);
    }

    let roam = *params.roam(state.captured);
    let speed = params.base_speed * params.panic_speed_factor;
    let mut dir = state.direction;
    motion::step_planar(transform, &mut dir, speed, dt, &roam);
    state.direction = dir;

    motion::face_toward(transform, state.direction, params.turn_rate, dt);
    motion::bob(
        transform,
        &mut state.walk_phase,
        state.ground_height,
        params.bob_speed,
        params.bob_height,
        params.panic_speed_factor,
        dt,
    );
    true
}
