//! Shared movement helpers used by every behavior branch.

use flock_core::{AgentRng, RectXz};
use flock_spatial::Transform;
use glam::{Quat, Vec3};

/// Headings with squared length below this are treated as degenerate and
/// resampled.
pub const DIR_EPSILON: f32 = 1e-6;

/// Distance between two points on the ground plane, ignoring height.
#[inline]
pub fn planar_dist(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

/// Unit ground-plane vector pointing from `threat` toward `pos`, or a random
/// heading when the two coincide.
pub fn away_dir(pos: Vec3, threat: Vec3, rng: &mut AgentRng) -> Vec3 {
    let d = Vec3::new(pos.x - threat.x, 0.0, pos.z - threat.z);
    if d.length_squared() < DIR_EPSILON {
        rng.planar_dir()
    } else {
        d.normalize()
    }
}

/// Rotate a ground-plane heading a quarter turn; `clockwise` picks the side.
pub fn perpendicular(dir: Vec3, clockwise: bool) -> Vec3 {
    if clockwise {
        Vec3::new(dir.z, 0.0, -dir.x)
    } else {
        Vec3::new(-dir.z, 0.0, dir.x)
    }
}

/// Advance `transform` along `dir` at `speed`, clamped into `roam`.
///
/// When the step hits an edge the offending heading component is flipped
/// inward, so the next frame walks away from the wall instead of grinding
/// against it.  Returns `true` if an edge was hit.
pub fn step_planar(
    transform: &mut Transform,
    dir: &mut Vec3,
    speed: f32,
    dt: f32,
    roam: &RectXz,
) -> bool {
    let target = transform.pos + *dir * speed * dt;
    let clamped = roam.clamp(target);
    let hit_x = clamped.x != target.x;
    let hit_z = clamped.z != target.z;
    if hit_x {
        dir.x = if target.x < clamped.x { dir.x.abs() } else { -dir.x.abs() };
    }
    if hit_z {
        dir.z = if target.z < clamped.z { dir.z.abs() } else { -dir.z.abs() };
    }
    transform.pos = clamped;
    hit_x || hit_z
}

/// Turn the transform toward `dir` at `turn_rate` radians per second.
///
/// Slerp with a clamped factor: snappy at game rates, stable when `dt` is
/// large enough that `turn_rate * dt` exceeds one.
pub fn face_toward(transform: &mut Transform, dir: Vec3, turn_rate: f32, dt: f32) {
    if dir.x * dir.x + dir.z * dir.z < DIR_EPSILON {
        return;
    }
    let target = Quat::from_rotation_y(dir.x.atan2(dir.z));
    let t = (turn_rate * dt).clamp(0.0, 1.0);
    transform.rot = transform.rot.slerp(target, t);
}

/// Advance the walk bob and set the vertical position from it.
///
/// `pace` scales the bob frequency so fleeing and panicking read as faster
/// gaits, not just faster slides.
pub fn bob(
    transform: &mut Transform,
    walk_phase: &mut f32,
    ground_height: f32,
    bob_speed: f32,
    bob_height: f32,
    pace: f32,
    dt: f32,
) {
    *walk_phase = (*walk_phase + bob_speed * pace * dt) % std::f32::consts::TAU;
    transform.pos.y = ground_height + walk_phase.sin().abs() * bob_height;
}

/// Drop back onto the ground and reset the bob, for idle poses.
pub fn settle(transform: &mut Transform, walk_phase: &mut f32, ground_height: f32) {
    *walk_phase = 0.0;
    transform.pos.y = ground_height;
}
