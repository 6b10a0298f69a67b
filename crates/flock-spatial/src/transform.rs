//! Position, orientation, and scale of a world entity.

use glam::{Affine3A, Quat, Vec3};

/// Rigid transform plus non-uniform scale.
///
/// `Copy` on purpose: frame snapshots and player mirroring clone transforms
/// freely, and the type is three SIMD-friendly fields.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub pos: Vec3,
    pub rot: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        pos: Vec3::ZERO,
        rot: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Identity rotation and unit scale at `pos`.
    #[inline]
    pub fn at(pos: Vec3) -> Self {
        Self { pos, ..Self::IDENTITY }
    }

    /// Full scale-rotate-translate affine for mapping local points to world.
    #[inline]
    pub fn affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rot, self.pos)
    }

    /// Unit vector the entity is facing, on the ground plane for upright
    /// rotations (`+Z` is "forward" in local space).
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rot * Vec3::Z
    }

    /// Orient to face `dir` about the vertical axis.  No-op when `dir` has no
    /// ground-plane component.
    pub fn face(&mut self, dir: Vec3) {
        if dir.x != 0.0 || dir.z != 0.0 {
            self.rot = Quat::from_rotation_y(dir.x.atan2(dir.z));
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
