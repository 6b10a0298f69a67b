//! Axis-aligned bounding boxes and the separation math built on them.

use glam::Vec3;

use crate::transform::Transform;

/// Closed axis-aligned box, `min` component-wise ≤ `max`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box of half-extents `half` centered on the local origin.
    #[inline]
    pub fn centered(half: Vec3) -> Self {
        Self { min: -half, max: half }
    }

    /// Box resting on the local ground plane: `half` wide/deep around the
    /// origin, rising `height` above it.  The usual shape for agents and
    /// scenery that stand on the field.
    #[inline]
    pub fn footed(half_x: f32, height: f32, half_z: f32) -> Self {
        Self {
            min: Vec3::new(-half_x, 0.0, -half_z),
            max: Vec3::new(half_x, height, half_z),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Rewrap this local-space box into world space through `transform`.
    ///
    /// All eight corners go through the full affine and the result is the
    /// axis-aligned box around them.  For rotated objects this is
    /// conservative: the world box contains the rotated shape.
    pub fn from_local(local: Aabb, transform: &Transform) -> Aabb {
        let m = transform.affine();
        let mut min = Vec3::INFINITY;
        let mut max = Vec3::NEG_INFINITY;
        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { local.min.x } else { local.max.x },
                if i & 2 == 0 { local.min.y } else { local.max.y },
                if i & 4 == 0 { local.min.z } else { local.max.z },
            );
            let world = m.transform_point3(corner);
            min = min.min(world);
            max = max.max(world);
        }
        Aabb { min, max }
    }

    /// Closed overlap test: boxes sharing only a face still intersect.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Minimal translation that moves `self` out of `other`, or `Vec3::ZERO`
    /// when the boxes do not overlap.
    ///
    /// The six single-axis pushes are compared by magnitude and the smallest
    /// wins; ties go to the earlier candidate in the fixed order
    /// `+X, -X, +Y, -Y, +Z, -Z`, which keeps resolution deterministic when an
    /// object sits exactly in a corner.
    pub fn min_translation(&self, other: &Aabb) -> Vec3 {
        if !self.intersects(other) {
            return Vec3::ZERO;
        }
        let candidates = [
            Vec3::new(other.max.x - self.min.x, 0.0, 0.0),
            Vec3::new(self.max.x - other.min.x, 0.0, 0.0) * -1.0,
            Vec3::new(0.0, other.max.y - self.min.y, 0.0),
            Vec3::new(0.0, self.max.y - other.min.y, 0.0) * -1.0,
            Vec3::new(0.0, 0.0, other.max.z - self.min.z),
            Vec3::new(0.0, 0.0, self.max.z - other.min.z) * -1.0,
        ];
        let mut best = candidates[0];
        for c in &candidates[1..] {
            if c.length_squared() < best.length_squared() {
                best = *c;
            }
        }
        best
    }
}
