//! Axis-aligned rectangles on the ground plane.
//!
//! World geometry is Y-up; the playfield, fences, and pen footprint all live
//! on the X/Z plane.  [`RectXz`] stores that footprint as two corners, with
//! `Vec2.x` mapping to world X and `Vec2.y` mapping to world Z.

use glam::{Vec2, Vec3};

/// Closed axis-aligned rectangle on the X/Z ground plane.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RectXz {
    /// Corner with the smaller X and Z.
    pub min: Vec2,
    /// Corner with the larger X and Z.
    pub max: Vec2,
}

impl RectXz {
    pub const fn new(min_x: f32, min_z: f32, max_x: f32, max_z: f32) -> Self {
        Self {
            min: Vec2::new(min_x, min_z),
            max: Vec2::new(max_x, max_z),
        }
    }

    /// `true` iff both extents are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.min.x.is_finite()
            && self.min.y.is_finite()
            && self.max.x.is_finite()
            && self.max.y.is_finite()
            && self.min.x < self.max.x
            && self.min.y < self.max.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn depth(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Center of the rectangle on the ground plane, at `y == 0`.
    #[inline]
    pub fn center(&self) -> Vec3 {
        Vec3::new(
            (self.min.x + self.max.x) * 0.5,
            0.0,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    /// `true` iff `p`'s X/Z footprint is inside the rectangle (closed test;
    /// the boundary counts as inside).
    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.z >= self.min.y && p.z <= self.max.y
    }

    /// `p` with its X/Z components clamped into the rectangle.  Y passes
    /// through untouched.
    #[inline]
    pub fn clamp(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            p.x.clamp(self.min.x, self.max.x),
            p.y,
            p.z.clamp(self.min.y, self.max.y),
        )
    }

    /// Shrink by `margin` on every side.  Collapses to the center line if the
    /// margin exceeds a half-extent.
    pub fn shrunk(&self, margin: f32) -> Self {
        let mut r = Self {
            min: self.min + Vec2::splat(margin),
            max: self.max - Vec2::splat(margin),
        };
        if r.min.x > r.max.x {
            let mid = (self.min.x + self.max.x) * 0.5;
            r.min.x = mid;
            r.max.x = mid;
        }
        if r.min.y > r.max.y {
            let mid = (self.min.y + self.max.y) * 0.5;
            r.min.y = mid;
            r.max.y = mid;
        }
        r
    }

    /// Closed overlap test against another rectangle.
    #[inline]
    pub fn overlaps(&self, other: &RectXz) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}
