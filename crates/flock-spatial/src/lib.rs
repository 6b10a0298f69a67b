//! `flock-spatial` — transforms and axis-aligned bounding volumes.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`transform`] | `Transform` (position, rotation, scale)                   |
//! | [`aabb`]      | `Aabb`, world-space derivation, overlap and separation    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                        |
//! |---------|---------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.            |
//!
//! All geometry is Y-up.  Local-space boxes are authored around an object's
//! origin; [`Aabb::from_local`] rewraps them into world space through the
//! object's full transform, so rotated boxes stay conservative (the world box
//! bounds the rotated shape, it does not rotate with it).

pub mod aabb;
pub mod transform;


pub use aabb::Aabb;
pub use transform::Transform;
