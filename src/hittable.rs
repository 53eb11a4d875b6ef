//! Ray-primitive intersection results.
//!
//! A [`HitInfo`] carries everything the integrator needs after the nearest
//! hit of a bounce has been found: where, which way the surface faces, and
//! the material of the primitive that was hit.

use glam::Vec3A;
use crate::material::Material;
use crate::ray::Ray;

/// Identifies the primitive a hit belongs to inside its [`Scene`](crate::scene::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveId {
    /// Index into the scene's sphere list.
    Sphere(usize),
    /// Index into the scene's triangle list.
    Triangle(usize),
}

/// Ray-primitive intersection information.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitInfo {
    /// Distance along the ray to the intersection point
    pub distance: f32,
    /// Point where the ray intersects the primitive
    pub position: Vec3A,
    /// Geometric (outward) surface normal, unit length
    pub normal: Vec3A,
    /// Material of the primitive at the hit point
    pub material: Material,
    /// The ray that produced this hit
    pub ray: Ray,
    /// Which primitive was hit
    pub primitive: PrimitiveId,
}
