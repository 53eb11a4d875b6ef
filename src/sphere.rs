//! Sphere primitive for path tracing.
//!
//! Ray-sphere intersection solves the quadratic in its half-b form,
//! `D = b^2 - op.op + r^2` with `op = center - origin` and `b = d.op`,
//! and narrows the ray's range to the accepted root.

use glam::Vec3A;
use crate::hittable::{HitInfo, PrimitiveId};
use crate::material::Material;
use crate::ray::Ray;

/// Sphere primitive defined by center, radius, and material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Radius of the sphere (positive for a valid scene).
    pub radius: f32,

    /// Center point of the sphere in world coordinates.
    pub center: Vec3A,

    /// Material properties determining light interaction.
    pub material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub const fn new(radius: f32, center: Vec3A, material: Material) -> Self {
        Self { radius, center, material }
    }

    /// Intersect the ray and narrow `ray.t.max` on success.
    ///
    /// The near root is tried before the far root, so the nearer of the two
    /// roots inside `(ray.t.min, ray.t.max)` wins.
    pub fn intersect(&self, ray: &mut Ray) -> bool {
        let op = self.center - ray.origin;
        let dop = ray.direction.dot(op);
        let discriminant = dop * dop - op.dot(op) + self.radius * self.radius;

        if discriminant < 0.0 {
            return false;
        }

        let sqrt_d = discriminant.sqrt();

        let near = dop - sqrt_d;
        if ray.t.surrounds(near) {
            ray.t.max = near;
            return true;
        }

        let far = dop + sqrt_d;
        if ray.t.surrounds(far) {
            ray.t.max = far;
            return true;
        }

        false
    }

    /// Build the hit record for a ray whose `t.max` was set by
    /// [`Sphere::intersect`].
    pub fn hit_info(&self, ray: &Ray, index: usize) -> HitInfo {
        let position = ray.at(ray.t.max);
        HitInfo {
            distance: ray.t.max,
            position,
            normal: (position - self.center).normalize(),
            material: self.material,
            ray: *ray,
            primitive: PrimitiveId::Sphere(index),
        }
    }
}
