//! Triangle primitive using Möller–Trumbore intersection.
//!
//! Unlike spheres, a triangle test does not narrow the ray; it reports the
//! hit distance (or why it missed) and the scene keeps the nearest.

use glam::Vec3A;
use crate::hittable::{HitInfo, PrimitiveId};
use crate::material::{Color, Material, Reflection};
use crate::ray::Ray;

/// Determinant threshold below which a ray counts as parallel to the plane.
pub const PARALLEL_EPSILON: f32 = 1e-3;

/// Why a ray missed a triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriangleMiss {
    /// Ray (nearly) parallel to the triangle's plane.
    Parallel,
    /// First barycentric coordinate outside `[0, 1]`.
    OutsideU,
    /// Second barycentric coordinate negative, or `u + v > 1`.
    OutsideV,
    /// Plane hit at or behind the start of the ray's valid range.
    Behind,
}

impl TriangleMiss {
    /// The negative distance code this miss is encoded as when hits are
    /// stored as plain distances.
    pub fn sentinel_distance(self) -> f32 {
        match self {
            TriangleMiss::Parallel => -1.0,
            TriangleMiss::OutsideU => -2.0,
            TriangleMiss::OutsideV => -3.0,
            TriangleMiss::Behind => -4.0,
        }
    }
}

/// Flat triangle with a precomputed face normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Corner positions, counter-clockwise around `normal`.
    pub vertices: [Vec3A; 3],
    /// Unit face normal `(v1 - v0) x (v2 - v0)`.
    pub normal: Vec3A,
    /// Surface material.
    pub material: Material,
}

impl Triangle {
    /// Create a triangle and derive its face normal.
    ///
    /// A degenerate triangle gets a zero normal; see
    /// [`Scene::new`](crate::scene::Scene::new) for validation.
    pub fn new(v0: Vec3A, v1: Vec3A, v2: Vec3A, material: Material) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();
        Self { vertices: [v0, v1, v2], normal, material }
    }

    /// Triangle with the default mesh material: grey mirror, no emission.
    pub fn mesh(v0: Vec3A, v1: Vec3A, v2: Vec3A) -> Self {
        Self::new(
            v0,
            v1,
            v2,
            Material {
                emission: Color::ZERO,
                color: Color::splat(0.5),
                reflection: Reflection::Specular,
            },
        )
    }

    /// Möller–Trumbore test. Hits closer than `ray.t.min` count as behind.
    pub fn find_hit(&self, ray: &Ray, index: usize) -> Result<HitInfo, TriangleMiss> {
        let [v0, v1, v2] = self.vertices;
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        let h = ray.direction.cross(edge2);
        let det = edge1.dot(h);
        if det.abs() < PARALLEL_EPSILON {
            return Err(TriangleMiss::Parallel);
        }

        let f = 1.0 / det;
        let s = ray.origin - v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return Err(TriangleMiss::OutsideU);
        }

        let q = s.cross(edge1);
        let v = f * ray.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return Err(TriangleMiss::OutsideV);
        }

        let t = f * edge2.dot(q);
        if t <= ray.t.min {
            return Err(TriangleMiss::Behind);
        }

        Ok(HitInfo {
            distance: t,
            position: ray.at(t),
            normal: self.normal,
            material: self.material,
            ray: *ray,
            primitive: PrimitiveId::Triangle(index),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Triangle {
        Triangle::mesh(
            Vec3A::new(0.0, 0.0, -5.0),
            Vec3A::new(1.0, 0.0, -5.0),
            Vec3A::new(0.0, 1.0, -5.0),
        )
    }

    #[test]
    fn face_normal_follows_winding() {
        assert!((unit_triangle().normal - Vec3A::Z).length() < 1e-6);
    }

    #[test]
    fn hit_inside_reports_distance_and_position() {
        let ray = Ray::new(Vec3A::new(0.25, 0.25, 0.0), -Vec3A::Z);
        let hit = unit_triangle().find_hit(&ray, 2).expect("ray hits");
        assert!((hit.distance - 5.0).abs() < 1e-5);
        assert!((hit.position - Vec3A::new(0.25, 0.25, -5.0)).length() < 1e-5);
        assert_eq!(hit.primitive, PrimitiveId::Triangle(2));
        assert_eq!(hit.material.reflection, Reflection::Specular);
    }

    #[test]
    fn parallel_ray_is_rejected() {
        let ray = Ray::new(Vec3A::new(0.25, 0.25, -5.0), Vec3A::X);
        assert_eq!(unit_triangle().find_hit(&ray, 0), Err(TriangleMiss::Parallel));
    }

    #[test]
    fn outside_u_is_rejected() {
        let ray = Ray::new(Vec3A::new(-0.5, 0.25, 0.0), -Vec3A::Z);
        assert_eq!(unit_triangle().find_hit(&ray, 0), Err(TriangleMiss::OutsideU));
    }

    #[test]
    fn outside_v_is_rejected() {
        let below = Ray::new(Vec3A::new(0.25, -0.5, 0.0), -Vec3A::Z);
        assert_eq!(unit_triangle().find_hit(&below, 0), Err(TriangleMiss::OutsideV));

        let past_hypotenuse = Ray::new(Vec3A::new(0.75, 0.75, 0.0), -Vec3A::Z);
        assert_eq!(unit_triangle().find_hit(&past_hypotenuse, 0), Err(TriangleMiss::OutsideV));
    }

    #[test]
    fn hit_behind_origin_is_rejected() {
        let ray = Ray::new(Vec3A::new(0.25, 0.25, -10.0), -Vec3A::Z);
        assert_eq!(unit_triangle().find_hit(&ray, 0), Err(TriangleMiss::Behind));

        let grazing_start = Ray::new(Vec3A::new(0.25, 0.25, -4.995), -Vec3A::Z);
        assert_eq!(unit_triangle().find_hit(&grazing_start, 0), Err(TriangleMiss::Behind));
    }

    #[test]
    fn back_face_hits_report_the_same_normal() {
        let ray = Ray::new(Vec3A::new(0.25, 0.25, -10.0), Vec3A::Z);
        let hit = unit_triangle().find_hit(&ray, 0).expect("back face hit");
        assert!((hit.distance - 5.0).abs() < 1e-5);
        assert!((hit.normal - Vec3A::Z).length() < 1e-6);
    }

    #[test]
    fn sentinel_codes_are_distinct_and_negative() {
        let codes = [
            TriangleMiss::Parallel,
            TriangleMiss::OutsideU,
            TriangleMiss::OutsideV,
            TriangleMiss::Behind,
        ]
        .map(TriangleMiss::sentinel_distance);
        for (i, a) in codes.iter().enumerate() {
            assert!(*a < 0.0);
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
