//! Ray representation for path tracing.
//!
//! A ray is `r(t) = origin + t * direction`, restricted to the open range
//! `t` and tagged with the number of bounces that produced it.

use glam::Vec3A;
use crate::interval::Interval;

/// Self-intersection offset: every generated ray starts accepting hits
/// at this distance.
pub const EPSILON: f32 = 1e-2;

/// Ray in 3D space with its valid hit range and bounce depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    pub origin: Vec3A,

    /// Direction of travel.
    ///
    /// Not enforced to be unit length, but intersection distances are only
    /// comparable across primitives when it is close to it.
    pub direction: Vec3A,

    /// Parametric range hits are accepted in. `t.max` shrinks to the
    /// nearest hit found so far during a scene scan.
    pub t: Interval,

    /// Number of bounces since the primary ray (0 for camera rays).
    pub depth: u32,
}

impl Ray {
    /// Create a primary ray with range `(EPSILON, inf)` and depth 0.
    pub fn new(origin: Vec3A, direction: Vec3A) -> Self {
        Self {
            origin,
            direction,
            t: Interval::new(EPSILON, f32::INFINITY),
            depth: 0,
        }
    }

    /// Create a ray with an explicit range and depth.
    pub fn with_range(origin: Vec3A, direction: Vec3A, t: Interval, depth: u32) -> Self {
        debug_assert!(t.is_valid(), "ray range must satisfy tmin < tmax");
        Self { origin, direction, t, depth }
    }

    /// The ray continuing a path after a bounce at `origin`.
    ///
    /// The range restarts at `(EPSILON, inf)` and the depth increases by one.
    pub fn bounce(&self, origin: Vec3A, direction: Vec3A) -> Self {
        Self {
            origin,
            direction,
            t: Interval::new(EPSILON, f32::INFINITY),
            depth: self.depth + 1,
        }
    }

    /// Compute a point at parameter t along the ray.
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }
}
