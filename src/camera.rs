//! Camera for primary ray generation.
//!
//! A fixed-orientation pinhole: the image plane is spanned by a horizontal
//! axis scaled by field of view and aspect ratio and a vertical axis at
//! right angles to it and the view direction. Rays start `lens_offset`
//! units in front of the eye along their own direction, which keeps them
//! clear of the box walls behind the eye.

use glam::{UVec2, Vec2, Vec3A};
use crate::random::XorShiftRng;
use crate::ray::Ray;

/// Camera for ray generation.
///
/// Pixel row 0 is the bottom of the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye position
    pub eye: Vec3A,
    /// Normalized view direction
    pub direction: Vec3A,
    /// Field-of-view scale of the image plane axes
    pub fov: f32,
    /// Distance primary rays are pushed forward from the eye
    pub lens_offset: f32,
    /// Image resolution in pixels
    pub resolution: UVec2,

    /// Horizontal image plane axis
    camera_x: Vec3A,
    /// Vertical image plane axis
    camera_y: Vec3A,
}

impl Camera {
    /// Camera looking into the Cornell box presets.
    pub fn new(resolution: UVec2) -> Self {
        Self::looking(
            Vec3A::new(50.0, 52.0, 295.6),
            Vec3A::new(0.0, -0.042612, -1.0),
            0.4135,
            130.0,
            resolution,
        )
    }

    /// Camera with explicit placement. `direction` is normalized here.
    ///
    /// The horizontal image axis is always world X. When `direction` is
    /// parallel to X the vertical axis falls back to an arbitrary
    /// perpendicular; a zero `direction` looks down -Z.
    pub fn looking(eye: Vec3A, direction: Vec3A, fov: f32, lens_offset: f32, resolution: UVec2) -> Self {
        let resolution = resolution.max(UVec2::ONE);
        let direction = direction.try_normalize().unwrap_or(Vec3A::NEG_Z);
        let camera_x = Vec3A::new(resolution.x as f32 * fov / resolution.y as f32, 0.0, 0.0);
        let camera_y = camera_x
            .cross(direction)
            .try_normalize()
            .unwrap_or_else(|| direction.any_orthonormal_vector())
            * fov;

        Self {
            eye,
            direction,
            fov,
            lens_offset,
            resolution,
            camera_x,
            camera_y,
        }
    }

    /// Generate a jittered primary ray through `pixel`.
    ///
    /// Draws two numbers: the x jitter, then the y jitter.
    pub fn primary_ray(&self, pixel: UVec2, rng: &mut XorShiftRng) -> Ray {
        let jitter_x = rng.next_f32();
        let jitter_y = rng.next_f32();
        let jitter = Vec2::new(jitter_x, jitter_y);

        let cs = (pixel.as_vec2() + jitter) / self.resolution.as_vec2() - Vec2::splat(0.5);
        let d = cs.x * self.camera_x + cs.y * self.camera_y + self.direction;

        Ray::new(self.eye + d * self.lens_offset, d.normalize())
    }
}
