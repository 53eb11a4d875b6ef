//! Progressive frame accumulation.
//!
//! Each frame produces one new radiance sample per pixel; the film keeps
//! the running mean of all samples so far. One [`Invocation`] is the unit
//! of work for one pixel of one frame: seed the RNG, shoot the camera ray,
//! trace the path, merge it into the stored mean.

use glam::{UVec2, Vec3A, Vec4};
use image::{ImageBuffer, Rgba};
use crate::camera::Camera;
use crate::integrator::PathIntegrator;
use crate::material::Color;
use crate::random::XorShiftRng;
use crate::scene::Scene;

/// Persistent per-pixel mean radiance, RGBA with alpha fixed at 1.
pub type Film = ImageBuffer<Rgba<f32>, Vec<f32>>;

/// Create a film of zero radiance.
pub fn new_film(width: u32, height: u32) -> Film {
    ImageBuffer::from_pixel(width, height, Rgba([0.0, 0.0, 0.0, 1.0]))
}

/// Fold the sample of frame `frame` (0-based) into the running mean.
///
/// After frames `0..n` the result is the arithmetic mean of their samples.
pub fn accumulate(mean: Color, sample: Color, frame: u32) -> Color {
    mean + (sample - mean) / (frame as f32 + 1.0)
}

/// Inputs for one pixel of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Invocation {
    /// Pixel coordinate, `0 <= x < width`, `0 <= y < height`
    pub pixel: UVec2,
    /// Frame index, 0 for the first sample
    pub frame: u32,
    /// Per-frame entropy; only its bit pattern is used
    pub time: f32,
    /// Mean stored for this pixel by the previous frame
    pub mean: Color,
}

impl Invocation {
    /// Linear pixel index `y * width + x` used to seed the RNG.
    pub fn pixel_index(&self, resolution: UVec2) -> u32 {
        self.pixel
            .y
            .wrapping_mul(resolution.x)
            .wrapping_add(self.pixel.x)
    }
}

/// Render one new sample for the invocation's pixel and return the updated
/// mean with alpha 1.
pub fn invoke(
    scene: &Scene,
    camera: &Camera,
    integrator: &PathIntegrator,
    invocation: &Invocation,
) -> Vec4 {
    let index = invocation.pixel_index(camera.resolution);
    let mut rng = XorShiftRng::for_pixel(index, invocation.time);

    let ray = camera.primary_ray(invocation.pixel, &mut rng);
    let sample = integrator.radiance(scene, ray, &mut rng);
    let mean = accumulate(invocation.mean, sample, invocation.frame);

    mean.extend(1.0)
}

/// Read the stored mean of a film pixel.
pub fn pixel_mean(pixel: &Rgba<f32>) -> Vec3A {
    Vec3A::new(pixel[0], pixel[1], pixel[2])
}
