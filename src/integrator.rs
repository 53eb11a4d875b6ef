//! Path integrator.
//!
//! Follows one light path per call. Each bounce adds the emission of the
//! surface hit, weighted by the throughput gathered so far, then multiplies
//! the throughput by the surface color. From depth `rr_depth` on, Russian
//! roulette ends paths with probability `1 - max(color)` and compensates
//! the survivors so the estimate stays unbiased.

use glam::Vec3A;
use crate::material::Color;
use crate::random::XorShiftRng;
use crate::ray::Ray;
use crate::scene::Scene;

/// Depth from which Russian roulette is applied (a path survives its first
/// five hits unconditionally).
pub const RUSSIAN_ROULETTE_DEPTH: u32 = 5;

/// Default hard cap on bounces per path.
pub const DEFAULT_MAX_BOUNCES: u32 = 1024;

/// Why a path stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The ray left the scene without hitting anything.
    Escaped,
    /// Russian roulette killed the path.
    Absorbed,
    /// The bounce cap was reached.
    BounceLimit,
}

/// Radiance estimate of one path together with how it ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    /// Radiance carried back along the path.
    pub radiance: Color,
    /// Depth of the ray that was being traced when the path stopped.
    pub depth: u32,
    /// What ended the path.
    pub termination: Termination,
}

/// Unidirectional path tracer with Russian-roulette termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathIntegrator {
    /// Depth at which Russian roulette starts.
    pub rr_depth: u32,
    /// Paths are cut off after this many bounces. A cap of 0 is treated as
    /// 1, so the primary hit is always shaded.
    pub max_bounces: u32,
}

impl Default for PathIntegrator {
    fn default() -> Self {
        Self {
            rr_depth: RUSSIAN_ROULETTE_DEPTH,
            max_bounces: DEFAULT_MAX_BOUNCES,
        }
    }
}

impl PathIntegrator {
    /// Integrator with the default roulette depth and a custom bounce cap.
    pub fn with_max_bounces(max_bounces: u32) -> Self {
        Self { max_bounces, ..Self::default() }
    }

    /// Radiance arriving along `ray`.
    pub fn radiance(&self, scene: &Scene, ray: Ray, rng: &mut XorShiftRng) -> Color {
        self.trace(scene, ray, rng).radiance
    }

    /// Trace one path starting with `ray`.
    pub fn trace(&self, scene: &Scene, mut ray: Ray, rng: &mut XorShiftRng) -> PathSample {
        let mut radiance = Color::ZERO;
        let mut throughput = Color::ONE;

        let max_bounces = self.max_bounces.max(1);
        for _ in 0..max_bounces {
            let hit = match scene.intersect(&mut ray) {
                Some(hit) => hit,
                None => {
                    return PathSample { radiance, depth: ray.depth, termination: Termination::Escaped };
                }
            };

            let material = hit.material;
            radiance += throughput * material.emission;
            throughput *= material.color;

            if ray.depth >= self.rr_depth {
                match russian_roulette(throughput, material.color.max_element(), rng) {
                    Some(survivor) => throughput = survivor,
                    None => {
                        return PathSample { radiance, depth: ray.depth, termination: Termination::Absorbed };
                    }
                }
            }

            let bounce = material
                .reflection
                .bounce(ray.direction, hit.normal, scene.indices(), rng);
            throughput *= bounce.weight;
            ray = ray.bounce(hit.position, bounce.direction);
        }

        log::trace!("path hit the bounce cap of {}", max_bounces);
        PathSample { radiance, depth: ray.depth, termination: Termination::BounceLimit }
    }
}

/// Continue the path with probability `continue_probability`, dividing the
/// throughput by it on survival. Draws one number.
///
/// A probability of zero (or less) always terminates, so the division is
/// never by zero.
pub fn russian_roulette(
    throughput: Vec3A,
    continue_probability: f32,
    rng: &mut XorShiftRng,
) -> Option<Vec3A> {
    if rng.next_f32() >= continue_probability {
        None
    } else {
        Some(throughput / continue_probability)
    }
}
