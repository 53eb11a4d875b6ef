//! Random number generation for path tracing.
//!
//! Every stochastic decision in a path draws from one [`XorShiftRng`]
//! seeded per pixel and per frame through [`hash`]. The stream is fully
//! deterministic: the same pixel index and frame time replay the same path.
//! Also holds the cosine-weighted hemisphere warp used by diffuse bounces.

use glam::Vec3A;
use std::f32::consts::PI;

/// Scale mapping the top 24 bits of a `u32` onto `[0, 1)`: 2^-24.
const UNIT_F32_SCALE: f32 = 1.0 / (1u32 << 24) as f32;

/// Integer avalanche mix used once per path to turn a pixel/time key into
/// an initial RNG state.
pub fn hash(key: u32) -> u32 {
    let mut key = (key ^ 61) ^ (key >> 16);
    key = key.wrapping_add(key << 3);
    key ^= key >> 4;
    key = key.wrapping_mul(0x27D4_EB2D);
    key ^= key >> 15;
    key
}

/// Three-shift xorshift generator (13, 17, 5).
///
/// A zero state is a fixed point of the step; callers that need a live
/// stream must seed through [`hash`], which maps only one key onto zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XorShiftRng {
    state: u32,
}

impl XorShiftRng {
    /// Start the stream from a raw state.
    pub const fn new(state: u32) -> Self {
        Self { state }
    }

    /// Seed the stream for one pixel of one frame.
    ///
    /// `time` only contributes its bit pattern.
    pub fn for_pixel(index: u32, time: f32) -> Self {
        Self::new(hash(index ^ time.to_bits()))
    }

    /// Current raw state.
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advance the state and return it.
    pub fn next_u32(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    /// Draw a float in `[0, 1)` from the top 24 bits of the next state.
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 * UNIT_F32_SCALE
    }
}

/// Map two uniform numbers to a cosine-weighted direction around +Z.
///
/// `cos(theta) = sqrt(1 - u1)`, `sin(theta) = sqrt(u1)`, `phi = 2 pi u2`.
pub fn cosine_weighted_hemisphere(u1: f32, u2: f32) -> Vec3A {
    let cos_theta = (1.0 - u1).sqrt();
    let sin_theta = u1.sqrt();
    let phi = 2.0 * PI * u2;

    Vec3A::new(phi.cos() * sin_theta, phi.sin() * sin_theta, cos_theta)
}
